use crate::app::{App, Panel};
use crate::ui::palette::{rgb, Palette};
use airwatch_core::chart::{ChartKind, ChartStyle, Series};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs,
};
use ratatui::Frame;

pub fn render_chart_panel(app: &App, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Panel::Chart;
    let block = Block::default()
        .title(" AQI Analytics ")
        .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { palette.accent } else { palette.border }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(inner);

    render_chart_tabs(app, palette, f, split[0]);

    let style = ChartStyle::for_theme(app.current_theme());
    let visible: Vec<&Series> = app.chart.visible_series().collect();
    if visible.is_empty() {
        let paragraph = Paragraph::new("No sensor selected")
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, split[1]);
        return;
    }

    match app.chart.kind {
        ChartKind::Line => render_line_chart(app, &visible, style, palette, f, split[1]),
        ChartKind::Bar => render_bar_chart(app, &visible, style, f, split[1]),
    }
}

fn render_chart_tabs(app: &App, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(10)])
        .split(area);

    let selected = match app.chart.kind {
        ChartKind::Line => 0,
        ChartKind::Bar => 1,
    };
    let tabs = Tabs::new(vec!["Curve", "Bar"])
        .select(selected)
        .style(Style::default().fg(palette.muted))
        .highlight_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));
    f.render_widget(tabs, split[0]);

    let filter = Paragraph::new(TextLine::from(vec![
        Span::styled("Sensor: ", Style::default().fg(palette.muted)),
        Span::styled(app.chart.filter_label(), Style::default().fg(palette.text)),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(filter, split[1]);
}

/// Rounds the data maximum up to the next multiple of ten, with headroom.
fn y_bound(max: f64) -> f64 {
    ((max * 1.1) / 10.0).ceil().max(1.0) * 10.0
}

fn render_line_chart(
    app: &App,
    visible: &[&Series],
    style: ChartStyle,
    palette: &Palette,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let points: Vec<Vec<(f64, f64)>> = visible
        .iter()
        .map(|series| {
            series
                .values
                .iter()
                .enumerate()
                .map(|(index, value)| (index as f64, *value))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset<'_>> = visible
        .iter()
        .zip(points.iter())
        .map(|(series, data)| {
            Dataset::default()
                .name(series.label)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(rgb(series.color)))
                .data(data)
        })
        .collect();

    let labels = &app.chart.labels;
    let last = labels.len().saturating_sub(1);
    let x_labels: Vec<Span<'_>> = [0, last / 2, last]
        .iter()
        .filter_map(|index| labels.get(*index))
        .map(|label| Span::raw(*label))
        .collect();

    let y_max = y_bound(app.chart.y_max());
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{}", (y_max / 2.0).round())),
        Span::raw(format!("{y_max}")),
    ];

    let axis_style = Style::default().fg(rgb(style.grid.flatten(palette.background)));
    let text_style = Style::default().fg(rgb(style.text));

    let chart = Chart::new(datasets)
        .style(text_style)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, last as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("AQI")
                .style(axis_style)
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn render_bar_chart(
    app: &App,
    visible: &[&Series],
    style: ChartStyle,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let groups = app.chart.labels.len().max(1) as u16;
    let per_group = visible.len().max(1) as u16;
    let gaps = groups.saturating_sub(1);
    let bar_width = (area.width.saturating_sub(gaps) / (groups * per_group)).max(1);

    let mut chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(1)
        .label_style(Style::default().fg(rgb(style.text)))
        .max(y_bound(app.chart.y_max()) as u64);

    for (index, label) in app.chart.labels.iter().enumerate() {
        let bars: Vec<Bar<'_>> = visible
            .iter()
            .map(|series| {
                let value = series.values.get(index).copied().unwrap_or(0.0);
                Bar::default()
                    .value(value.round() as u64)
                    .text_value(String::new())
                    .style(Style::default().fg(rgb(series.color)))
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(TextLine::from(*label))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}
