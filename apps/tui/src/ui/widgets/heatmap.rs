use crate::app::{App, Panel};
use crate::ui::palette::{rgb, Palette};
use airwatch_core::heatmap::{HeatCell, DAYS, HOURS};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const DAY_LABEL_WIDTH: u16 = 4;

/// Cell width that fits all 24 hours into `inner_width` columns.
fn cell_width(inner_width: u16) -> usize {
    let available = inner_width.saturating_sub(DAY_LABEL_WIDTH);
    usize::from((available / HOURS as u16).clamp(1, 3))
}

pub fn render_heatmap(app: &App, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Panel::Heatmap;
    let block = Block::default()
        .title(" Weekly AQI Heatmap ")
        .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { palette.accent } else { palette.border }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = cell_width(inner.width);
    let mut lines: Vec<TextLine<'_>> = DAYS
        .iter()
        .enumerate()
        .map(|(day, label)| {
            let mut spans = vec![Span::styled(
                format!("{label:<4}"),
                Style::default().fg(palette.muted),
            )];
            spans.extend(
                app.heatmap
                    .row(day)
                    .iter()
                    .map(|cell| cell_span(cell, app, palette, focused, width)),
            );
            TextLine::from(spans)
        })
        .collect();

    let tooltip = app
        .heatmap
        .cell(app.heat_cursor.day, app.heat_cursor.hour)
        .map(HeatCell::tooltip)
        .unwrap_or_default();
    lines.push(TextLine::from(Span::styled(
        tooltip,
        Style::default().fg(palette.text),
    )));

    let paragraph = Paragraph::new(Text::from(lines)).alignment(Alignment::Left);
    f.render_widget(paragraph, inner);
}

fn cell_span<'a>(
    cell: &HeatCell,
    app: &App,
    palette: &Palette,
    focused: bool,
    width: usize,
) -> Span<'a> {
    let fill = rgb(cell.color().flatten(palette.background));
    let selected = focused && cell.day == app.heat_cursor.day && cell.hour == app.heat_cursor.hour;
    if selected {
        let mark = format!("{:^width$}", "x");
        return Span::styled(
            mark,
            Style::default()
                .bg(fill)
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        );
    }
    Span::styled(" ".repeat(width), Style::default().bg(fill))
}
