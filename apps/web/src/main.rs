use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use airwatch_core::chart::ChartKind;
use airwatch_core::color::Rgb;
use airwatch_core::geocode::{GeocodeRequest, DEFAULT_GEOCODER_URL};
use airwatch_core::heatmap::DAYS;
use airwatch_core::notifier::{ALERT_TITLE, EMPTY_STATE};
use airwatch_core::reading::DEFAULT_READINGS_PATH;
use airwatch_core::refresh::POLL_INTERVAL_SECS;
use airwatch_core::{Theme, Tone};
use chrono::Utc;
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap},
    Frame, Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen_futures::spawn_local;

mod browser;
mod dashboard;
mod schedule;

use dashboard::{Dashboard, KeyEffect};

const fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

#[derive(Clone, Copy)]
struct Colors {
    background: Rgb,
    text: Color,
    muted: Color,
    accent: Color,
    key: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Colors {
    const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Rgb::new(0x12, 0x14, 0x1c),
                text: Color::White,
                muted: Color::Gray,
                accent: Color::Cyan,
                key: Color::Yellow,
                success: Color::Rgb(0x00, 0xE3, 0x96),
                warning: Color::Rgb(0xFE, 0xB0, 0x19),
                danger: Color::Rgb(0xFF, 0x45, 0x60),
            },
            Theme::Light => Self {
                background: Rgb::new(0xf4, 0xf5, 0xf7),
                text: Color::Rgb(0x33, 0x33, 0x33),
                muted: Color::Rgb(0x66, 0x66, 0x66),
                accent: Color::Rgb(0x00, 0x8F, 0xFB),
                key: Color::Rgb(0xb3, 0x6b, 0x00),
                success: Color::Rgb(0x00, 0x9e, 0x68),
                warning: Color::Rgb(0xc7, 0x86, 0x00),
                danger: Color::Rgb(0xd6, 0x28, 0x3f),
            },
        }
    }

    const fn tone(self, tone: Tone) -> Color {
        match tone {
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Danger => self.danger,
        }
    }
}

fn main() -> io::Result<()> {
    let dashboard = Dashboard::new(
        Box::new(browser::LocalStorageThemeStore),
        js_sys::Date::now() as u64,
    );
    let state = Rc::new(RefCell::new(dashboard));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        move |event| {
            let effect = state.borrow_mut().handle_key(event.code);
            match effect {
                KeyEffect::None => {}
                KeyEffect::ThemeChanged(changed) => browser::dispatch_theme_changed(changed),
                KeyEffect::Search(request) => spawn_local(search(state.clone(), request)),
            }
        }
    });

    terminal.draw_web(move |f| {
        let ticket = state
            .borrow_mut()
            .schedule
            .poll_due(browser::now_seconds(), POLL_INTERVAL_SECS as f64);
        if let Some(ticket) = ticket {
            spawn_local(poll(state.clone(), ticket));
        }

        render(&state.borrow(), f);
    });

    Ok(())
}

async fn poll(state: Rc<RefCell<Dashboard>>, ticket: u64) {
    let result = browser::fetch_readings(DEFAULT_READINGS_PATH).await;
    let mut dashboard = state.borrow_mut();
    if !dashboard.schedule.finish(ticket) {
        web_sys::console::warn_1(&"Dropping the answer of a written-off fetch".into());
        return;
    }
    if let Some(error) = dashboard.apply(result, Utc::now()) {
        web_sys::console::error_1(&error.into());
    }
}

async fn search(state: Rc<RefCell<Dashboard>>, request: GeocodeRequest) {
    let result = browser::search_location(DEFAULT_GEOCODER_URL, &request).await;
    // Released before the alert, which blocks the page until dismissed.
    let alert = state.borrow_mut().finish_search(result);
    if let Some(message) = alert {
        browser::alert(message);
    }
}

fn render(dashboard: &Dashboard, f: &mut Frame<'_>) {
    let colors = Colors::for_theme(dashboard.theme.theme());
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(rgb(colors.background)).fg(colors.text)),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area.inner(Margin::new(1, 0)));

    render_header(dashboard, colors, f, layout[0]);
    render_cards(dashboard, colors, f, layout[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[2]);
    render_chart(dashboard, colors, f, middle[0]);
    render_map(dashboard, colors, f, middle[1]);

    render_heatmap(dashboard, colors, f, layout[3]);

    let mut status = vec![Span::styled(
        dashboard.status.clone(),
        Style::default().fg(colors.muted),
    )];
    if dashboard.schedule.in_flight() {
        status.push(Span::styled("  refreshing...", Style::default().fg(colors.accent)));
    }
    f.render_widget(Paragraph::new(TextLine::from(status)), layout[4]);
    render_footer(colors, f, layout[5]);

    if dashboard.monitor.notifications().is_dropdown_open() {
        render_notifications(dashboard, colors, f, area);
    }
    if let Some(input) = &dashboard.search {
        render_search(input, colors, f, area);
    }
}

fn render_header(dashboard: &Dashboard, colors: Colors, f: &mut Frame<'_>, area: Rect) {
    let log = dashboard.monitor.notifications();
    let bell = if log.badge_visible() {
        Span::styled(
            format!(" [!] {} ", log.len()),
            Style::default().fg(colors.danger).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" [ ] 0 ", Style::default().fg(colors.muted))
    };

    let line = TextLine::from(vec![
        Span::styled(
            "AirWatch ",
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}] ", dashboard.theme.theme().as_str()),
            Style::default().fg(colors.muted),
        ),
        bell,
    ]);

    let paragraph = Paragraph::new(Text::from(line)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.accent)),
    );
    f.render_widget(paragraph, area);
}

fn render_cards(dashboard: &Dashboard, colors: Colors, f: &mut Frame<'_>, area: Rect) {
    let slots: Vec<_> = dashboard.board.iter().collect();
    let count = slots.len().max(1) as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(slots.iter().map(|_| Constraint::Ratio(1, count)).collect::<Vec<_>>())
        .split(area);

    let border = dashboard
        .monitor
        .quality()
        .map_or(colors.muted, |quality| colors.tone(quality.tone()));

    for ((slot, value), column) in slots.into_iter().zip(columns.iter()) {
        let value_color = value.tone.map_or(colors.text, |tone| colors.tone(tone));
        let card = Paragraph::new(Text::from(vec![
            TextLine::from(""),
            TextLine::from(Span::styled(
                value.text.clone(),
                Style::default().fg(value_color).add_modifier(Modifier::BOLD),
            )),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(slot.label())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(card, *column);
    }
}

fn render_chart(dashboard: &Dashboard, colors: Colors, f: &mut Frame<'_>, area: Rect) {
    let chart_data = &dashboard.chart;
    let title = format!(
        " AQI Analytics ({} | {}) ",
        chart_data.kind.as_str(),
        chart_data.filter_label()
    );

    let points: Vec<(&str, Color, Vec<(f64, f64)>)> = chart_data
        .visible_series()
        .map(|series| {
            let data = series
                .values
                .iter()
                .enumerate()
                .map(|(index, value)| (index as f64, *value))
                .collect();
            (series.label, rgb(series.color), data)
        })
        .collect();

    let graph_type = match chart_data.kind {
        ChartKind::Line => GraphType::Line,
        ChartKind::Bar => GraphType::Bar,
    };
    let datasets = points
        .iter()
        .map(|(label, color, data)| {
            Dataset::default()
                .name(*label)
                .marker(Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(*color))
                .data(data)
        })
        .collect::<Vec<_>>();

    let last = chart_data.labels.len().saturating_sub(1);
    let x_labels = [0, last]
        .iter()
        .filter_map(|index| chart_data.labels.get(*index))
        .map(|label| Span::raw(*label))
        .collect::<Vec<_>>();
    let y_max = (chart_data.y_max() * 1.1 / 10.0).ceil().max(1.0) * 10.0;

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.muted)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(colors.muted))
                .bounds([0.0, last as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(colors.muted))
                .bounds([0.0, y_max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{y_max}"))]),
        );
    f.render_widget(chart, area);
}

fn render_map(dashboard: &Dashboard, colors: Colors, f: &mut Frame<'_>, area: Rect) {
    let map = &dashboard.map;
    let mut lines = vec![
        TextLine::from(Span::styled(
            format!("{:.4}, {:.4}  z{}", map.center.lat, map.center.lon, map.zoom),
            Style::default().fg(colors.muted),
        )),
        TextLine::from(""),
    ];
    for marker in &map.markers {
        lines.push(TextLine::from(vec![
            Span::styled("* ", Style::default().fg(colors.danger)),
            Span::styled(marker.name, Style::default().fg(colors.text)),
            Span::styled(format!("  {}", marker.status), Style::default().fg(colors.success)),
        ]));
    }
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        map.center_tile_url(),
        Style::default().fg(colors.muted),
    )));

    let title_style = if map.loading {
        Style::default().fg(colors.muted)
    } else {
        Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)
    };
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", map.label), title_style))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.muted)),
        );
    f.render_widget(paragraph, area);
}

fn render_heatmap(dashboard: &Dashboard, colors: Colors, f: &mut Frame<'_>, area: Rect) {
    let cursor = dashboard.heat_cursor;
    let mut lines: Vec<TextLine<'_>> = DAYS
        .iter()
        .enumerate()
        .map(|(day, label)| {
            let mut spans = vec![Span::styled(
                format!("{label:<4}"),
                Style::default().fg(colors.muted),
            )];
            for cell in dashboard.heatmap.row(day) {
                let fill = rgb(cell.color().flatten(colors.background));
                let selected = cell.day == cursor.day && cell.hour == cursor.hour;
                let symbol = if selected { "[]" } else { "  " };
                spans.push(Span::styled(symbol, Style::default().bg(fill).fg(colors.text)));
            }
            TextLine::from(spans)
        })
        .collect();

    if let Some(cell) = dashboard.heatmap.cell(cursor.day, cursor.hour) {
        lines.push(TextLine::from(Span::styled(
            cell.tooltip(),
            Style::default().fg(colors.text),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(" Weekly AQI Heatmap ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.muted)),
    );
    f.render_widget(paragraph, area);
}

fn render_footer(colors: Colors, f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(colors.key).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(colors.muted);
    let entries = [
        ("t", "Theme"),
        ("n", "Alerts"),
        ("/", "Search"),
        ("c", "Chart"),
        ("a/1-3", "Sensor"),
        ("o", "CO card"),
        ("Arrows", "Heatmap"),
    ];
    let spans = entries
        .iter()
        .flat_map(|(k, label)| {
            [
                Span::styled(*k, key),
                Span::styled(format!(": {label}  "), text),
            ]
        })
        .collect::<Vec<_>>();
    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_notifications(dashboard: &Dashboard, colors: Colors, f: &mut Frame<'_>, area: Rect) {
    let width = 48.min(area.width);
    let popup = Rect {
        x: area.x + area.width - width,
        y: area.y + 3.min(area.height),
        width,
        height: 12.min(area.height.saturating_sub(3)),
    };
    f.render_widget(Clear, popup);

    let entries = dashboard.monitor.notifications().entries();
    let now = Utc::now();
    let lines = if entries.is_empty() {
        vec![TextLine::from(Span::styled(EMPTY_STATE, Style::default().fg(colors.muted)))]
    } else {
        entries
            .iter()
            .flat_map(|entry| {
                [
                    TextLine::from(vec![
                        Span::styled(
                            ALERT_TITLE,
                            Style::default().fg(colors.danger).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {}", entry.age_label(now)),
                            Style::default().fg(colors.muted),
                        ),
                    ]),
                    TextLine::from(entry.message.clone()),
                ]
            })
            .collect()
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Notifications  [c] Clear all ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.key))
                .style(Style::default().bg(rgb(colors.background))),
        );
    f.render_widget(paragraph, popup);
}

fn render_search(input: &str, colors: Colors, f: &mut Frame<'_>, area: Rect) {
    let width = 50.min(area.width);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(3) / 2,
        width,
        height: 3.min(area.height),
    };
    f.render_widget(Clear, popup);

    let paragraph = Paragraph::new(TextLine::from(vec![
        Span::styled("> ", Style::default().fg(colors.key)),
        Span::styled(input.to_string(), Style::default().fg(colors.text)),
    ]))
    .block(
        Block::default()
            .title(" Search location (Enter / Esc) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.accent))
            .style(Style::default().bg(rgb(colors.background))),
    );
    f.render_widget(paragraph, popup);
}
