use crate::app::App;
use crate::ui::palette::Palette;
use crate::ui::widgets::charts::render_chart_panel;
use crate::ui::widgets::heatmap::render_heatmap;
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::notifications::bell_span;
use crate::ui::widgets::popup::centered_rect;
use crate::ui::widgets::stat_cards::render_stat_cards;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, palette: &Palette, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(5),  // Stat cards
            Constraint::Min(8),     // Chart and map
            Constraint::Length(10), // Heatmap
            Constraint::Length(3),  // Status
            Constraint::Length(1),  // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_header(app, palette, f, layout[0]);
    render_stat_cards(app, palette, f, layout[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[2]);
    render_chart_panel(app, palette, f, middle[0]);
    render_map(app, palette, f, middle[1]);

    render_heatmap(app, palette, f, layout[3]);
    render_status_section(app, palette, f, layout[4]);
    render_shortcuts(palette, f, layout[5]);
}

fn render_header(app: &App, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "AirWatch ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Live Air Quality",
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Left);
    f.render_widget(title, split[0]);

    let quality = app.monitor.quality().map_or_else(
        || Span::styled("waiting for data", Style::default().fg(palette.muted)),
        |quality| {
            Span::styled(
                quality.label(),
                Style::default()
                    .fg(palette.tone(quality.tone()))
                    .add_modifier(Modifier::BOLD),
            )
        },
    );
    let right = Paragraph::new(TextLine::from(vec![
        quality,
        Span::styled(
            format!("  {}  ", app.current_theme().as_str()),
            Style::default().fg(palette.muted),
        ),
        bell_span(app, palette),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(right, split[1]);
}

fn render_status_section(app: &App, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(palette.key))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let mut spans = Vec::new();
    if app.status_message.is_empty() {
        spans.push(Span::styled(
            "Waiting for the first reading",
            Style::default().fg(palette.muted),
        ));
    } else {
        let style = if app.last_error.is_some() || app.status_message.starts_with("Critical") {
            Style::default().fg(palette.danger)
        } else {
            Style::default().fg(palette.success)
        };
        spans.push(Span::styled(app.status_message.clone(), style));
    }
    if let Some(source) = &app.source {
        spans.push(Span::styled(
            format!("  ({} every {}s)", source.api_url, source.poll_secs),
            Style::default().fg(palette.muted),
        ));
    }

    let status_paragraph = Paragraph::new(TextLine::from(spans))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let shortcuts = shortcut_line(
        palette,
        &[
            ("Tab", "Panel"),
            ("c", "Chart"),
            ("/", "Search"),
            ("t", "Theme"),
            ("n", "Alerts"),
            ("s", "Settings"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    );
    let paragraph = Paragraph::new(shortcuts).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// `key: label | key: label` hint line.
pub fn shortcut_line<'a>(palette: &Palette, entries: &[(&'a str, &'a str)]) -> TextLine<'a> {
    let key_style = Style::default().fg(palette.key).add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(palette.muted);
    let mut spans = Vec::with_capacity(entries.len() * 2);
    for (index, (key, label)) in entries.iter().enumerate() {
        spans.push(Span::styled(*key, key_style));
        let separator = if index + 1 == entries.len() { "" } else { " | " };
        spans.push(Span::styled(format!(": {label}{separator}"), text_style));
    }
    TextLine::from(spans)
}

pub fn render_help_popup(palette: &Palette, f: &mut Frame<'_>) {
    let popup_area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title(" Help & Keyboard Shortcuts ")
        .title_style(Style::default().fg(palette.key).add_modifier(Modifier::BOLD))
        .title_bottom(TextLine::from(Span::styled(
            " Press ? or Esc to close ",
            Style::default().fg(palette.muted),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.key))
        .style(Style::default().bg(palette.background()));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines(palette)))
        .block(help_block)
        .wrap(Wrap { trim: false });
    f.render_widget(help_paragraph, popup_area);
}

fn build_help_lines(palette: &Palette) -> Vec<TextLine<'static>> {
    let key_style = Style::default().fg(palette.key).add_modifier(Modifier::BOLD);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let shortcut = |key: &'static str, text: &'static str| {
        TextLine::from(vec![
            Span::styled(format!("  {key:<10}"), key_style),
            Span::raw(text),
        ])
    };

    let mut lines = vec![
        TextLine::from(Span::styled(
            "AirWatch",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Polls the sensor API and raises an alert when the AQI goes above 100."),
        TextLine::from(""),
        TextLine::from(Span::styled("Keyboard Shortcuts:", bold)),
        shortcut("Tab", "Focus next panel (chart, map, heatmap)"),
        shortcut("Arrows", "Chart: change sensor | Heatmap: move selection"),
        shortcut("c", "Switch between curve and bar chart"),
        shortcut("a / 1-9", "Show all sensors / a single sensor"),
        shortcut("/", "Search a place on the map"),
        shortcut("t", "Toggle dark / light theme"),
        shortcut("n", "Open notifications"),
        shortcut("s", "Settings"),
        shortcut("q", "Quit"),
        TextLine::from(""),
        TextLine::from(Span::styled("Air quality bands:", bold)),
        TextLine::from(vec![
            Span::styled("  0-50     ", Style::default().fg(palette.success)),
            Span::raw("EXCELLENT"),
        ]),
        TextLine::from(vec![
            Span::styled("  51-100   ", Style::default().fg(palette.warning)),
            Span::raw("MODERATE"),
        ]),
        TextLine::from(vec![
            Span::styled("  101+     ", Style::default().fg(palette.danger)),
            Span::raw("POOR (raises an alert)"),
        ]),
        TextLine::from(""),
        TextLine::from(Span::styled("CLI Options:", bold)),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
