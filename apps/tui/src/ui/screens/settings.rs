use crate::app::App;
use crate::ui::palette::Palette;
use crate::ui::screens::dashboard::shortcut_line;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn render_settings(app: &App, palette: &Palette, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    let rows = [
        ("Dark mode", app.current_theme().is_dark()),
        ("Show CO level card", app.shows_co()),
    ];
    let mut lines = vec![TextLine::from("")];
    for (index, (label, checked)) in rows.iter().enumerate() {
        let selected = index == app.settings_selection_index;
        let style = if selected {
            Style::default()
                .fg(palette.background())
                .bg(palette.key)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        let prefix = if selected { ">" } else { " " };
        lines.push(TextLine::from(vec![
            Span::styled(format!("{prefix} {} ", checkbox(*checked)), style),
            Span::styled(*label, style),
        ]));
    }

    let options = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(" Settings ")
            .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent)),
    );
    f.render_widget(options, layout[0]);

    let label_style = Style::default().fg(palette.muted);
    let value_style = Style::default().fg(palette.text);
    let source_lines: Vec<TextLine<'_>> = app.source.as_ref().map_or_else(
        || vec![TextLine::from(Span::styled("No data source configured", label_style))],
        |source| {
            vec![
                TextLine::from(vec![
                    Span::styled("Readings API:  ", label_style),
                    Span::styled(source.api_url.clone(), value_style),
                ]),
                TextLine::from(vec![
                    Span::styled("Refresh every: ", label_style),
                    Span::styled(format!("{}s", source.poll_secs), value_style),
                ]),
                TextLine::from(vec![
                    Span::styled("Preferences:   ", label_style),
                    Span::styled(source.theme_file.clone(), value_style),
                ]),
            ]
        },
    );
    let source = Paragraph::new(Text::from(source_lines)).block(
        Block::default()
            .title(" Data source ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );
    f.render_widget(source, layout[1]);

    let hint = shortcut_line(
        palette,
        &[("Up/Down", "Select"), ("Enter", "Toggle"), ("Esc", "Back"), ("q", "Quit")],
    );
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), layout[2]);
}
