use crate::app::App;
use crate::ui::palette::Palette;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Rect of `percent_x` by `percent_y` of `area`, centred.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Fixed-size rect centred in `area`, shrunk to fit.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Fixed-size rect hanging from the top-right corner of `area`.
pub fn top_right_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    }
}

/// Blocking message box, dismissed by any key.
pub fn render_alert(message: &str, palette: &Palette, f: &mut Frame<'_>) {
    let width = (message.chars().count() as u16 + 6).max(30);
    let area = centered_fixed(width, 7, f.area());
    f.render_widget(Clear, area);

    let text = Text::from(vec![
        TextLine::from(""),
        TextLine::from(Span::styled(message.to_string(), Style::default().fg(palette.text))),
        TextLine::from(""),
        TextLine::from(Span::styled("Press any key", Style::default().fg(palette.muted))),
    ]);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Alert ")
                .title_style(Style::default().fg(palette.warning).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.warning))
                .style(Style::default().bg(palette.background())),
        );
    f.render_widget(paragraph, area);
}

pub fn render_search_box(app: &App, palette: &Palette, f: &mut Frame<'_>) {
    let area = centered_fixed(50, 3, f.area());
    f.render_widget(Clear, area);

    // Blinking block cursor driven by the animation counter.
    let cursor = if app.animation_counter.sin() > 0.0 { "_" } else { " " };
    let line = TextLine::from(vec![
        Span::styled("> ", Style::default().fg(palette.key).add_modifier(Modifier::BOLD)),
        Span::styled(app.search.input.clone(), Style::default().fg(palette.text)),
        Span::styled(cursor, Style::default().fg(palette.accent)),
    ]);
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(" Search location ")
            .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
            .title_bottom(TextLine::from(Span::styled(
                " Enter: search | Esc: cancel ",
                Style::default().fg(palette.muted),
            )))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.background())),
    );
    f.render_widget(paragraph, area);
}
