use crate::app::App;
use crate::ui::palette::Palette;
use crate::ui::widgets::popup::top_right_rect;
use airwatch_core::notifier::{ALERT_TITLE, EMPTY_STATE};
use chrono::{DateTime, Utc};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const DROPDOWN_WIDTH: u16 = 48;
const DROPDOWN_HEIGHT: u16 = 14;

/// Header bell: count of alerts, highlighted while unread.
pub fn bell_span<'a>(app: &App, palette: &Palette) -> Span<'a> {
    let log = app.monitor.notifications();
    if log.badge_visible() {
        Span::styled(
            format!(" [!] {} ", log.len()),
            Style::default()
                .fg(palette.danger)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" [ ] 0 ", Style::default().fg(palette.muted))
    }
}

pub fn render_notifications_dropdown(
    app: &App,
    palette: &Palette,
    f: &mut Frame<'_>,
    area: Rect,
    now: DateTime<Utc>,
) {
    let popup = top_right_rect(DROPDOWN_WIDTH, DROPDOWN_HEIGHT, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Notifications ")
        .title_style(Style::default().fg(palette.key).add_modifier(Modifier::BOLD))
        .title_bottom(TextLine::from(vec![
            Span::styled("[c]", Style::default().fg(palette.key).add_modifier(Modifier::BOLD)),
            Span::styled(" Clear all ", Style::default().fg(palette.muted)),
            Span::styled("[Esc]", Style::default().fg(palette.key).add_modifier(Modifier::BOLD)),
            Span::styled(" Close", Style::default().fg(palette.muted)),
        ]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.key))
        .style(Style::default().bg(palette.background()));

    let entries = app.monitor.notifications().entries();
    if entries.is_empty() {
        let empty = Paragraph::new(EMPTY_STATE)
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, popup);
        return;
    }

    let mut lines = Vec::with_capacity(entries.len() * 3);
    for entry in entries {
        lines.push(TextLine::from(vec![
            Span::styled(
                ALERT_TITLE,
                Style::default()
                    .fg(palette.danger)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", entry.age_label(now)),
                Style::default().fg(palette.muted),
            ),
        ]));
        lines.push(TextLine::from(Span::styled(
            entry.message.clone(),
            Style::default().fg(palette.text),
        )));
        lines.push(TextLine::from(""));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup);
}
