use crate::app::App;
use crate::ui::palette::Palette;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// One bordered card per display slot, left to right.
pub fn render_stat_cards(app: &App, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let slots: Vec<_> = app.board.iter().collect();
    if slots.is_empty() {
        return;
    }

    let count = slots.len() as u32;
    let constraints: Vec<Constraint> = slots.iter().map(|_| Constraint::Ratio(1, count)).collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    // The whole row is outlined in the band colour of the latest reading.
    let border_color = app
        .monitor
        .quality()
        .map_or(palette.border, |quality| palette.tone(quality.tone()));

    for ((slot, value), column) in slots.into_iter().zip(columns.iter()) {
        let value_color = value.tone.map_or(palette.text, |tone| palette.tone(tone));

        let card = Paragraph::new(Text::from(vec![
            TextLine::from(""),
            TextLine::from(Span::styled(
                value.text.clone(),
                Style::default()
                    .fg(value_color)
                    .add_modifier(Modifier::BOLD),
            )),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!(" {} ", slot.label()))
                .title_style(Style::default().fg(palette.muted))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );

        f.render_widget(card, *column);
    }
}
