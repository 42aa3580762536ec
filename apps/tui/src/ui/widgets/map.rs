use crate::app::{App, Panel};
use crate::ui::palette::Palette;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

const GRID_LINES: u32 = 4;

pub fn render_map(app: &App, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let map = &app.map;
    let focused = app.focus == Panel::Map;

    let title_color = if map.loading { palette.muted } else { palette.accent };
    let footer = if map.loading {
        " searching... ".to_string()
    } else {
        format!(" z{} | {} ", map.zoom, map.tiles.name())
    };

    let block = Block::default()
        .title(format!(" {} ", map.label))
        .title_style(Style::default().fg(title_color).add_modifier(Modifier::BOLD))
        .title_bottom(TextLine::from(Span::styled(
            footer,
            Style::default().fg(palette.muted),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { palette.accent } else { palette.border }));

    let ([west, east], [south, north]) = map.bounds();
    let grid_color = palette.border;
    let (marker_color, label_color) = if map.loading {
        (palette.muted, palette.muted)
    } else {
        (palette.danger, palette.text)
    };

    let canvas = Canvas::default()
        .block(block)
        .background_color(palette.background())
        .marker(Marker::Braille)
        .x_bounds([west, east])
        .y_bounds([south, north])
        .paint(move |ctx| {
            for step in 1..GRID_LINES {
                let fraction = f64::from(step) / f64::from(GRID_LINES);
                let x = fraction.mul_add(east - west, west);
                let y = fraction.mul_add(north - south, south);
                ctx.draw(&CanvasLine {
                    x1: x,
                    y1: south,
                    x2: x,
                    y2: north,
                    color: grid_color,
                });
                ctx.draw(&CanvasLine {
                    x1: west,
                    y1: y,
                    x2: east,
                    y2: y,
                    color: grid_color,
                });
            }

            ctx.layer();

            for marker in &map.markers {
                let (x, y) = (marker.position.lon, marker.position.lat);
                if x < west || x > east || y < south || y > north {
                    continue;
                }
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color: marker_color,
                });
                ctx.print(
                    x,
                    y,
                    Span::styled(
                        format!(" {} ({})", marker.name, marker.status),
                        Style::default().fg(label_color),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}
