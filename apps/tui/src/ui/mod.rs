//! Rendering of the dashboard and its overlays.

pub mod palette;
pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use chrono::Utc;
use palette::Palette;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let palette = Palette::for_theme(app.current_theme());
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background()).fg(palette.text)),
        f.area(),
    );

    match app.screen {
        AppScreen::Dashboard => screens::dashboard::render_dashboard(app, &palette, f),
        AppScreen::Settings => screens::settings::render_settings(app, &palette, f),
    }

    if app.show_help {
        screens::dashboard::render_help_popup(&palette, f);
    }
    if app.monitor.notifications().is_dropdown_open() {
        widgets::notifications::render_notifications_dropdown(
            app,
            &palette,
            f,
            f.area(),
            Utc::now(),
        );
    }
    if app.search.active {
        widgets::popup::render_search_box(app, &palette, f);
    }
    if let Some(message) = &app.alert {
        widgets::popup::render_alert(message, &palette, f);
    }
}
