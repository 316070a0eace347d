//! User interface rendering.

mod home;
mod keymap_bar;
mod selection;
mod simulation;
mod status_bar;
mod theme;

use crate::app::App;
use crate::session::Screen;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &App) {
    let colors = ThemeColors::from_theme(&app.theme);

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    match app.session.screen {
        Screen::Home => home::draw_home(f, chunks[0], &colors),
        Screen::Simulation => {
            let content = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(28), Constraint::Min(20)])
                .split(chunks[0]);

            selection::draw_selection(f, app, content[0], &colors);
            simulation::draw_simulation(f, app, content[1], &colors);
        },
    }

    status_bar::draw_status(f, chunks[1], app, &colors);
    keymap_bar::draw_keymap(f, chunks[2], app, &colors);
}
