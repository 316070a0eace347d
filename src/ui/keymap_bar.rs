//! Keymap help bar UI component.

use crate::app::App;
use crate::session::Screen;
use crate::topic::SimulationType;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub(super) fn draw_keymap(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let keymap_text = if app.input.is_active() {
        "Enter:submit | Esc:cancel | Type to edit"
    } else if app.session.screen == Screen::Home {
        "Enter:start | T:theme | q:quit"
    } else {
        match app.session.simulation {
            Some(SimulationType::Problem) => {
                "a:answer | s:solve | n:new | jk/Tab/Enter:select | J/K:scroll | y:copy | T:theme | q:quit"
            },
            Some(SimulationType::Application) => {
                "e:function | jk/Tab/Enter:select | y:copy | T:theme | Esc:home | q:quit"
            },
            _ => "jk/↑↓:nav | Tab:next list | Enter:select | x:clear | J/K:scroll | y:copy | T:theme | Esc:home | q:quit",
        }
    };

    let paragraph = Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
