//! Status bar UI component.

use crate::app::App;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the status bar.
pub(super) fn draw_status(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let text = match app.input.target() {
        Some(target) => format!("{} {}", target.prompt(), app.input.buffer()),
        None if app.session.is_checking() => "Checking answer...".to_string(),
        None if app.session.is_solving() => "Solving...".to_string(),
        None if app.next_problem_pending() => "Next problem coming up...".to_string(),
        None => app.status.clone(),
    };

    let paragraph =
        Paragraph::new(text).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    f.render_widget(paragraph, area);
}
