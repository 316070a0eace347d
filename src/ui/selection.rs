//! Topic, difficulty and simulation lists.

use super::ThemeColors;
use crate::app::{App, Pane};
use crate::topic::{Difficulty, SimulationType, Topic};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub(super) fn draw_selection(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(Topic::ALL.len() as u16 + 2),
            Constraint::Length(Difficulty::ALL.len() as u16 + 2),
            Constraint::Min(SimulationType::ALL.len() as u16 + 2),
        ])
        .split(area);

    let topics: Vec<(String, bool)> = Topic::ALL
        .iter()
        .map(|t| (t.to_string(), app.session.topic == Some(*t)))
        .collect();
    draw_list(f, chunks[0], " Topic ", &topics, app, Pane::Topic, app.topic_cursor, colors);

    let difficulties: Vec<(String, bool)> = Difficulty::ALL
        .iter()
        .map(|d| (d.label().to_string(), app.session.difficulty == Some(*d)))
        .collect();
    draw_list(
        f,
        chunks[1],
        " Difficulty ",
        &difficulties,
        app,
        Pane::Difficulty,
        app.difficulty_cursor,
        colors,
    );

    // Simulation types unlock once both choices are made
    if app.session.selection_complete() {
        let kinds: Vec<(String, bool)> = SimulationType::ALL
            .iter()
            .map(|k| (k.label().to_string(), app.session.simulation == Some(*k)))
            .collect();
        draw_list(
            f,
            chunks[2],
            " Simulation ",
            &kinds,
            app,
            Pane::Simulation,
            app.simulation_cursor,
            colors,
        );
    } else {
        let block = Block::default()
            .title(" Simulation ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg));
        let hint = List::new([ListItem::new("Pick a topic and difficulty")])
            .block(block)
            .style(Style::default().fg(colors.border));
        f.render_widget(hint, chunks[2]);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_list(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    entries: &[(String, bool)],
    app: &App,
    pane: Pane,
    cursor: usize,
    colors: &ThemeColors,
) {
    let focused = app.focus == pane && !app.input.is_active();

    let items: Vec<ListItem<'_>> = entries
        .iter()
        .enumerate()
        .map(|(idx, (name, selected))| {
            let marker = if *selected { "● " } else { "  " };
            let style = if focused && idx == cursor {
                Style::default()
                    .fg(colors.cursor_fg)
                    .bg(colors.cursor_bg)
                    .add_modifier(Modifier::BOLD)
            } else if *selected {
                Style::default().fg(colors.value)
            } else {
                Style::default().fg(colors.text)
            };
            ListItem::new(Line::from(format!("{}{}", marker, name))).style(style)
        })
        .collect();

    let border = if focused { colors.focus_border } else { colors.border };
    let list = List::new(items).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg)),
    );

    f.render_widget(list, area);
}
