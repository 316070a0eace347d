//! Simulation area: concept notes, practice problems and the grapher.

use super::ThemeColors;
use crate::app::App;
use crate::concepts::{ConceptNotes, SectionBody};
use crate::input::InputTarget;
use crate::plot::canvas::plot_canvas;
use crate::session::{CORRECT_FEEDBACK, MISSING_NOTES};
use crate::topic::SimulationType;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub(super) fn draw_simulation(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    match app.session.simulation {
        Some(SimulationType::Concept) => draw_concept(f, app, area, colors),
        Some(SimulationType::Problem) => draw_problem(f, app, area, colors),
        Some(SimulationType::Application) => draw_graph(f, app, area, colors),
        None => {
            let hint = if app.session.selection_complete() {
                "Choose a simulation type"
            } else {
                "Select a topic and difficulty to begin"
            };
            let paragraph = Paragraph::new(hint)
                .block(panel(" Simulation ", colors))
                .style(Style::default().fg(colors.text));
            f.render_widget(paragraph, area);
        },
    }
}

fn panel<'a>(title: &'a str, colors: &ThemeColors) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg))
}

fn heading(text: &str, colors: &ThemeColors) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(colors.heading)
            .add_modifier(Modifier::BOLD),
    ))
}

fn draw_concept(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let lines = match app.session.concept_notes {
        Some(ref notes) => format_notes(notes, colors),
        None => vec![Line::from(Span::styled(
            MISSING_NOTES,
            Style::default().fg(colors.warning),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(panel(" Concept Notes ", colors))
        .style(Style::default().fg(colors.text))
        .wrap(Wrap { trim: false })
        .scroll((app.content_scroll, 0));

    f.render_widget(paragraph, area);
}

fn format_notes(notes: &ConceptNotes, colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = vec![];

    for section in notes.sections() {
        lines.push(heading(section.heading, colors));
        match section.body {
            SectionBody::Paragraph(text) => lines.push(Line::from(text)),
            SectionBody::Items(items) => {
                for item in items {
                    for (i, text) in item.lines().enumerate() {
                        let bullet = if i == 0 { "  • " } else { "    " };
                        lines.push(Line::from(vec![
                            Span::styled(bullet, Style::default().fg(colors.label)),
                            Span::raw(text.to_string()),
                        ]));
                    }
                }
            },
        }
        lines.push(Line::from(""));
    }

    lines
}

fn draw_problem(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let session = &app.session;
    let mut lines = vec![];

    if let Some(ref problem) = session.problem {
        lines.push(heading("Problem", colors));
        lines.push(Line::from(problem.text.clone()));
        lines.push(Line::from(""));
    }

    if let Some(ref feedback) = session.answer_feedback {
        let color = if session.is_checking() {
            colors.warning
        } else if feedback == CORRECT_FEEDBACK {
            colors.value
        } else {
            colors.error
        };
        lines.push(Line::from(Span::styled(feedback.clone(), Style::default().fg(color))));
        lines.push(Line::from(""));
    }

    lines.push(heading("Solve your own", colors));
    match session.custom_result {
        Some(ref result) => {
            let color = if session.is_solving() { colors.warning } else { colors.text };
            lines.push(Line::from(Span::styled(result.clone(), Style::default().fg(color))));
        },
        None => lines.push(Line::from(Span::styled(
            "Press s to enter an expression",
            Style::default().fg(colors.border),
        ))),
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let paragraph = Paragraph::new(lines)
        .block(panel(" Problem Solving ", colors))
        .style(Style::default().fg(colors.text))
        .wrap(Wrap { trim: true })
        .scroll((app.content_scroll, 0));
    f.render_widget(paragraph, chunks[0]);

    draw_input(f, app, chunks[1], &[InputTarget::Answer, InputTarget::Custom], colors);
}

fn draw_graph(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1), Constraint::Length(3)])
        .split(area);

    let plot = &app.session.plot;
    let canvas = plot_canvas(&plot.drawing, colors.plot_bg).block(panel(" Graph ", colors));
    f.render_widget(canvas, chunks[0]);

    let status = plot
        .status
        .clone()
        .unwrap_or_else(|| "Press e to enter a function of x".to_string());
    let status_color = match plot.outcome {
        Some(ref outcome) if !outcome.status.is_plotted() => colors.error,
        Some(_) => colors.value,
        None => colors.border,
    };
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(status_color).bg(colors.bg)),
        chunks[1],
    );

    draw_input(f, app, chunks[2], &[InputTarget::Plot], colors);
}

fn draw_input(
    f: &mut Frame<'_>,
    app: &App,
    area: Rect,
    targets: &[InputTarget],
    colors: &ThemeColors,
) {
    let active = app.input.target().filter(|t| targets.contains(t));

    let (title, text, border) = match active {
        Some(target) => (
            format!(" {} ", target.prompt()),
            app.input.buffer().to_string(),
            colors.focus_border,
        ),
        None => {
            let hint = if targets.contains(&InputTarget::Plot) {
                "e: enter function"
            } else {
                "a: answer | s: solve | n: new problem"
            };
            (" Input ".to_string(), hint.to_string(), colors.border)
        },
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(colors.bg)),
        )
        .style(Style::default().fg(colors.text));
    f.render_widget(paragraph, area);

    if active.is_some() {
        let x = area.x + 1 + app.input.display_width().min(area.width.saturating_sub(3));
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concepts::ConceptLibrary;
    use crate::config::{PlotConfig, PracticeConfig};
    use crate::plot::{MevalEvaluator, PlotRenderer};
    use crate::problem::{Problem, ProblemKind};
    use crate::session::{Command, SessionContext};
    use crate::topic::{Difficulty, Topic};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| crate::ui::draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn open_question_keeps_reference_hidden() {
        let ctx = SessionContext::new(
            ConceptLibrary::bundled().unwrap(),
            PlotRenderer::new(MevalEvaluator, PlotConfig::default()),
            PracticeConfig::default(),
        );
        let mut app = App::new(ctx, None);
        app.apply(Command::Start);
        app.apply(Command::SelectTopic(Some(Topic::CalculusDerivatives)));
        app.apply(Command::SelectDifficulty(Some(Difficulty::Applied)));
        app.apply(Command::ChooseSimulation(SimulationType::Problem));
        app.session.problem = Some(Problem {
            topic: Topic::CalculusDerivatives,
            difficulty: Difficulty::Applied,
            kind: ProblemKind::Theorem,
            text: "State the chain rule.".to_string(),
            equation: Some("d/dx f(g(x)) = f'(g(x)) g'(x)".to_string()),
            operation: None,
        });

        let text = screen_text(&app);
        assert!(text.contains("State the chain rule."));
        assert!(!text.contains("f'(g(x))"));
    }
}
