//! Application state and logic.

use std::time::Instant;

use crate::api::{ApiResponse, ApiWorker};
use crate::clipboard;
use crate::error::MathSimError;
use crate::input::{InputTarget, TextInput};
use crate::session::{dispatch, Command, Effect, RenderInstruction, SessionContext, SessionState};
use crate::topic::{Difficulty, SimulationType, Topic};
use crate::ui::ThemeColors;

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Selection pane with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    /// Topic list.
    Topic,
    /// Difficulty list.
    Difficulty,
    /// Simulation type list.
    Simulation,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Learner-visible session.
    pub session: SessionState,
    /// Dispatch collaborators.
    pub ctx: SessionContext,
    /// Text input.
    pub input: TextInput,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Focused selection pane.
    pub focus: Pane,
    /// Cursor in the topic list.
    pub topic_cursor: usize,
    /// Cursor in the difficulty list.
    pub difficulty_cursor: usize,
    /// Cursor in the simulation list.
    pub simulation_cursor: usize,
    /// Scroll offset of the simulation area.
    pub content_scroll: u16,
    /// What the last dispatch asked to redraw.
    pub last_render: RenderInstruction,
    worker: Option<ApiWorker>,
    next_problem_at: Option<Instant>,
}

impl App {
    /// Create a new application instance.
    pub fn new(ctx: SessionContext, worker: Option<ApiWorker>) -> Self {
        let mut app = Self {
            session: SessionState::new(),
            ctx,
            input: TextInput::new(),
            status: "Ready".to_string(),
            theme: Theme::GruvboxDark,
            focus: Pane::Topic,
            topic_cursor: 0,
            difficulty_cursor: 0,
            simulation_cursor: 0,
            content_scroll: 0,
            last_render: RenderInstruction::Home,
            worker,
            next_problem_at: None,
        };
        app.apply_theme_to_plotter();
        app
    }

    /// Dispatch a command and carry out its effects.
    pub fn apply(&mut self, command: Command) {
        let leaves_problem = matches!(command, Command::ChooseSimulation(_) | Command::ReturnHome);
        let state = std::mem::take(&mut self.session);
        let transition = dispatch(state, command, &mut self.ctx);
        self.session = transition.state;
        self.last_render = transition.render;

        // A scheduled problem belongs to the simulation that asked for it.
        if leaves_problem || self.session.simulation.is_none() {
            self.next_problem_at = None;
        }

        if let Some(ref notice) = self.session.notice {
            self.status = notice.clone();
        }
        if transition.render == RenderInstruction::SimulationArea {
            self.content_scroll = 0;
        }

        for effect in transition.effects {
            match effect {
                Effect::Request(request) => {
                    let failed = match self.worker {
                        Some(ref worker) => worker.submit(request.clone()).err(),
                        None => Some(MathSimError::api("API worker unavailable")),
                    };
                    if let Some(e) = failed {
                        tracing::error!("Could not queue request {}: {}", request.id, e);
                        self.apply(Command::ApiCompleted(ApiResponse {
                            id: request.id,
                            purpose: request.purpose,
                            result: Err(e),
                        }));
                    }
                },
                Effect::ScheduleNextProblem(delay) => {
                    self.next_problem_at = Some(Instant::now() + delay);
                },
            }
        }
    }

    /// Deliver finished requests and fire due timers.
    pub fn tick(&mut self) {
        loop {
            let Some(response) = self.worker.as_ref().and_then(ApiWorker::try_recv) else {
                break;
            };
            self.apply(Command::ApiCompleted(response));
        }

        if self.next_problem_at.is_some_and(|at| Instant::now() >= at) {
            self.next_problem_at = None;
            self.apply(Command::NextProblem);
        }
    }

    /// Whether a new problem is scheduled.
    pub fn next_problem_pending(&self) -> bool {
        self.next_problem_at.is_some()
    }

    /// Leave the home screen.
    pub fn start(&mut self) {
        self.apply(Command::Start);
        self.status = "Choose a topic and a difficulty".to_string();
    }

    /// Skip the home screen with a topic, and optionally a difficulty,
    /// already chosen.
    pub fn preselect(&mut self, topic: Topic, difficulty: Option<Difficulty>) {
        self.start();
        self.focus = Pane::Topic;
        self.topic_cursor = Topic::ALL.iter().position(|t| *t == topic).unwrap_or(0);
        self.select_current();
        if let Some(difficulty) = difficulty {
            self.difficulty_cursor = Difficulty::ALL
                .iter()
                .position(|d| *d == difficulty)
                .unwrap_or(0);
            self.select_current();
        }
    }

    /// Return to the home screen.
    pub fn go_home(&mut self) {
        self.apply(Command::ReturnHome);
        self.status = "Ready".to_string();
    }

    /// Move focus to the next selection pane.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Pane::Topic => Pane::Difficulty,
            Pane::Difficulty if self.session.selection_complete() => Pane::Simulation,
            Pane::Difficulty | Pane::Simulation => Pane::Topic,
        };
    }

    /// Move the focused cursor up.
    pub fn cursor_up(&mut self) {
        let cursor = self.focused_cursor();
        *cursor = cursor.saturating_sub(1);
    }

    /// Move the focused cursor down.
    pub fn cursor_down(&mut self) {
        let len = match self.focus {
            Pane::Topic => Topic::ALL.len(),
            Pane::Difficulty => Difficulty::ALL.len(),
            Pane::Simulation => SimulationType::ALL.len(),
        };
        let cursor = self.focused_cursor();
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    fn focused_cursor(&mut self) -> &mut usize {
        match self.focus {
            Pane::Topic => &mut self.topic_cursor,
            Pane::Difficulty => &mut self.difficulty_cursor,
            Pane::Simulation => &mut self.simulation_cursor,
        }
    }

    /// Select the item under the focused cursor.
    pub fn select_current(&mut self) {
        match self.focus {
            Pane::Topic => {
                let topic = Topic::ALL[self.topic_cursor];
                self.apply(Command::SelectTopic(Some(topic)));
                self.status = format!("Topic: {}", topic);
                self.focus = Pane::Difficulty;
            },
            Pane::Difficulty => {
                let difficulty = Difficulty::ALL[self.difficulty_cursor];
                self.apply(Command::SelectDifficulty(Some(difficulty)));
                self.status = format!("Difficulty: {}", difficulty);
                if self.session.selection_complete() {
                    self.focus = Pane::Simulation;
                }
            },
            Pane::Simulation => {
                let kind = SimulationType::ALL[self.simulation_cursor];
                self.apply(Command::ChooseSimulation(kind));
                if self.session.simulation == Some(kind) {
                    self.status = kind.label().to_string();
                }
            },
        }
    }

    /// Clear the focused selection.
    pub fn clear_current(&mut self) {
        match self.focus {
            Pane::Topic => self.apply(Command::SelectTopic(None)),
            Pane::Difficulty => self.apply(Command::SelectDifficulty(None)),
            Pane::Simulation => return,
        }
        self.focus = Pane::Topic;
        self.status = "Selection cleared".to_string();
    }

    /// Start editing a field, if the active simulation has it.
    pub fn begin_input(&mut self, target: InputTarget) {
        let allowed = match target {
            InputTarget::Answer | InputTarget::Custom => {
                self.session.simulation == Some(SimulationType::Problem)
            },
            InputTarget::Plot => self.session.simulation == Some(SimulationType::Application),
        };
        if !allowed {
            return;
        }
        let initial = match target {
            InputTarget::Plot => self.session.plot.expression.clone(),
            _ => String::new(),
        };
        self.input.start(target, &initial);
    }

    /// Submit the text input to its field.
    pub fn submit_input(&mut self) {
        let Some((target, text)) = self.input.submit() else {
            return;
        };
        match target {
            InputTarget::Answer => self.apply(Command::SubmitAnswer(text)),
            InputTarget::Custom => self.apply(Command::SolveCustom(text)),
            InputTarget::Plot => {
                self.apply(Command::PlotFunction(text));
                if let Some(ref status) = self.session.plot.status {
                    self.status = status.clone();
                }
            },
        }
    }

    /// Ask for a fresh problem.
    pub fn new_problem(&mut self) {
        self.next_problem_at = None;
        self.apply(Command::NextProblem);
    }

    /// Cycle to the next theme and redraw the plot in its colors.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.apply_theme_to_plotter();
        if self.session.plot.outcome.is_some() {
            let expression = self.session.plot.expression.clone();
            self.apply(Command::PlotFunction(expression));
        }
        self.status = format!("Theme: {}", self.theme.name());
    }

    fn apply_theme_to_plotter(&mut self) {
        let colors = ThemeColors::from_theme(&self.theme);
        self.ctx.plotter.set_style(colors.plot_style());
    }

    /// Scroll the simulation area down.
    pub fn scroll_down(&mut self) {
        self.content_scroll = self.content_scroll.saturating_add(1);
    }

    /// Scroll the simulation area up.
    pub fn scroll_up(&mut self) {
        self.content_scroll = self.content_scroll.saturating_sub(1);
    }

    /// Copy the active simulation's text to the clipboard.
    pub fn copy_current(&mut self) {
        let Some(text) = clipboard::copyable_text(&self.session) else {
            self.status = "Nothing to copy".to_string();
            return;
        };
        match clipboard::copy_to_clipboard(&text) {
            Ok(()) => self.status = "Copied!".to_string(),
            Err(e) => self.status = format!("Copy failed: {}", e),
        }
    }
}
