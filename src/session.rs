//! Session state and command dispatch.
//!
//! All learner-visible state lives in [`SessionState`]. Input is turned into
//! a [`Command`], and [`dispatch`] returns the next state together with a
//! [`RenderInstruction`] and any [`Effect`]s (network requests, timers) the
//! caller must carry out. Dispatch itself never blocks or touches the
//! terminal.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::api::{answers_match, ApiOperation, ApiRequest, ApiResponse, RequestPurpose};
use crate::concepts::{ConceptLibrary, ConceptNotes};
use crate::config::PracticeConfig;
use crate::plot::{PlotOutcome, PlotRenderer, RecordingSurface};
use crate::problem::{generate_problem, Problem};
use crate::topic::{Difficulty, SimulationType, Topic};

/// Shown when a non-checkable problem is submitted.
pub const OPEN_QUESTION_FEEDBACK: &str = "This is a conceptual or statement problem. Please check \
     your answer with the explanation or example in the concept notes.";
/// Shown after a correct answer.
pub const CORRECT_FEEDBACK: &str = "✅ Correct! Generating new problem...";
/// Shown when a request fails.
pub const API_ERROR_FEEDBACK: &str = "API error. Try again.";
/// Shown when the custom solver gets no input.
pub const EMPTY_CUSTOM_FEEDBACK: &str = "Please enter a problem.";
/// Shown when the custom solver gets prose instead of math.
pub const STATEMENT_CUSTOM_FEEDBACK: &str = "Step-by-step solutions for statement problems will \
     be available soon. For now, please refer to the concept notes and examples.";
/// Shown when no notes exist for the selection.
pub const MISSING_NOTES: &str = "No concept notes found for this topic and level.";

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Welcome screen.
    #[default]
    Home,
    /// Topic/difficulty selection and simulation area.
    Simulation,
}

/// State of the function plotter.
#[derive(Debug, Clone, Default)]
pub struct PlotState {
    /// Last submitted expression.
    pub expression: String,
    /// Status line under the input.
    pub status: Option<String>,
    /// Recorded drawing of the last plot.
    pub drawing: RecordingSurface,
    /// Outcome of the last plot.
    pub outcome: Option<PlotOutcome>,
}

/// Everything the learner can see, passed explicitly between handlers.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Current screen.
    pub screen: Screen,
    /// Selected topic.
    pub topic: Option<Topic>,
    /// Selected difficulty.
    pub difficulty: Option<Difficulty>,
    /// Active simulation, if one was chosen.
    pub simulation: Option<SimulationType>,
    /// Notes shown in concept mode; `None` when missing.
    pub concept_notes: Option<ConceptNotes>,
    /// Current practice problem.
    pub problem: Option<Problem>,
    /// Feedback on the last submitted answer.
    pub answer_feedback: Option<String>,
    /// Output of the custom solver.
    pub custom_result: Option<String>,
    /// Plotter state.
    pub plot: PlotState,
    /// General notice, e.g. why a command was ignored.
    pub notice: Option<String>,
    pending_check: Option<u64>,
    pending_custom: Option<u64>,
    next_request_id: u64,
}

impl SessionState {
    /// Fresh session on the home screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether both topic and difficulty are chosen, which unlocks the
    /// simulation types.
    pub fn selection_complete(&self) -> bool {
        self.topic.is_some() && self.difficulty.is_some()
    }

    /// Whether an answer check is in flight.
    pub fn is_checking(&self) -> bool {
        self.pending_check.is_some()
    }

    /// Whether a custom solve is in flight.
    pub fn is_solving(&self) -> bool {
        self.pending_custom.is_some()
    }

    fn allocate_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    fn clear_simulation(&mut self) {
        self.simulation = None;
        self.concept_notes = None;
        self.problem = None;
        self.answer_feedback = None;
        self.custom_result = None;
        self.pending_check = None;
        self.pending_custom = None;
        self.plot = PlotState::default();
    }
}

/// Learner intent.
#[derive(Debug)]
pub enum Command {
    /// Leave the home screen.
    Start,
    /// Go back to the home screen, keeping the selection.
    ReturnHome,
    /// Choose or clear the topic.
    SelectTopic(Option<Topic>),
    /// Choose or clear the difficulty.
    SelectDifficulty(Option<Difficulty>),
    /// Open a simulation for the current selection.
    ChooseSimulation(SimulationType),
    /// Submit an answer to the current problem.
    SubmitAnswer(String),
    /// Evaluate a learner-supplied expression.
    SolveCustom(String),
    /// Plot a function of x.
    PlotFunction(String),
    /// Replace the current problem.
    NextProblem,
    /// A network request finished.
    ApiCompleted(ApiResponse),
}

/// Which part of the screen changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderInstruction {
    /// Show the home screen.
    Home,
    /// Redraw the selection panes.
    Selection,
    /// Redraw the whole simulation area.
    SimulationArea,
    /// Redraw answer or custom-solve feedback.
    Feedback,
    /// Redraw the plot canvas and its status.
    Plot,
    /// Nothing visible changed.
    Nothing,
}

/// Side effect requested by dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a request to the math API.
    Request(ApiRequest),
    /// Dispatch [`Command::NextProblem`] after a delay.
    ScheduleNextProblem(Duration),
}

/// Result of dispatching a command.
#[derive(Debug)]
pub struct Transition {
    /// Next session state.
    pub state: SessionState,
    /// What to redraw.
    pub render: RenderInstruction,
    /// Effects to carry out.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn render(state: SessionState, render: RenderInstruction) -> Self {
        Self {
            state,
            render,
            effects: Vec::new(),
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Long-lived collaborators used by dispatch.
#[derive(Debug)]
pub struct SessionContext {
    /// Concept notes.
    pub concepts: ConceptLibrary,
    /// Function plotter.
    pub plotter: PlotRenderer,
    /// Source of randomness for problems.
    pub rng: StdRng,
    /// Practice loop settings.
    pub practice: PracticeConfig,
}

impl SessionContext {
    /// Create a context seeded from the operating system.
    pub fn new(concepts: ConceptLibrary, plotter: PlotRenderer, practice: PracticeConfig) -> Self {
        Self {
            concepts,
            plotter,
            rng: StdRng::from_os_rng(),
            practice,
        }
    }

    /// Replace the random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }
}

/// Apply `command` to `state`.
pub fn dispatch(mut state: SessionState, command: Command, ctx: &mut SessionContext) -> Transition {
    tracing::debug!("Dispatching {:?}", command);
    state.notice = None;

    match command {
        Command::Start => {
            state.screen = Screen::Simulation;
            Transition::render(state, RenderInstruction::Selection)
        },
        Command::ReturnHome => {
            state.screen = Screen::Home;
            Transition::render(state, RenderInstruction::Home)
        },
        Command::SelectTopic(topic) => {
            if state.topic != topic {
                state.topic = topic;
                state.clear_simulation();
            }
            Transition::render(state, RenderInstruction::Selection)
        },
        Command::SelectDifficulty(difficulty) => {
            if state.difficulty != difficulty {
                state.difficulty = difficulty;
                state.clear_simulation();
            }
            Transition::render(state, RenderInstruction::Selection)
        },
        Command::ChooseSimulation(kind) => choose_simulation(state, kind, ctx),
        Command::SubmitAnswer(answer) => submit_answer(state, answer),
        Command::SolveCustom(input) => solve_custom(state, input),
        Command::PlotFunction(expression) => plot_function(state, expression, ctx),
        Command::NextProblem => next_problem(state, ctx),
        Command::ApiCompleted(response) => api_completed(state, response, ctx),
    }
}

fn choose_simulation(
    mut state: SessionState,
    kind: SimulationType,
    ctx: &mut SessionContext,
) -> Transition {
    let (Some(topic), Some(difficulty)) = (state.topic, state.difficulty) else {
        state.notice = Some("Select a topic and difficulty first.".to_string());
        return Transition::render(state, RenderInstruction::Nothing);
    };

    state.clear_simulation();
    state.simulation = Some(kind);
    match kind {
        SimulationType::Concept => {
            state.concept_notes = ctx.concepts.notes(topic, difficulty).cloned();
        },
        SimulationType::Problem => {
            let notes = ctx.concepts.notes(topic, difficulty);
            state.problem = Some(generate_problem(&mut ctx.rng, topic, difficulty, notes));
        },
        SimulationType::Application => {},
    }
    tracing::info!("Opened {} for {} / {}", kind.label(), topic, difficulty);
    Transition::render(state, RenderInstruction::SimulationArea)
}

fn submit_answer(mut state: SessionState, answer: String) -> Transition {
    let Some(problem) = state.problem.as_ref() else {
        state.notice = Some("No problem to answer.".to_string());
        return Transition::render(state, RenderInstruction::Nothing);
    };

    let equation = problem.equation.clone().filter(|e| !e.is_empty());
    let (Some(equation), Some(operation)) = (equation, problem.operation) else {
        state.answer_feedback = Some(OPEN_QUESTION_FEEDBACK.to_string());
        return Transition::render(state, RenderInstruction::Feedback);
    };

    let id = state.allocate_request_id();
    state.pending_check = Some(id);
    state.answer_feedback = Some("Checking...".to_string());
    let request = ApiRequest {
        id,
        purpose: RequestPurpose::CheckAnswer {
            answer: answer.trim().to_string(),
        },
        operation,
        expression: equation,
    };
    Transition::render(state, RenderInstruction::Feedback).with_effect(Effect::Request(request))
}

/// Whether text looks like a math expression rather than prose.
pub fn looks_like_math(input: &str) -> bool {
    input
        .chars()
        .any(|c| c.is_ascii_digit() || "+-*/^=".contains(c) || c.eq_ignore_ascii_case(&'x'))
}

fn solve_custom(mut state: SessionState, input: String) -> Transition {
    let input = input.trim();
    if input.is_empty() {
        state.custom_result = Some(EMPTY_CUSTOM_FEEDBACK.to_string());
        return Transition::render(state, RenderInstruction::Feedback);
    }
    if !looks_like_math(input) {
        state.custom_result = Some(STATEMENT_CUSTOM_FEEDBACK.to_string());
        return Transition::render(state, RenderInstruction::Feedback);
    }

    let id = state.allocate_request_id();
    state.pending_custom = Some(id);
    state.custom_result = Some("Solving...".to_string());
    let request = ApiRequest {
        id,
        purpose: RequestPurpose::SolveCustom,
        operation: ApiOperation::Simplify,
        expression: input.to_string(),
    };
    Transition::render(state, RenderInstruction::Feedback).with_effect(Effect::Request(request))
}

fn plot_function(mut state: SessionState, expression: String, ctx: &mut SessionContext) -> Transition {
    if state.simulation != Some(SimulationType::Application) {
        state.notice = Some("Open the graph simulation to plot functions.".to_string());
        return Transition::render(state, RenderInstruction::Nothing);
    }

    let viewport = match ctx.plotter.default_viewport() {
        Ok(viewport) => viewport,
        Err(e) => {
            tracing::error!("Cannot plot: {}", e);
            state.plot.status = Some(e.to_string());
            return Transition::render(state, RenderInstruction::Plot);
        },
    };

    let outcome = ctx
        .plotter
        .render(&mut state.plot.drawing, &expression, &viewport);
    state.plot.expression = expression.trim().to_string();
    state.plot.status = Some(outcome.status.to_string());
    state.plot.outcome = Some(outcome);
    Transition::render(state, RenderInstruction::Plot)
}

fn next_problem(mut state: SessionState, ctx: &mut SessionContext) -> Transition {
    let (Some(topic), Some(difficulty)) = (state.topic, state.difficulty) else {
        return Transition::render(state, RenderInstruction::Nothing);
    };
    if state.simulation != Some(SimulationType::Problem) {
        return Transition::render(state, RenderInstruction::Nothing);
    }

    let notes = ctx.concepts.notes(topic, difficulty);
    state.problem = Some(generate_problem(&mut ctx.rng, topic, difficulty, notes));
    state.answer_feedback = None;
    state.pending_check = None;
    Transition::render(state, RenderInstruction::SimulationArea)
}

fn api_completed(
    mut state: SessionState,
    response: ApiResponse,
    ctx: &SessionContext,
) -> Transition {
    match response.purpose {
        RequestPurpose::CheckAnswer { answer } => {
            if state.pending_check != Some(response.id) {
                tracing::debug!("Dropping stale answer check {}", response.id);
                return Transition::render(state, RenderInstruction::Nothing);
            }
            state.pending_check = None;
            match response.result {
                Ok(expected) if answers_match(&answer, &expected) => {
                    state.answer_feedback = Some(CORRECT_FEEDBACK.to_string());
                    Transition::render(state, RenderInstruction::Feedback).with_effect(
                        Effect::ScheduleNextProblem(ctx.practice.next_problem_delay()),
                    )
                },
                Ok(expected) => {
                    state.answer_feedback =
                        Some(format!("❌ Try again. Correct answer: {}", expected));
                    Transition::render(state, RenderInstruction::Feedback)
                },
                Err(e) => {
                    tracing::warn!("Answer check failed: {}", e);
                    state.answer_feedback = Some(API_ERROR_FEEDBACK.to_string());
                    Transition::render(state, RenderInstruction::Feedback)
                },
            }
        },
        RequestPurpose::SolveCustom => {
            if state.pending_custom != Some(response.id) {
                tracing::debug!("Dropping stale custom solve {}", response.id);
                return Transition::render(state, RenderInstruction::Nothing);
            }
            state.pending_custom = None;
            state.custom_result = Some(match response.result {
                Ok(result) => format!("Result: {}", result),
                Err(e) => {
                    tracing::warn!("Custom solve failed: {}", e);
                    API_ERROR_FEEDBACK.to_string()
                },
            });
            Transition::render(state, RenderInstruction::Feedback)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_detection() {
        assert!(looks_like_math("2+2"));
        assert!(looks_like_math("X"));
        assert!(!looks_like_math("why is the sky blue"));
    }

    #[test]
    fn request_ids_increase() {
        let mut state = SessionState::new();
        let a = state.allocate_request_id();
        let b = state.allocate_request_id();
        assert!(b > a);
    }
}
