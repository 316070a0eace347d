//! Practice problem generation.
//!
//! Problems are built from templates filled with random coefficients. Only
//! "direct" problems carry an expression and an API operation, so only they
//! can be checked automatically; the other kinds are open-ended questions.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::api::ApiOperation;
use crate::concepts::ConceptNotes;
use crate::topic::{Difficulty, Topic};

/// Denominators used by probability expressions.
const PROBABILITY_DENOMINATORS: [u32; 7] = [2, 4, 6, 8, 10, 12, 20];

/// Shape of a generated problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// Compute something; checked against the API.
    Direct,
    /// Word problem.
    Statement,
    /// State and explain a theorem from the notes.
    Theorem,
    /// Explain a concept in your own words.
    Concept,
}

/// Problem kinds that may be drawn at a difficulty level.
pub fn kinds_for_level(level: u32) -> &'static [ProblemKind] {
    use ProblemKind::*;
    match level {
        0 | 1 => &[Direct, Concept],
        2 => &[Direct, Concept, Theorem],
        _ => &[Direct, Statement, Theorem, Concept],
    }
}

/// A generated practice problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Topic it was generated for.
    pub topic: Topic,
    /// Difficulty it was generated for.
    pub difficulty: Difficulty,
    /// Kind of problem.
    pub kind: ProblemKind,
    /// Question shown to the learner.
    pub text: String,
    /// Expression sent to the API, or reference material for open questions.
    pub equation: Option<String>,
    /// API operation that produces the expected answer.
    pub operation: Option<ApiOperation>,
}

impl Problem {
    /// Whether the answer can be checked automatically.
    pub fn is_checkable(&self) -> bool {
        self.operation.is_some() && self.equation.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Random polynomial such as `3*x^2 + 2*x + 1`: coefficients in 1..=5 for
/// each power from `degree` down to 1, then a constant in 0..=9.
pub fn random_polynomial<R: Rng + ?Sized>(rng: &mut R, degree: u32) -> String {
    let mut terms: Vec<String> = (1..=degree)
        .rev()
        .map(|power| format!("{}*x^{}", rng.random_range(1..=5), power))
        .collect();
    terms.push(rng.random_range(0..=9).to_string());
    terms.join(" + ")
}

/// Random square matrix such as `[[1,2],[3,4]]` with entries in 1..=9.
pub fn random_matrix<R: Rng + ?Sized>(rng: &mut R, size: usize) -> String {
    let rows: Vec<String> = (0..size)
        .map(|_| {
            let row: Vec<String> = (0..size)
                .map(|_| rng.random_range(1..=9).to_string())
                .collect();
            format!("[{}]", row.join(","))
        })
        .collect();
    format!("[{}]", rows.join(","))
}

/// Random first-order ODE. Levels above 3 use a polynomial right-hand side.
pub fn random_differential_equation<R: Rng + ?Sized>(rng: &mut R, level: u32) -> String {
    if level > 3 {
        return format!("dy/dx={}", random_polynomial(rng, level.min(3)));
    }
    let coeff = rng.random_range(1..=5);
    let power = rng.random_range(1..=2);
    format!("dy/dx={}*x^{}", coeff, power)
}

/// Random probability expression built from unit fractions.
pub fn random_probability_expr<R: Rng + ?Sized>(rng: &mut R, level: u32) -> String {
    let mut denominator = || {
        *PROBABILITY_DENOMINATORS
            .choose(rng)
            .unwrap_or(&PROBABILITY_DENOMINATORS[0])
    };
    let d1 = denominator();
    let d2 = denominator();
    if level > 2 {
        let d3 = denominator();
        return format!("(1/{})+((1/{})*1/{})", d1, d2, d3);
    }
    let op = if rng.random_bool(0.5) { '+' } else { '*' };
    format!("(1/{}){}(1/{})", d1, op, d2)
}

/// Generate a problem for `topic` at `difficulty`.
///
/// `notes` supplies theorems and definitions for theorem and concept
/// questions. A theorem question with no theorems available becomes a concept
/// question.
pub fn generate_problem<R: Rng + ?Sized>(
    rng: &mut R,
    topic: Topic,
    difficulty: Difficulty,
    notes: Option<&ConceptNotes>,
) -> Problem {
    let level = difficulty.level();
    let kinds = kinds_for_level(level);
    let mut kind = kinds[rng.random_range(0..kinds.len())];

    let theorem = if kind == ProblemKind::Theorem {
        notes.and_then(|n| n.theorems.choose(rng))
    } else {
        None
    };
    if kind == ProblemKind::Theorem && theorem.is_none() {
        kind = ProblemKind::Concept;
    }

    let mut problem = Problem {
        topic,
        difficulty,
        kind,
        text: String::new(),
        equation: None,
        operation: None,
    };

    match kind {
        ProblemKind::Direct => fill_direct(rng, &mut problem, level),
        ProblemKind::Statement => {
            let (text, equation) = statement_problem(topic);
            problem.text = text.to_string();
            problem.equation = equation.map(str::to_string);
        },
        ProblemKind::Theorem => {
            if let Some(theorem) = theorem {
                problem.text = format!(
                    "State and explain the following theorem: {}. Give an example.",
                    theorem.name()
                );
                problem.equation = theorem.statement().map(str::to_string);
            }
        },
        ProblemKind::Concept => {
            problem.text = concept_question(topic).to_string();
            problem.equation = notes.and_then(|n| n.definition.clone());
        },
    }

    tracing::debug!("Generated {:?} problem for {} / {}", kind, topic, difficulty);
    problem
}

fn fill_direct<R: Rng + ?Sized>(rng: &mut R, problem: &mut Problem, level: u32) {
    let (text, equation, operation) = match problem.topic {
        Topic::CalculusDerivatives => {
            let equation = random_polynomial(rng, level);
            (
                format!("Find the derivative of f(x) = {}", equation),
                equation,
                ApiOperation::Derive,
            )
        },
        Topic::LinearAlgebra => {
            let size = (2 + level as usize / 2).min(4);
            let m1 = random_matrix(rng, size);
            let m2 = random_matrix(rng, size);
            let op = if level > 2 { '*' } else { '+' };
            (
                format!("Calculate: {} {} {}", m1, op, m2),
                format!("{}{}{}", m1, op, m2),
                ApiOperation::Simplify,
            )
        },
        Topic::DifferentialEquations => {
            let equation = random_differential_equation(rng, level);
            (
                format!("Solve the differential equation: {}", equation),
                equation,
                ApiOperation::Solve,
            )
        },
        Topic::Probability => {
            let equation = random_probability_expr(rng, level);
            (
                format!("Simplify the probability expression: {}", equation),
                equation,
                ApiOperation::Simplify,
            )
        },
    };
    problem.text = text;
    problem.equation = Some(equation);
    problem.operation = Some(operation);
}

fn statement_problem(topic: Topic) -> (&'static str, Option<&'static str>) {
    match topic {
        Topic::CalculusDerivatives => (
            "A ball is thrown upwards and its height at time t is given by h(t) = 20t - 5t^2. \
             What is the velocity at t = 2 seconds?",
            Some("20 - 10*2"),
        ),
        Topic::LinearAlgebra => (
            "A company produces two products using two resources. Write a system of equations \
             to model the allocation if product A uses 2 units of resource 1 and 1 of resource 2, \
             product B uses 1 of each, and total resources are 100 and 80.",
            None,
        ),
        Topic::DifferentialEquations => (
            "A tank contains 100 liters of saltwater with 10 kg of salt. Pure water flows in at \
             5 L/min and the mixture flows out at the same rate. Write and solve the differential \
             equation for the amount of salt.",
            None,
        ),
        Topic::Probability => (
            "A box contains 5 red and 7 blue balls. Two balls are drawn at random without \
             replacement. What is the probability both are red?",
            None,
        ),
    }
}

fn concept_question(topic: Topic) -> &'static str {
    match topic {
        Topic::CalculusDerivatives => {
            "Explain in your own words: What does the derivative of a function represent?"
        },
        Topic::LinearAlgebra => "What is a matrix? Give a real-world example.",
        Topic::DifferentialEquations => {
            "What is a differential equation? Give an example from real life."
        },
        Topic::Probability => "What is probability? Give a real-world example.",
    }
}
