//! Topic and difficulty catalogue.

use std::fmt;

/// A practice topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Differentiation of functions of one variable.
    CalculusDerivatives,
    /// Matrices and linear systems.
    LinearAlgebra,
    /// Ordinary differential equations.
    DifferentialEquations,
    /// Elementary probability.
    Probability,
}

impl Topic {
    /// All topics in menu order.
    pub const ALL: [Topic; 4] = [
        Topic::CalculusDerivatives,
        Topic::LinearAlgebra,
        Topic::DifferentialEquations,
        Topic::Probability,
    ];

    /// Stable identifier used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Topic::CalculusDerivatives => "calculus-derivatives",
            Topic::LinearAlgebra => "linear-algebra",
            Topic::DifferentialEquations => "differential-equations",
            Topic::Probability => "probability-basics",
        }
    }

    /// Key of this topic in the concept notes.
    pub fn concept_key(self) -> &'static str {
        match self {
            Topic::CalculusDerivatives => "Calculus - Derivatives",
            Topic::LinearAlgebra => "Linear Algebra",
            Topic::DifferentialEquations => "Differential Equations",
            Topic::Probability => "Probability",
        }
    }

    /// Look up a topic by slug or concept key.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.slug() == name || t.concept_key() == name)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.concept_key())
    }
}

/// A difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    /// Level 1.
    Foundations,
    /// Level 2.
    CoreConcepts,
    /// Level 3.
    Applied,
    /// Level 4.
    Advanced,
    /// Level 5.
    PreUniversity,
    /// Level 6.
    Engineering,
}

impl Difficulty {
    /// All difficulties in menu order.
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Foundations,
        Difficulty::CoreConcepts,
        Difficulty::Applied,
        Difficulty::Advanced,
        Difficulty::PreUniversity,
        Difficulty::Engineering,
    ];

    /// Stable identifier used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Difficulty::Foundations => "foundations",
            Difficulty::CoreConcepts => "core-concepts",
            Difficulty::Applied => "applied",
            Difficulty::Advanced => "advanced",
            Difficulty::PreUniversity => "pre-university",
            Difficulty::Engineering => "engineering",
        }
    }

    /// Key of this difficulty in the concept notes.
    pub fn concept_key(self) -> &'static str {
        match self {
            Difficulty::Foundations => "foundation",
            Difficulty::CoreConcepts => "core concept",
            Difficulty::Applied => "applied",
            Difficulty::Advanced => "advanced",
            Difficulty::PreUniversity => "pre-university",
            Difficulty::Engineering => "engineering",
        }
    }

    /// Numeric level, 1 through 6.
    pub fn level(self) -> u32 {
        match self {
            Difficulty::Foundations => 1,
            Difficulty::CoreConcepts => 2,
            Difficulty::Applied => 3,
            Difficulty::Advanced => 4,
            Difficulty::PreUniversity => 5,
            Difficulty::Engineering => 6,
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Foundations => "Foundations",
            Difficulty::CoreConcepts => "Core Concepts",
            Difficulty::Applied => "Applied",
            Difficulty::Advanced => "Advanced",
            Difficulty::PreUniversity => "Pre-University",
            Difficulty::Engineering => "Engineering",
        }
    }

    /// Look up a difficulty by slug or concept key.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.slug() == name || d.concept_key() == name)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What to do with the selected topic and difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationType {
    /// Read the concept notes.
    Concept,
    /// Practise generated problems.
    Problem,
    /// Plot functions.
    Application,
}

impl SimulationType {
    /// All simulation types in menu order.
    pub const ALL: [SimulationType; 3] = [
        SimulationType::Concept,
        SimulationType::Problem,
        SimulationType::Application,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            SimulationType::Concept => "Concept Notes",
            SimulationType::Problem => "Problem Solving",
            SimulationType::Application => "Graph a Function",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_both_ways() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_name(topic.slug()), Some(topic));
            assert_eq!(Topic::from_name(topic.concept_key()), Some(topic));
        }
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_name(difficulty.slug()), Some(difficulty));
            assert_eq!(Difficulty::from_name(difficulty.concept_key()), Some(difficulty));
        }
        assert_eq!(Topic::from_name("geometry"), None);
    }

    #[test]
    fn levels_are_ordered() {
        let levels: Vec<u32> = Difficulty::ALL.iter().map(|d| d.level()).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
    }
}
