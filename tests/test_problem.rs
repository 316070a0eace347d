use mathsim::api::ApiOperation;
use mathsim::concepts::ConceptLibrary;
use mathsim::problem::{
    generate_problem, random_differential_equation, random_probability_expr, ProblemKind,
};
use mathsim::topic::{Difficulty, Topic};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn direct_problems_use_topic_operation() {
    let library = ConceptLibrary::bundled().unwrap();
    let mut rng = StdRng::seed_from_u64(21);

    for topic in Topic::ALL {
        for difficulty in Difficulty::ALL {
            for _ in 0..20 {
                let notes = library.notes(topic, difficulty);
                let problem = generate_problem(&mut rng, topic, difficulty, notes);
                assert_eq!(problem.topic, topic);
                assert!(!problem.text.is_empty());
                if problem.kind != ProblemKind::Direct {
                    assert!(problem.operation.is_none());
                    continue;
                }
                let expected = match topic {
                    Topic::CalculusDerivatives => ApiOperation::Derive,
                    Topic::DifferentialEquations => ApiOperation::Solve,
                    Topic::LinearAlgebra | Topic::Probability => ApiOperation::Simplify,
                };
                assert_eq!(problem.operation, Some(expected));
                let equation = problem.equation.as_deref().unwrap();
                assert!(problem.text.contains(equation) || topic == Topic::LinearAlgebra);
            }
        }
    }
}

#[test]
fn matrix_size_grows_with_level() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut seen = 0;
    while seen < 10 {
        let problem = generate_problem(&mut rng, Topic::LinearAlgebra, Difficulty::Engineering, None);
        if problem.kind != ProblemKind::Direct {
            continue;
        }
        seen += 1;
        let equation = problem.equation.unwrap();
        // level 6 caps at 4x4 and multiplies
        assert!(equation.contains("]*["));
        assert_eq!(equation.matches('[').count(), 10);
    }
}

#[test]
fn theorem_questions_quote_the_notes() {
    let library = ConceptLibrary::bundled().unwrap();
    let notes = library
        .notes(Topic::CalculusDerivatives, Difficulty::CoreConcepts)
        .unwrap();
    let mut rng = StdRng::seed_from_u64(9);

    let problem = (0..200)
        .map(|_| {
            generate_problem(
                &mut rng,
                Topic::CalculusDerivatives,
                Difficulty::CoreConcepts,
                Some(notes),
            )
        })
        .find(|p| p.kind == ProblemKind::Theorem)
        .expect("a theorem question");
    assert!(problem.text.starts_with("State and explain the following theorem: "));
    assert!(notes.theorems.iter().any(|t| problem.text.contains(t.name())));
    assert!(!problem.is_checkable());
}

#[test]
fn expression_generators_by_level() {
    let mut rng = StdRng::seed_from_u64(2);
    let low = random_differential_equation(&mut rng, 1);
    assert!(low.starts_with("dy/dx="));
    assert!(!low.contains(" + "));
    let high = random_differential_equation(&mut rng, 5);
    assert_eq!(high.matches(" + ").count(), 3);

    let simple = random_probability_expr(&mut rng, 1);
    assert_eq!(simple.matches("(1/").count(), 2);
    let compound = random_probability_expr(&mut rng, 4);
    assert_eq!(compound.matches("(1/").count(), 2);
    assert_eq!(compound.matches("1/").count(), 3);
}
