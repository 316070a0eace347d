use std::io::Write;

use mathsim::concepts::{ConceptLibrary, SectionBody};
use mathsim::topic::{Difficulty, Topic};
use mathsim::MathSimError;
use tempfile::NamedTempFile;

const CUSTOM_NOTES: &str = r#"{
    "Probability": {
        "applied": {
            "definition": "Conditional probability.",
            "postulates": ["P(A) >= 0"],
            "types": ["Discrete", "Continuous"],
            "applications": [
                "Insurance",
                {"name": "Medicine", "explanation": "Test accuracy"}
            ]
        }
    }
}"#;

#[test]
fn load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CUSTOM_NOTES.as_bytes()).unwrap();

    let library = ConceptLibrary::load(file.path()).unwrap();
    assert_eq!(library.topic_keys().collect::<Vec<_>>(), vec!["Probability"]);
    assert_eq!(library.difficulty_keys("Probability"), vec!["applied"]);
    assert!(library.notes(Topic::Probability, Difficulty::Foundations).is_none());

    let notes = library.notes(Topic::Probability, Difficulty::Applied).unwrap();
    let sections = notes.sections();
    let headings: Vec<&str> = sections.iter().map(|s| s.heading).collect();
    assert_eq!(
        headings,
        vec!["Definition", "Postulates", "Types", "Applications"]
    );
    assert_eq!(
        sections[3].body,
        SectionBody::Items(vec!["Insurance".into(), "Medicine: Test accuracy".into()])
    );
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = ConceptLibrary::load(&path).unwrap_err();
    assert!(matches!(err, MathSimError::FileOpen { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{\"Probability\": [1, 2]}").unwrap();
    assert!(matches!(
        ConceptLibrary::load(file.path()),
        Err(MathSimError::ConceptFormat(_))
    ));
}

#[test]
fn definition_section_is_always_present() {
    let library = ConceptLibrary::from_json(r#"{"Probability": {"foundation": {}}}"#).unwrap();
    let notes = library
        .notes(Topic::Probability, Difficulty::Foundations)
        .unwrap();
    let sections = notes.sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].heading, "Definition");
    assert_eq!(sections[0].body, SectionBody::Paragraph(String::new()));
}

#[test]
fn bundled_notes_use_catalogue_keys() {
    let library = ConceptLibrary::bundled().unwrap();
    for key in library.topic_keys() {
        assert!(Topic::from_name(key).is_some(), "unknown topic key {}", key);
        for level in library.difficulty_keys(key) {
            assert!(
                Difficulty::from_name(level).is_some(),
                "unknown difficulty key {}",
                level
            );
        }
    }
}
