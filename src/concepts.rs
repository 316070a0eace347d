//! Concept notes library.
//!
//! Notes are a JSON object keyed by topic, then by difficulty. Every field of
//! a note is optional, and theorems and applications may be plain strings or
//! structured objects. A default library is compiled into the binary.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MathSimError, Result};
use crate::topic::{Difficulty, Topic};

const BUNDLED_CONCEPTS: &str = include_str!("../assets/concepts.json");

/// A theorem, either a bare statement or a named one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Theorem {
    /// Named theorem with statement and optional example.
    Named {
        /// Theorem name.
        name: String,
        /// Theorem statement; may be left out.
        #[serde(default)]
        statement: String,
        /// Worked example.
        #[serde(default)]
        example: Option<String>,
    },
    /// Free-form text.
    Plain(String),
}

impl Theorem {
    /// Name of the theorem, or the full text for plain theorems.
    pub fn name(&self) -> &str {
        match self {
            Theorem::Named { name, .. } => name,
            Theorem::Plain(text) => text,
        }
    }

    /// The statement, if the theorem is structured.
    pub fn statement(&self) -> Option<&str> {
        match self {
            Theorem::Named { statement, .. } if !statement.is_empty() => Some(statement),
            _ => None,
        }
    }

    fn render(&self) -> String {
        let Theorem::Named { name, example, .. } = self else {
            return self.name().to_string();
        };
        let mut text = match self.statement() {
            Some(statement) => format!("{}: {}", name, statement),
            None => name.clone(),
        };
        if let Some(example) = example {
            text.push_str("\nExample: ");
            text.push_str(example);
        }
        text
    }
}

/// A single application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Application {
    /// Named application with explanation.
    Named {
        /// Application name.
        name: String,
        /// How the concept applies.
        explanation: String,
    },
    /// Free-form text.
    Plain(String),
}

impl Application {
    fn render(&self) -> String {
        match self {
            Application::Named { name, explanation } => format!("{}: {}", name, explanation),
            Application::Plain(text) => text.clone(),
        }
    }
}

/// Applications are either a list or a single sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Applications {
    /// List of applications.
    Many(Vec<Application>),
    /// One free-form sentence.
    One(String),
}

/// Notes for one topic at one difficulty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptNotes {
    /// Core definition.
    pub definition: Option<String>,
    /// Theorems.
    pub theorems: Vec<Theorem>,
    /// Postulates or axioms.
    pub postulates: Vec<String>,
    /// Classification.
    pub types: Vec<String>,
    /// Key formulas.
    pub formulas: Vec<String>,
    /// Worked example.
    pub example: Option<String>,
    /// Applications.
    pub applications: Option<Applications>,
}

/// Body of a rendered section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// Running text.
    Paragraph(String),
    /// Bullet items.
    Items(Vec<String>),
}

/// A titled section of rendered notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSection {
    /// Section heading.
    pub heading: &'static str,
    /// Section content.
    pub body: SectionBody,
}

impl ConceptNotes {
    /// Sections in display order. The definition is always present; other
    /// sections only when they have content.
    pub fn sections(&self) -> Vec<NoteSection> {
        let mut sections = vec![NoteSection {
            heading: "Definition",
            body: SectionBody::Paragraph(self.definition.clone().unwrap_or_default()),
        }];

        let mut push_items = |heading: &'static str, items: Vec<String>| {
            if !items.is_empty() {
                sections.push(NoteSection {
                    heading,
                    body: SectionBody::Items(items),
                });
            }
        };
        push_items("Theorems", self.theorems.iter().map(Theorem::render).collect());
        push_items("Postulates", self.postulates.clone());
        push_items("Types", self.types.clone());
        push_items("Key Formulas", self.formulas.clone());

        if let Some(ref example) = self.example {
            sections.push(NoteSection {
                heading: "Example",
                body: SectionBody::Paragraph(example.clone()),
            });
        }

        let applications = match &self.applications {
            Some(Applications::Many(list)) => list.iter().map(Application::render).collect(),
            Some(Applications::One(text)) => vec![text.clone()],
            None => Vec::new(),
        };
        if !applications.is_empty() {
            sections.push(NoteSection {
                heading: "Applications",
                body: SectionBody::Items(applications),
            });
        }

        sections
    }
}

/// All concept notes, keyed by topic then difficulty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptLibrary {
    topics: BTreeMap<String, BTreeMap<String, ConceptNotes>>,
}

impl ConceptLibrary {
    /// The library compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CONCEPTS)
    }

    /// Parse a library from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a library from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MathSimError::file_open(path.to_path_buf(), e))?;
        let library = Self::from_json(&content)?;
        tracing::info!(
            "Loaded concept notes for {} topics from {}",
            library.topics.len(),
            path.display()
        );
        Ok(library)
    }

    /// Notes by raw keys.
    pub fn get(&self, topic_key: &str, difficulty_key: &str) -> Option<&ConceptNotes> {
        self.topics.get(topic_key)?.get(difficulty_key)
    }

    /// Notes for a topic at a difficulty.
    pub fn notes(&self, topic: Topic, difficulty: Difficulty) -> Option<&ConceptNotes> {
        self.get(topic.concept_key(), difficulty.concept_key())
    }

    /// Topic keys present in the library.
    pub fn topic_keys(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    /// Difficulty keys present for a topic.
    pub fn difficulty_keys(&self, topic_key: &str) -> Vec<&str> {
        self.topics
            .get(topic_key)
            .map(|levels| levels.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_library_covers_every_topic() {
        let library = ConceptLibrary::bundled().unwrap();
        for topic in Topic::ALL {
            assert!(
                library.notes(topic, Difficulty::Foundations).is_some(),
                "missing foundation notes for {}",
                topic
            );
        }
    }

    #[test]
    fn mixed_theorem_shapes_parse() {
        let json = r#"{"T": {"foundation": {
            "theorems": ["Plain one", {"name": "Named", "statement": "S"}],
            "applications": "Just one"
        }}}"#;
        let library = ConceptLibrary::from_json(json).unwrap();
        let notes = library.get("T", "foundation").unwrap();
        assert_eq!(notes.theorems[0].name(), "Plain one");
        assert_eq!(notes.theorems[1].statement(), Some("S"));
        assert_eq!(notes.applications, Some(Applications::One("Just one".into())));
    }

    #[test]
    fn theorem_without_statement_still_loads() {
        let json = r#"{"T": {"foundation": {
            "theorems": [{"name": "Bayes", "example": "P(A|B)"}, {"name": "Bare"}]
        }}}"#;
        let library = ConceptLibrary::from_json(json).unwrap();
        let notes = library.get("T", "foundation").unwrap();
        assert_eq!(notes.theorems[0].name(), "Bayes");
        assert_eq!(notes.theorems[0].statement(), None);
        assert_eq!(
            notes.sections()[1].body,
            SectionBody::Items(vec!["Bayes\nExample: P(A|B)".into(), "Bare".into()])
        );
    }

    #[test]
    fn sections_follow_display_order() {
        let notes = ConceptNotes {
            definition: Some("D".into()),
            formulas: vec!["F".into()],
            example: Some("E".into()),
            theorems: vec![Theorem::Named {
                name: "N".into(),
                statement: "S".into(),
                example: Some("X".into()),
            }],
            applications: Some(Applications::Many(vec![Application::Named {
                name: "A".into(),
                explanation: "B".into(),
            }])),
            ..ConceptNotes::default()
        };
        let headings: Vec<&str> = notes.sections().iter().map(|s| s.heading).collect();
        assert_eq!(
            headings,
            vec!["Definition", "Theorems", "Key Formulas", "Example", "Applications"]
        );
        assert_eq!(
            notes.sections()[1].body,
            SectionBody::Items(vec!["N: S\nExample: X".into()])
        );
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            ConceptLibrary::from_json("{not json"),
            Err(MathSimError::ConceptFormat(_))
        ));
    }
}
