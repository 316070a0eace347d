//! Clipboard integration.

use crate::error::Result;
use crate::session::SessionState;
use crate::topic::SimulationType;
use arboard::Clipboard;

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Text worth copying from the active simulation: the problem and its
/// feedback, the plotted expression, or the concept definition.
pub fn copyable_text(session: &SessionState) -> Option<String> {
    match session.simulation? {
        SimulationType::Problem => {
            let problem = session.problem.as_ref()?;
            let mut text = problem.text.clone();
            if let Some(ref result) = session.custom_result {
                text.push('\n');
                text.push_str(result);
            }
            Some(text)
        },
        SimulationType::Application => {
            let expression = &session.plot.expression;
            (!expression.is_empty()).then(|| format!("y = {}", expression))
        },
        SimulationType::Concept => session
            .concept_notes
            .as_ref()
            .and_then(|notes| notes.definition.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_copy_without_simulation() {
        assert_eq!(copyable_text(&SessionState::new()), None);
    }

    #[test]
    fn plot_expression_is_copied() {
        let mut session = SessionState::new();
        session.simulation = Some(SimulationType::Application);
        assert_eq!(copyable_text(&session), None);
        session.plot.expression = "x^2".into();
        assert_eq!(copyable_text(&session), Some("y = x^2".into()));
    }
}
