//! Single-line text input.

use unicode_width::UnicodeWidthStr;

/// Which field a text input feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    /// Answer to the current problem.
    Answer,
    /// Expression for the custom solver.
    Custom,
    /// Function to plot.
    Plot,
}

impl InputTarget {
    /// Prompt shown while editing.
    pub fn prompt(self) -> &'static str {
        match self {
            InputTarget::Answer => "Answer",
            InputTarget::Custom => "Solve",
            InputTarget::Plot => "y =",
        }
    }
}

/// Text input state.
#[derive(Debug, Default)]
pub struct TextInput {
    target: Option<InputTarget>,
    buffer: String,
}

impl TextInput {
    /// Create an inactive input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Field being edited, if any.
    pub fn target(&self) -> Option<InputTarget> {
        self.target
    }

    /// Check if input is active.
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Current text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Display width of the current text, for cursor placement.
    pub fn display_width(&self) -> u16 {
        self.buffer.width().min(u16::MAX as usize) as u16
    }

    /// Start editing `target`, optionally pre-filled.
    pub fn start(&mut self, target: InputTarget, initial: &str) {
        self.target = Some(target);
        self.buffer = initial.to_string();
    }

    /// Add a character.
    pub fn input(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Finish editing and return the field and its text.
    pub fn submit(&mut self) -> Option<(InputTarget, String)> {
        let target = self.target.take()?;
        Some((target, std::mem::take(&mut self.buffer)))
    }

    /// Abandon editing.
    pub fn cancel(&mut self) {
        self.target = None;
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_returns_text_and_deactivates() {
        let mut input = TextInput::new();
        input.start(InputTarget::Plot, "x^");
        input.input('2');
        input.input('!');
        input.backspace();
        assert_eq!(input.submit(), Some((InputTarget::Plot, "x^2".to_string())));
        assert!(!input.is_active());
        assert_eq!(input.submit(), None);
    }

    #[test]
    fn width_counts_wide_characters() {
        let mut input = TextInput::new();
        input.start(InputTarget::Answer, "π√");
        assert_eq!(input.display_width(), 2);
        input.cancel();
        assert_eq!(input.buffer(), "");
    }
}
