//! Error types for MathSim.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for MathSim operations.
pub type Result<T> = std::result::Result<T, MathSimError>;

/// Errors that can occur in MathSim.
#[derive(Debug, Error)]
pub enum MathSimError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Concept notes are not valid JSON of the expected shape.
    #[error("Invalid concept notes: {0}")]
    ConceptFormat(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("Invalid configuration in {path}: {message}")]
    Config {
        /// Configuration file.
        path: PathBuf,
        /// Parse or validation message.
        message: String,
    },

    /// Viewport violates its invariants.
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    /// Expression could not be compiled.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Remote math API request failed.
    #[error("API request failed: {0}")]
    Api(String),

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MathSimError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create a Config error.
    pub fn config(path: PathBuf, message: impl Into<String>) -> Self {
        Self::Config {
            path,
            message: message.into(),
        }
    }

    /// Create an InvalidExpression error.
    pub fn invalid_expression(message: impl Into<String>) -> Self {
        Self::InvalidExpression(message.into())
    }

    /// Create an Api error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }
}

impl From<ureq::Error> for MathSimError {
    fn from(err: ureq::Error) -> Self {
        Self::Api(err.to_string())
    }
}
