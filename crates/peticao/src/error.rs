//! Error types for the peticao library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for peticao operations.
///
/// A field that cannot be found in the source text is not an error: the
/// extractor substitutes the field's default value and carries on.
#[derive(Debug, Error)]
pub enum PeticaoError {
    /// The source-text provider could not produce text.
    #[error("Source unreadable '{path}': {message}")]
    SourceUnreadable { path: PathBuf, message: String },

    /// The template provider could not produce paragraphs.
    #[error("Template unreadable '{path}': {message}")]
    TemplateUnreadable { path: PathBuf, message: String },

    /// The merged field map lacks a key the substitution requires.
    #[error("Missing required field '{0}' for substitution")]
    SubstitutionPrecondition(String),

    /// The document assembler could not produce the output document.
    #[error("Assembly failed: {0}")]
    AssemblyFailure(String),

    /// A workflow transition was attempted from the wrong stage or without
    /// the predecessor stage's artifact.
    #[error("Invalid transition from step {from} to step {to}: {reason}")]
    InvalidTransition { from: u8, to: u8, reason: String },

    /// Error saving or loading a workflow session.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for peticao operations.
pub type Result<T> = std::result::Result<T, PeticaoError>;
