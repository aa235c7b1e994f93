//! Defines the custom error types for the toolkit.
//!
//! This uses `thiserror` as specified in `Cargo.toml` for clean,
//! boilerplate-free error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpdxError {
    #[error("I/O Error: {1} - {0}")]
    Io(#[source] std::io::Error, String),

    /// Malformed token or unterminated `<text>` block. Always fatal to the
    /// parse; no partial Document is ever returned.
    #[error("Lexical error at line {line}: {message}")]
    Lexical { line: usize, message: String },

    /// A tag appeared outside any section that accepts it, or a mandatory
    /// section-opening tag is missing.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Writer invoked with `validate=true` against an invalid Document.
    /// Carries the full violation list so the caller can act on all of
    /// them at once.
    #[error("Document is invalid: {}", .0.join("; "))]
    InvalidDocument(Vec<String>),

    #[error("RDF Error: {0}")]
    Rdf(String),

    #[error("Serialization Error: {0}")]
    Serialization(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Unsupported Format: {0}")]
    UnsupportedFormat(String),
}

impl SpdxError {
    pub fn lexical(line: usize, message: impl Into<String>) -> Self {
        SpdxError::Lexical {
            line,
            message: message.into(),
        }
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        SpdxError::Parse {
            line,
            message: message.into(),
        }
    }
}

// Implement From<io::Error> for easier error handling
impl From<std::io::Error> for SpdxError {
    fn from(err: std::io::Error) -> Self {
        SpdxError::Io(err, "IO operation failed".to_string())
    }
}
