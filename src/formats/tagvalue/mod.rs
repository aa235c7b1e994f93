//! The `Tag: value` text serialization.
//!
//! Split the way the pipeline runs: [`lexer`] turns raw text into a token
//! stream, [`parser`] folds the stream into a [`Document`] with a
//! record-grouping state machine, and [`writer`] serializes a document back
//! out in validation-walk order.

pub mod lexer;
pub mod parser;
pub mod writer;

use std::io::Read;

use crate::errors::SpdxError;
use crate::models::document::Document;

pub use parser::parse_str;
pub use writer::write_document;

/// Parse a tag/value document from any reader.
pub fn parse<R: Read>(input: &mut R) -> Result<Document, SpdxError> {
    let mut content = String::new();
    input
        .read_to_string(&mut content)
        .map_err(|e| SpdxError::Io(e, "Failed to read tag/value input".to_string()))?;
    parse_str(&content)
}
