//! Format detection and definition module.
//!
//! Provides types and utilities for detecting and handling the two SPDX
//! serializations this toolkit speaks (tag/value text and RDF/XML).

pub mod rdf;
pub mod tagvalue;

use crate::errors::SpdxError;
use std::path::Path;

/// Supported SPDX serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Line-oriented `Tag: value` text format
    TagValue,
    /// RDF/XML graph format
    Rdf,
}

impl Format {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Result<Self, SpdxError> {
        let extension = path.extension().and_then(|s| s.to_str()).ok_or_else(|| {
            SpdxError::InvalidInput(format!(
                "Could not determine file extension for: {}",
                path.display()
            ))
        })?;

        match extension.to_lowercase().as_str() {
            "spdx" | "tv" | "tag" => Ok(Format::TagValue),
            "rdf" | "xml" => Ok(Format::Rdf),
            ext => Err(SpdxError::UnsupportedFormat(format!(
                ".{}. Supported formats: .spdx, .tv, .tag, .rdf, .xml",
                ext
            ))),
        }
    }

    /// Detect format from file content
    pub fn from_content(content: &[u8]) -> Result<Self, SpdxError> {
        let first = content
            .iter()
            .copied()
            .find(|b| !b.is_ascii_whitespace());

        match first {
            None => Err(SpdxError::InvalidInput("Empty file content".to_string())),
            Some(b'<') => Ok(Format::Rdf),
            Some(_) => Ok(Format::TagValue),
        }
    }

    /// Get the typical file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Format::TagValue => "spdx",
            Format::Rdf => "rdf",
        }
    }
}
