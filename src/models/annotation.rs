//! Auxiliary records tied to other entities by SPDX identifier reference:
//! reviews, annotations, relationships, and snippets.
//!
//! A reference that does not resolve within the document is reported by the
//! validation engine, never rejected at parse time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::errors::SpdxError;
use crate::models::document::Creator;
use crate::models::license::LicenseField;

/// A (deprecated in later SPDX versions, still round-tripped) review record.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub reviewer: Creator,
    pub date: Option<DateTime<Utc>>,
    pub comment: Option<String>,
}

impl Review {
    pub fn new(reviewer: Creator) -> Self {
        Self {
            reviewer,
            date: None,
            comment: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationType {
    Review,
    Other,
}

impl AnnotationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationType::Review => "REVIEW",
            AnnotationType::Other => "OTHER",
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnotationType {
    type Err = SpdxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REVIEW" => Ok(AnnotationType::Review),
            "OTHER" => Ok(AnnotationType::Other),
            other => Err(SpdxError::InvalidInput(format!(
                "Unknown annotation type: '{}'",
                other
            ))),
        }
    }
}

/// A comment attached to an SPDX element by an annotator.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub annotator: Creator,
    pub date: Option<DateTime<Utc>>,
    pub comment: Option<String>,
    pub annotation_type: Option<AnnotationType>,
    /// SPDX identifier of the annotated element.
    pub spdx_id_ref: Option<String>,
}

impl Annotation {
    pub fn new(annotator: Creator) -> Self {
        Self {
            annotator,
            date: None,
            comment: None,
            annotation_type: None,
            spdx_id_ref: None,
        }
    }
}

/// A typed edge between two SPDX elements,
/// e.g. `SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub spdx_element_id: String,
    pub relationship_type: String,
    pub related_element: String,
    pub comment: Option<String>,
}

impl Relationship {
    /// Parse the `<id> <TYPE> <id>` wire form.
    pub fn parse(value: &str) -> Result<Self, SpdxError> {
        let mut parts = value.split_whitespace();
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(left), Some(kind), Some(right), None) => Ok(Relationship {
                spdx_element_id: left.to_string(),
                relationship_type: kind.to_string(),
                related_element: right.to_string(),
                comment: None,
            }),
            _ => Err(SpdxError::InvalidInput(format!(
                "Malformed relationship: '{}', expected '<id> <TYPE> <id>'",
                value
            ))),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.spdx_element_id, self.relationship_type, self.related_element
        )
    }
}

/// A region of a file with its own license and copyright facts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snippet {
    pub spdx_id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub copyright_text: Option<String>,
    pub license_concluded: Option<LicenseField>,
    pub licenses_in_snippet: Vec<LicenseField>,
    /// SPDX identifier of the file this snippet was taken from.
    pub file_spdx_id: Option<String>,
}

impl Snippet {
    pub fn new(spdx_id: impl Into<String>) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_parse_and_display() {
        let rel = Relationship::parse("SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package").unwrap();
        assert_eq!(rel.spdx_element_id, "SPDXRef-DOCUMENT");
        assert_eq!(rel.relationship_type, "DESCRIBES");
        assert_eq!(rel.related_element, "SPDXRef-Package");
        assert_eq!(rel.to_string(), "SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package");
    }

    #[test]
    fn test_relationship_rejects_malformed() {
        assert!(Relationship::parse("SPDXRef-DOCUMENT DESCRIBES").is_err());
        assert!(Relationship::parse("a b c d").is_err());
    }

    #[test]
    fn test_annotation_type_round_trip() {
        assert_eq!("REVIEW".parse::<AnnotationType>().unwrap(), AnnotationType::Review);
        assert_eq!(AnnotationType::Other.to_string(), "OTHER");
        assert!("NOTE".parse::<AnnotationType>().is_err());
    }
}
