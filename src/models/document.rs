//! Document model root: `Document`, `Version`, `CreationInfo`, `Creator`,
//! and `ExternalDocumentRef`.
//!
//! The Document exclusively owns everything reachable from it. Entities are
//! built by the codec layer (or programmatically) through the builder-style
//! operations here, then handed to the validation engine or a writer.
//! Invalid states are representable at this layer; validation reports them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};

use crate::errors::SpdxError;
use crate::models::annotation::{Annotation, Relationship, Review, Snippet};
use crate::models::checksum::Checksum;
use crate::models::license::{ExtractedLicense, License};
use crate::models::package::Package;

/// An SPDX specification version, ordered lexicographically by
/// (major, minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

/// The (major, minor) pairs this toolkit accepts in `SPDXVersion`.
pub const SUPPORTED_VERSIONS: &[Version] = &[
    Version { major: 1, minor: 2 },
    Version { major: 2, minor: 0 },
    Version { major: 2, minor: 1 },
];

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_VERSIONS.contains(self)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor).cmp(&(other.major, other.minor))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SPDX-{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = SpdxError;

    /// Accepts both `SPDX-M.m` and bare `M.m`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix("SPDX-").unwrap_or(s);
        let (major, minor) = bare.split_once('.').ok_or_else(|| {
            SpdxError::InvalidInput(format!("Malformed version: '{}', expected 'M.m'", s))
        })?;
        let major = major
            .parse::<u32>()
            .map_err(|_| SpdxError::InvalidInput(format!("Malformed major version in '{}'", s)))?;
        let minor = minor
            .parse::<u32>()
            .map_err(|_| SpdxError::InvalidInput(format!("Malformed minor version in '{}'", s)))?;
        Ok(Version::new(major, minor))
    }
}

/// Who (or what) created the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Creator {
    Tool(String),
    Person { name: String, email: Option<String> },
    Organization { name: String, email: Option<String> },
}

impl Creator {
    pub fn tool(name: impl Into<String>) -> Self {
        Creator::Tool(name.into())
    }

    /// Parse the `Kind: name (email)` wire form.
    pub fn parse(value: &str) -> Result<Self, SpdxError> {
        let (kind, rest) = value.split_once(':').ok_or_else(|| {
            SpdxError::InvalidInput(format!(
                "Malformed creator: '{}', expected 'Tool|Person|Organization: name'",
                value
            ))
        })?;
        let rest = rest.trim();
        match kind.trim() {
            "Tool" => Ok(Creator::Tool(rest.to_string())),
            "Person" => {
                let (name, email) = split_name_email(rest);
                Ok(Creator::Person { name, email })
            }
            "Organization" => {
                let (name, email) = split_name_email(rest);
                Ok(Creator::Organization { name, email })
            }
            other => Err(SpdxError::InvalidInput(format!(
                "Unknown creator kind: '{}'",
                other
            ))),
        }
    }
}

/// Splits `name (email)` into its parts; an empty `()` means no email.
fn split_name_email(value: &str) -> (String, Option<String>) {
    if let Some(open) = value.rfind('(') {
        if value.ends_with(')') {
            let name = value[..open].trim().to_string();
            let email = value[open + 1..value.len() - 1].trim();
            let email = if email.is_empty() {
                None
            } else {
                Some(email.to_string())
            };
            return (name, email);
        }
    }
    (value.to_string(), None)
}

impl fmt::Display for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Creator::Tool(name) => write!(f, "Tool: {}", name),
            Creator::Person { name, email } => match email {
                Some(email) => write!(f, "Person: {} ({})", name, email),
                None => write!(f, "Person: {}", name),
            },
            Creator::Organization { name, email } => match email {
                Some(email) => write!(f, "Organization: {} ({})", name, email),
                None => write!(f, "Organization: {}", name),
            },
        }
    }
}

/// Provenance of the document itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreationInfo {
    pub creators: Vec<Creator>,
    pub created: Option<DateTime<Utc>>,
    pub comment: Option<String>,
    pub license_list_version: Option<Version>,
}

impl CreationInfo {
    pub fn add_creator(&mut self, creator: Creator) {
        self.creators.push(creator);
    }

    /// Stamp `created` with the current time, truncated to whole seconds so
    /// the value survives the `%Y-%m-%dT%H:%M:%SZ` wire form unchanged.
    pub fn set_created_now(&mut self) {
        self.created = Some(Utc::now().trunc_subsecs(0));
    }
}

/// A reference to an SPDX document living outside this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDocumentRef {
    /// `DocumentRef-…` identifier local to the referencing document.
    pub external_document_id: String,
    pub spdx_document_uri: String,
    pub checksum: Checksum,
}

impl ExternalDocumentRef {
    pub fn new(
        external_document_id: impl Into<String>,
        spdx_document_uri: impl Into<String>,
        checksum: Checksum,
    ) -> Self {
        Self {
            external_document_id: external_document_id.into(),
            spdx_document_uri: spdx_document_uri.into(),
            checksum,
        }
    }
}

/// The root of the entity graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub version: Version,
    pub data_license: License,
    pub name: String,
    pub spdx_id: String,
    pub namespace: String,
    pub comment: Option<String>,
    pub creation_info: CreationInfo,
    pub package: Option<Package>,
    pub ext_document_references: Vec<ExternalDocumentRef>,
    pub extracted_licenses: Vec<ExtractedLicense>,
    pub snippets: Vec<Snippet>,
    pub reviews: Vec<Review>,
    pub annotations: Vec<Annotation>,
    pub relationships: Vec<Relationship>,
}

impl Document {
    pub fn new(
        version: Version,
        data_license: License,
        name: impl Into<String>,
        spdx_id: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            version,
            data_license,
            name: name.into(),
            spdx_id: spdx_id.into(),
            namespace: namespace.into(),
            comment: None,
            creation_info: CreationInfo::default(),
            package: None,
            ext_document_references: Vec::new(),
            extracted_licenses: Vec::new(),
            snippets: Vec::new(),
            reviews: Vec::new(),
            annotations: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn add_ext_document_reference(&mut self, reference: ExternalDocumentRef) {
        self.ext_document_references.push(reference);
    }

    pub fn add_extracted_license(&mut self, license: ExtractedLicense) {
        self.extracted_licenses.push(license);
    }

    pub fn add_snippet(&mut self, snippet: Snippet) {
        self.snippets.push(snippet);
    }

    pub fn add_review(&mut self, review: Review) {
        self.reviews.push(review);
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.relationships.push(relationship);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::checksum::Checksum;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_version_equality_and_ordering() {
        let v1 = Version::new(1, 2);
        let v2 = Version::new(2, 1);
        let v3 = Version::new(1, 2);
        assert_ne!(v1, v2);
        assert!(v1 < v2);
        assert!(v1 <= v2);
        assert!(v2 > v1);
        assert!(v2 >= v1);
        assert_eq!(v3, v1);
        assert!(!(v1 < v3));
        assert!(v1 <= v3);
    }

    #[test]
    fn test_version_parse_and_display() {
        assert_eq!("SPDX-2.1".parse::<Version>().unwrap(), Version::new(2, 1));
        assert_eq!("2.1".parse::<Version>().unwrap(), Version::new(2, 1));
        assert_eq!(Version::new(2, 1).to_string(), "SPDX-2.1");
        assert!("two.one".parse::<Version>().is_err());
    }

    #[test]
    fn test_creator_parse_and_display() {
        assert_eq!(
            Creator::parse("Tool: ScanCode").unwrap(),
            Creator::Tool("ScanCode".to_string())
        );
        let person = Creator::parse("Person: Jane Doe (jane@example.com)").unwrap();
        assert_eq!(
            person,
            Creator::Person {
                name: "Jane Doe".to_string(),
                email: Some("jane@example.com".to_string()),
            }
        );
        assert_eq!(person.to_string(), "Person: Jane Doe (jane@example.com)");
        let org = Creator::parse("Organization: Example Org ()").unwrap();
        assert_eq!(
            org,
            Creator::Organization {
                name: "Example Org".to_string(),
                email: None,
            }
        );
        assert!(Creator::parse("Robot: beep").is_err());
    }

    #[test]
    fn test_document_creation_with_external_reference() {
        let mut document = Document::new(
            Version::new(2, 1),
            License::new("Academic Free License v1.1", "AFL-1.1"),
            "Sample_Document-V2.1",
            "SPDXRef-DOCUMENT",
            "https://spdx.org/spdxdocs/sample-doc",
        );
        document.add_ext_document_reference(ExternalDocumentRef::new(
            "DocumentRef-spdx-tool-2.1",
            "https://spdx.org/spdxdocs/spdx-tools-v2.1-3F2504E0-4F89-41D3-9A0C-0305E82C3301",
            Checksum::sha1("SOME-SHA1"),
        ));

        assert_eq!(document.comment, None);
        assert_eq!(document.version, Version::new(2, 1));
        assert_eq!(document.data_license.identifier, "AFL-1.1");
        let reference = document.ext_document_references.last().unwrap();
        assert_eq!(reference.external_document_id, "DocumentRef-spdx-tool-2.1");
        assert_eq!(
            reference.spdx_document_uri,
            "https://spdx.org/spdxdocs/spdx-tools-v2.1-3F2504E0-4F89-41D3-9A0C-0305E82C3301"
        );
        assert_eq!(reference.checksum.value, "SOME-SHA1");
    }

    #[test]
    fn test_set_created_now_truncates_to_seconds() {
        let mut info = CreationInfo::default();
        info.set_created_now();
        let created = info.created.unwrap();
        assert_eq!(created.timestamp_subsec_nanos(), 0);
    }
}
