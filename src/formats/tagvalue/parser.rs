//! Parser for the tag/value format.
//!
//! Consumes the lexer's token stream in a single forward pass and builds a
//! [`Document`]. Tags are grouped into entity records by section-opening
//! tags: `PackageName` opens the package, `FileName` opens a file inside
//! the current package, `LicenseID` opens an extracted-license record, and
//! `SnippetSPDXID` opens a snippet. A repeated opener implicitly closes the
//! previous record. A tag arriving before its section's opener, or inside a
//! section that does not accept it, is a fatal parse error carrying the
//! line and tag name.

use chrono::{DateTime, Utc};

use crate::errors::SpdxError;
use crate::formats::tagvalue::lexer::{lex, Token};
use crate::models::annotation::{Annotation, AnnotationType, Relationship, Review, Snippet};
use crate::models::checksum::Checksum;
use crate::models::document::{CreationInfo, Creator, Document, ExternalDocumentRef, Version};
use crate::models::file::{File, FileType};
use crate::models::license::{ExtractedLicense, License, LicenseField};
use crate::models::package::Package;

/// Which record is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Document,
    Package,
    File,
    ExtractedLicense,
    Snippet,
}

/// Parse tag/value text into a Document.
pub fn parse_str(input: &str) -> Result<Document, SpdxError> {
    let tokens = lex(input)?;
    let mut parser = Parser::new();
    for token in tokens {
        parser.feed(token)?;
    }
    parser.finish()
}

/// Partially built document state; finalized into a [`Document`] once the
/// token stream ends.
struct Parser {
    section: Section,
    last_line: usize,

    version: Option<Version>,
    data_license: Option<License>,
    name: Option<String>,
    spdx_id: Option<String>,
    namespace: Option<String>,
    comment: Option<String>,
    creation_info: CreationInfo,
    ext_document_references: Vec<ExternalDocumentRef>,

    package: Option<Package>,
    current_file: Option<File>,
    current_extracted: Option<ExtractedLicense>,
    current_snippet: Option<Snippet>,

    extracted_licenses: Vec<ExtractedLicense>,
    snippets: Vec<Snippet>,
    reviews: Vec<Review>,
    annotations: Vec<Annotation>,
    relationships: Vec<Relationship>,
}

impl Parser {
    fn new() -> Self {
        Self {
            section: Section::Document,
            last_line: 0,
            version: None,
            data_license: None,
            name: None,
            spdx_id: None,
            namespace: None,
            comment: None,
            creation_info: CreationInfo::default(),
            ext_document_references: Vec::new(),
            package: None,
            current_file: None,
            current_extracted: None,
            current_snippet: None,
            extracted_licenses: Vec::new(),
            snippets: Vec::new(),
            reviews: Vec::new(),
            annotations: Vec::new(),
            relationships: Vec::new(),
        }
    }

    fn feed(&mut self, token: Token) -> Result<(), SpdxError> {
        let (tag, value, line) = match token {
            Token::Pair { tag, value, line } => (tag, value, line),
            Token::Unrecognized { tag, line } => {
                return Err(SpdxError::parse(line, format!("Unrecognized tag '{}'", tag)));
            }
        };
        self.last_line = line;

        match tag {
            // --- Document header ---
            "SPDXVersion" => {
                let version = at(line, value.parse::<Version>())?;
                set_once(&mut self.version, version, line, tag)
            }
            "DataLicense" => set_once(
                &mut self.data_license,
                License::from_identifier(&value),
                line,
                tag,
            ),
            "DocumentName" => set_once(&mut self.name, value, line, tag),
            "DocumentNamespace" => set_once(&mut self.namespace, value, line, tag),
            "DocumentComment" => set_once(&mut self.comment, value, line, tag),
            "ExternalDocumentRef" => {
                self.ext_document_references
                    .push(parse_external_ref(line, &value)?);
                Ok(())
            }
            "SPDXID" => self.route_spdx_id(line, value),

            // --- Creation info ---
            "Creator" => {
                let creator = at(line, Creator::parse(&value))?;
                self.creation_info.add_creator(creator);
                Ok(())
            }
            "Created" => {
                let created = parse_date(line, &value)?;
                set_once(&mut self.creation_info.created, created, line, tag)
            }
            "CreatorComment" => {
                self.creation_info.comment = Some(value);
                Ok(())
            }
            "LicenseListVersion" => {
                self.creation_info.license_list_version =
                    Some(at(line, value.parse::<Version>())?);
                Ok(())
            }

            // --- Package ---
            "PackageName" => self.open_package(line, value),
            "PackageVersion" => {
                self.package_mut(line, tag)?.version = Some(value);
                Ok(())
            }
            "PackageFileName" => {
                self.package_mut(line, tag)?.file_name = Some(value);
                Ok(())
            }
            "PackageSupplier" => {
                self.package_mut(line, tag)?.supplier = Some(value);
                Ok(())
            }
            "PackageOriginator" => {
                self.package_mut(line, tag)?.originator = Some(value);
                Ok(())
            }
            "PackageDownloadLocation" => {
                self.package_mut(line, tag)?.download_location = Some(value);
                Ok(())
            }
            "FilesAnalyzed" => {
                let analyzed = parse_bool(line, &value)?;
                self.package_mut(line, tag)?.files_analyzed = analyzed;
                Ok(())
            }
            "PackageVerificationCode" => {
                self.package_mut(line, tag)?.verif_code = Some(value);
                Ok(())
            }
            "PackageChecksum" => {
                let checksum = at(line, value.parse::<Checksum>())?;
                self.package_mut(line, tag)?.check_sum = Some(checksum);
                Ok(())
            }
            "PackageSourceInfo" => {
                self.package_mut(line, tag)?.source_info = Some(value);
                Ok(())
            }
            "PackageLicenseConcluded" => {
                let field = at(line, LicenseField::parse(&value))?;
                self.package_mut(line, tag)?.license_concluded = Some(field);
                Ok(())
            }
            "PackageLicenseInfoFromFiles" => {
                let field = at(line, LicenseField::parse(&value))?;
                self.package_mut(line, tag)?.add_lics_from_file(field);
                Ok(())
            }
            "PackageLicenseDeclared" => {
                let field = at(line, LicenseField::parse(&value))?;
                self.package_mut(line, tag)?.license_declared = Some(field);
                Ok(())
            }
            "PackageLicenseComments" => {
                self.package_mut(line, tag)?.license_comment = Some(value);
                Ok(())
            }
            "PackageCopyrightText" => {
                self.package_mut(line, tag)?.copyright_text = Some(value);
                Ok(())
            }
            "PackageSummary" => {
                self.package_mut(line, tag)?.summary = Some(value);
                Ok(())
            }
            "PackageDescription" => {
                self.package_mut(line, tag)?.description = Some(value);
                Ok(())
            }
            "PackageComment" => {
                self.package_mut(line, tag)?.comment = Some(value);
                Ok(())
            }

            // --- File ---
            "FileName" => self.open_file(line, value),
            "FileType" => {
                let ty = at(line, value.parse::<FileType>())?;
                self.file_mut(line, tag)?.file_types.push(ty);
                Ok(())
            }
            "FileChecksum" => {
                let checksum = at(line, value.parse::<Checksum>())?;
                self.file_mut(line, tag)?.checksum = Some(checksum);
                Ok(())
            }
            "LicenseConcluded" => {
                let field = at(line, LicenseField::parse(&value))?;
                self.file_mut(line, tag)?.license_concluded = Some(field);
                Ok(())
            }
            "LicenseInfoInFile" => {
                let field = at(line, LicenseField::parse(&value))?;
                self.file_mut(line, tag)?.add_lics(field);
                Ok(())
            }
            "LicenseComments" => {
                self.file_mut(line, tag)?.license_comment = Some(value);
                Ok(())
            }
            "FileCopyrightText" => {
                self.file_mut(line, tag)?.copyright_text = Some(value);
                Ok(())
            }
            "FileComment" => {
                self.file_mut(line, tag)?.comment = Some(value);
                Ok(())
            }
            "FileNotice" => {
                self.file_mut(line, tag)?.notice = Some(value);
                Ok(())
            }
            "FileContributor" => {
                self.file_mut(line, tag)?.contributors.push(value);
                Ok(())
            }
            "FileDependency" => {
                self.file_mut(line, tag)?.dependencies.push(value);
                Ok(())
            }

            // --- Extracted license ---
            "LicenseID" => self.open_extracted_license(value),
            "ExtractedText" => {
                self.extracted_mut(line, tag)?.extracted_text = Some(value);
                Ok(())
            }
            "LicenseName" => {
                self.extracted_mut(line, tag)?.name = Some(value);
                Ok(())
            }
            "LicenseCrossReference" => {
                self.extracted_mut(line, tag)?.cross_refs.push(value);
                Ok(())
            }
            "LicenseComment" => {
                self.extracted_mut(line, tag)?.comment = Some(value);
                Ok(())
            }

            // --- Snippet ---
            "SnippetSPDXID" => self.open_snippet(value),
            "SnippetName" => {
                self.snippet_mut(line, tag)?.name = Some(value);
                Ok(())
            }
            "SnippetComment" => {
                self.snippet_mut(line, tag)?.comment = Some(value);
                Ok(())
            }
            "SnippetCopyrightText" => {
                self.snippet_mut(line, tag)?.copyright_text = Some(value);
                Ok(())
            }
            "SnippetLicenseConcluded" => {
                let field = at(line, LicenseField::parse(&value))?;
                self.snippet_mut(line, tag)?.license_concluded = Some(field);
                Ok(())
            }
            "LicenseInfoInSnippet" => {
                let field = at(line, LicenseField::parse(&value))?;
                self.snippet_mut(line, tag)?.licenses_in_snippet.push(field);
                Ok(())
            }
            "SnippetFromFileSPDXID" => {
                self.snippet_mut(line, tag)?.file_spdx_id = Some(value);
                Ok(())
            }

            // --- Review ---
            "Reviewer" => {
                let reviewer = at(line, Creator::parse(&value))?;
                self.reviews.push(Review::new(reviewer));
                Ok(())
            }
            "ReviewDate" => {
                let date = parse_date(line, &value)?;
                self.review_mut(line, tag)?.date = Some(date);
                Ok(())
            }
            "ReviewComment" => {
                self.review_mut(line, tag)?.comment = Some(value);
                Ok(())
            }

            // --- Annotation ---
            "Annotator" => {
                let annotator = at(line, Creator::parse(&value))?;
                self.annotations.push(Annotation::new(annotator));
                Ok(())
            }
            "AnnotationDate" => {
                let date = parse_date(line, &value)?;
                self.annotation_mut(line, tag)?.date = Some(date);
                Ok(())
            }
            "AnnotationComment" => {
                self.annotation_mut(line, tag)?.comment = Some(value);
                Ok(())
            }
            "AnnotationType" => {
                let ty = at(line, value.parse::<AnnotationType>())?;
                self.annotation_mut(line, tag)?.annotation_type = Some(ty);
                Ok(())
            }
            "SPDXREF" => {
                self.annotation_mut(line, tag)?.spdx_id_ref = Some(value);
                Ok(())
            }

            // --- Relationship ---
            "Relationship" => {
                let relationship = at(line, Relationship::parse(&value))?;
                self.relationships.push(relationship);
                Ok(())
            }
            "RelationshipComment" => match self.relationships.last_mut() {
                Some(relationship) => {
                    relationship.comment = Some(value);
                    Ok(())
                }
                None => Err(out_of_section(line, tag, "Relationship")),
            },

            other => Err(SpdxError::parse(
                line,
                format!("Tag '{}' is not handled by this parser", other),
            )),
        }
    }

    // --- Section transitions ---

    fn open_package(&mut self, line: usize, name: String) -> Result<(), SpdxError> {
        if self.package.is_some() {
            return Err(SpdxError::parse(
                line,
                "Multiple PackageName tags: only one package per document is supported",
            ));
        }
        self.close_open_records();
        self.package = Some(Package::new(name));
        self.section = Section::Package;
        Ok(())
    }

    fn open_file(&mut self, line: usize, name: String) -> Result<(), SpdxError> {
        if self.package.is_none() {
            return Err(SpdxError::parse(
                line,
                "Tag 'FileName' encountered before 'PackageName' opened a package section",
            ));
        }
        self.close_open_records();
        self.current_file = Some(File::new(name));
        self.section = Section::File;
        Ok(())
    }

    fn open_extracted_license(&mut self, license_ref: String) -> Result<(), SpdxError> {
        self.close_open_records();
        self.current_extracted = Some(ExtractedLicense::new(license_ref));
        self.section = Section::ExtractedLicense;
        Ok(())
    }

    fn open_snippet(&mut self, spdx_id: String) -> Result<(), SpdxError> {
        self.close_open_records();
        self.current_snippet = Some(Snippet::new(spdx_id));
        self.section = Section::Snippet;
        Ok(())
    }

    /// Finalize whichever record is currently in progress. Called on every
    /// section-opening tag and at end of input.
    fn close_open_records(&mut self) {
        if let Some(file) = self.current_file.take() {
            // open_file checks the package exists before opening a file
            if let Some(package) = self.package.as_mut() {
                package.add_file(file);
            }
        }
        if let Some(extracted) = self.current_extracted.take() {
            self.extracted_licenses.push(extracted);
        }
        if let Some(snippet) = self.current_snippet.take() {
            self.snippets.push(snippet);
        }
    }

    // --- Cursor accessors; each reports the missing opener on failure ---

    fn route_spdx_id(&mut self, line: usize, value: String) -> Result<(), SpdxError> {
        match self.section {
            Section::Document => set_once(&mut self.spdx_id, value, line, "SPDXID"),
            Section::Package => {
                self.package_mut(line, "SPDXID")?.spdx_id = Some(value);
                Ok(())
            }
            Section::File => {
                self.file_mut(line, "SPDXID")?.spdx_id = Some(value);
                Ok(())
            }
            Section::ExtractedLicense | Section::Snippet => {
                Err(out_of_section(line, "SPDXID", "PackageName or FileName"))
            }
        }
    }

    fn package_mut(&mut self, line: usize, tag: &str) -> Result<&mut Package, SpdxError> {
        if self.section != Section::Package {
            return Err(out_of_section(line, tag, "PackageName"));
        }
        self.package
            .as_mut()
            .ok_or_else(|| out_of_section(line, tag, "PackageName"))
    }

    fn file_mut(&mut self, line: usize, tag: &str) -> Result<&mut File, SpdxError> {
        if self.section != Section::File {
            return Err(out_of_section(line, tag, "FileName"));
        }
        self.current_file
            .as_mut()
            .ok_or_else(|| out_of_section(line, tag, "FileName"))
    }

    fn extracted_mut(
        &mut self,
        line: usize,
        tag: &str,
    ) -> Result<&mut ExtractedLicense, SpdxError> {
        self.current_extracted
            .as_mut()
            .ok_or_else(|| out_of_section(line, tag, "LicenseID"))
    }

    fn snippet_mut(&mut self, line: usize, tag: &str) -> Result<&mut Snippet, SpdxError> {
        self.current_snippet
            .as_mut()
            .ok_or_else(|| out_of_section(line, tag, "SnippetSPDXID"))
    }

    fn review_mut(&mut self, line: usize, tag: &str) -> Result<&mut Review, SpdxError> {
        self.reviews
            .last_mut()
            .ok_or_else(|| out_of_section(line, tag, "Reviewer"))
    }

    fn annotation_mut(&mut self, line: usize, tag: &str) -> Result<&mut Annotation, SpdxError> {
        self.annotations
            .last_mut()
            .ok_or_else(|| out_of_section(line, tag, "Annotator"))
    }

    /// End of input closes all open records and finalizes the Document.
    fn finish(mut self) -> Result<Document, SpdxError> {
        self.close_open_records();
        let line = self.last_line;
        let missing = |tag: &str| SpdxError::parse(line, format!("Missing mandatory tag '{}'", tag));

        let mut document = Document::new(
            self.version.ok_or_else(|| missing("SPDXVersion"))?,
            self.data_license.ok_or_else(|| missing("DataLicense"))?,
            self.name.ok_or_else(|| missing("DocumentName"))?,
            self.spdx_id.ok_or_else(|| missing("SPDXID"))?,
            self.namespace.ok_or_else(|| missing("DocumentNamespace"))?,
        );
        document.comment = self.comment;
        document.creation_info = self.creation_info;
        document.ext_document_references = self.ext_document_references;
        document.package = self.package;
        document.extracted_licenses = self.extracted_licenses;
        document.snippets = self.snippets;
        document.reviews = self.reviews;
        document.annotations = self.annotations;
        document.relationships = self.relationships;
        Ok(document)
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, line: usize, tag: &str) -> Result<(), SpdxError> {
    if slot.is_some() {
        return Err(duplicate(line, tag));
    }
    *slot = Some(value);
    Ok(())
}

fn out_of_section(line: usize, tag: &str, opener: &str) -> SpdxError {
    SpdxError::parse(
        line,
        format!(
            "Tag '{}' is not valid here: no open section started by '{}'",
            tag, opener
        ),
    )
}

fn duplicate(line: usize, tag: &str) -> SpdxError {
    SpdxError::parse(line, format!("Duplicate tag '{}'", tag))
}

/// Rewrap a value-level error (no line info) as a parse error at `line`.
fn at<T>(line: usize, result: Result<T, SpdxError>) -> Result<T, SpdxError> {
    result.map_err(|err| match err {
        SpdxError::InvalidInput(message) => SpdxError::parse(line, message),
        other => other,
    })
}

fn parse_bool(line: usize, value: &str) -> Result<bool, SpdxError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(SpdxError::parse(
            line,
            format!("Expected 'true' or 'false', got '{}'", other),
        )),
    }
}

fn parse_date(line: usize, value: &str) -> Result<DateTime<Utc>, SpdxError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            SpdxError::parse(
                line,
                format!(
                    "Malformed date '{}', expected e.g. 2018-01-01T00:00:00Z",
                    value
                ),
            )
        })
}

/// `ExternalDocumentRef: DocumentRef-id uri SHA1: digest`
fn parse_external_ref(line: usize, value: &str) -> Result<ExternalDocumentRef, SpdxError> {
    let mut parts = value.split_whitespace();
    let id = parts.next();
    let uri = parts.next();
    let checksum = parts.collect::<Vec<_>>().join(" ");
    match (id, uri) {
        (Some(id), Some(uri)) if !checksum.is_empty() => Ok(ExternalDocumentRef::new(
            id,
            uri,
            at(line, checksum.parse::<Checksum>())?,
        )),
        _ => Err(SpdxError::parse(
            line,
            format!(
                "Malformed ExternalDocumentRef: '{}', expected '<id> <uri> <checksum>'",
                value
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::checksum::ChecksumAlgorithm;
    use pretty_assertions::assert_eq;

    const SIMPLE_DOC: &str = "\
SPDXVersion: SPDX-2.1
DataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
DocumentName: Sample_Document-V2.1
DocumentNamespace: https://spdx.org/spdxdocs/spdx-example-444504E0
Creator: Tool: ScanCode
Created: 2018-01-01T00:00:00Z

PackageName: some/path
SPDXID: SPDXRef-Package
PackageDownloadLocation: NOASSERTION
PackageVerificationCode: 4e3211c67a2d28fced849ee1bb76e7391b93feba
PackageChecksum: SHA1: SOME-SHA1
PackageCopyrightText: <text>Some copyright</text>
PackageLicenseConcluded: NOASSERTION
PackageLicenseDeclared: NOASSERTION
PackageLicenseInfoFromFiles: LGPL-2.1-only

FileName: ./some/path/tofile
SPDXID: SPDXRef-File
FileChecksum: SHA1: SOME-SHA1
LicenseConcluded: NOASSERTION
LicenseInfoInFile: LGPL-2.1-only
FileCopyrightText: NOASSERTION

Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package
";

    #[test]
    fn test_parse_simple_document() {
        let doc = parse_str(SIMPLE_DOC).unwrap();
        assert_eq!(doc.version, Version::new(2, 1));
        assert_eq!(doc.data_license.identifier, "CC0-1.0");
        assert_eq!(doc.spdx_id, "SPDXRef-DOCUMENT");
        assert_eq!(doc.name, "Sample_Document-V2.1");
        assert_eq!(doc.creation_info.creators.len(), 1);
        assert!(doc.creation_info.created.is_some());

        let package = doc.package.as_ref().unwrap();
        assert_eq!(package.name, "some/path");
        assert_eq!(package.spdx_id.as_deref(), Some("SPDXRef-Package"));
        assert_eq!(package.download_location.as_deref(), Some("NOASSERTION"));
        assert_eq!(package.license_concluded, Some(LicenseField::NoAssertion));
        assert_eq!(package.copyright_text.as_deref(), Some("Some copyright"));
        assert_eq!(package.files.len(), 1);

        let file = &package.files[0];
        assert_eq!(file.name, "./some/path/tofile");
        assert_eq!(
            file.checksum.as_ref().unwrap().algorithm,
            ChecksumAlgorithm::Sha1
        );
        assert_eq!(file.licenses_in_file.len(), 1);

        assert_eq!(doc.relationships.len(), 1);
        assert_eq!(doc.relationships[0].relationship_type, "DESCRIBES");
    }

    #[test]
    fn test_file_checksum_before_file_section_is_a_structural_error() {
        let input = "\
SPDXVersion: SPDX-2.1
DataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
DocumentName: doc
DocumentNamespace: https://example.com/doc
PackageName: pkg
FileChecksum: SHA1: abc
";
        let err = parse_str(input).unwrap_err();
        match err {
            SpdxError::Parse { line, message } => {
                assert_eq!(line, 7);
                assert!(message.contains("FileChecksum"), "message: {}", message);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_package_tag_before_package_section_is_rejected() {
        let input = "SPDXVersion: SPDX-2.1\nPackageDownloadLocation: NONE\n";
        let err = parse_str(input).unwrap_err();
        assert!(matches!(err, SpdxError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_repeated_file_name_opens_a_new_file() {
        let input = format!(
            "{}FileName: ./second\nSPDXID: SPDXRef-File2\nFileChecksum: SHA1: OTHER-SHA1\n",
            SIMPLE_DOC
        );
        let doc = parse_str(&input).unwrap();
        let package = doc.package.as_ref().unwrap();
        assert_eq!(package.files.len(), 2);
        assert_eq!(package.files[1].name, "./second");
    }

    #[test]
    fn test_extracted_license_record() {
        let input = format!(
            "{}LicenseID: LicenseRef-1\nExtractedText: <text>The verbatim text</text>\nLicenseName: Custom License\n",
            SIMPLE_DOC
        );
        let doc = parse_str(&input).unwrap();
        assert_eq!(doc.extracted_licenses.len(), 1);
        let extracted = &doc.extracted_licenses[0];
        assert_eq!(extracted.license_ref, "LicenseRef-1");
        assert_eq!(extracted.extracted_text.as_deref(), Some("The verbatim text"));
        assert_eq!(extracted.name.as_deref(), Some("Custom License"));
    }

    #[test]
    fn test_unrecognized_tag_is_fatal_with_line() {
        let input = "SPDXVersion: SPDX-2.1\nNotATag: nope\n";
        let err = parse_str(input).unwrap_err();
        match err {
            SpdxError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("NotATag"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_mandatory_header_tag() {
        let err = parse_str("SPDXVersion: SPDX-2.1\n").unwrap_err();
        match err {
            SpdxError::Parse { message, .. } => {
                assert!(message.contains("DataLicense"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_header_tag_is_rejected() {
        let input = "SPDXVersion: SPDX-2.1\nSPDXVersion: SPDX-2.0\n";
        let err = parse_str(input).unwrap_err();
        assert!(matches!(err, SpdxError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_second_package_is_rejected() {
        let input = format!("{}PackageName: another\n", SIMPLE_DOC);
        let err = parse_str(&input).unwrap_err();
        assert!(matches!(err, SpdxError::Parse { .. }));
    }

    #[test]
    fn test_review_and_annotation_records() {
        let input = format!(
            "{}\
Reviewer: Person: Joe Reviewer
ReviewDate: 2018-02-10T00:00:00Z
ReviewComment: <text>Looks fine</text>
Annotator: Person: Jane Annotator
AnnotationDate: 2018-03-10T00:00:00Z
AnnotationType: REVIEW
SPDXREF: SPDXRef-DOCUMENT
AnnotationComment: <text>A remark</text>
",
            SIMPLE_DOC
        );
        let doc = parse_str(&input).unwrap();
        assert_eq!(doc.reviews.len(), 1);
        assert_eq!(doc.reviews[0].comment.as_deref(), Some("Looks fine"));
        assert_eq!(doc.annotations.len(), 1);
        assert_eq!(
            doc.annotations[0].spdx_id_ref.as_deref(),
            Some("SPDXRef-DOCUMENT")
        );
    }

    #[test]
    fn test_annotation_date_without_annotator_is_rejected() {
        let input = "SPDXVersion: SPDX-2.1\nAnnotationDate: 2018-03-10T00:00:00Z\n";
        let err = parse_str(input).unwrap_err();
        assert!(matches!(err, SpdxError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_external_document_ref() {
        let input = format!(
            "{}ExternalDocumentRef: DocumentRef-spdx-tool-2.1 https://spdx.org/spdxdocs/spdx-tools-v2.1 SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n",
            SIMPLE_DOC
        );
        let doc = parse_str(&input).unwrap();
        assert_eq!(doc.ext_document_references.len(), 1);
        let reference = &doc.ext_document_references[0];
        assert_eq!(reference.external_document_id, "DocumentRef-spdx-tool-2.1");
        assert_eq!(
            reference.checksum.value,
            "d6a770ba38583ed4bb4525bd96e50461655d2759"
        );
    }
}
