//! Writer for the tag/value format.
//!
//! Serialization order mirrors the validation walk so output is
//! deterministic and testable. With `validate = true` the document is
//! checked first and nothing is written if it is invalid: the full
//! violation list is returned instead, never a truncated file.

use std::fmt::Write as _;
use std::io::Write;

use chrono::{DateTime, Utc};

use crate::errors::SpdxError;
use crate::formats::tagvalue::lexer::{TEXT_CLOSE, TEXT_OPEN};
use crate::models::document::Document;
use crate::models::file::File;
use crate::models::license::LicenseField;
use crate::models::package::Package;
use crate::validation::validate;

/// Serialize a document into tag/value text.
pub fn write_document<W: Write>(
    document: &Document,
    out: &mut W,
    check: bool,
) -> Result<(), SpdxError> {
    if check {
        let outcome = validate(document);
        if !outcome.is_valid {
            return Err(SpdxError::InvalidDocument(outcome.messages));
        }
    }
    let rendered = render(document)?;
    out.write_all(rendered.as_bytes())
        .map_err(|e| SpdxError::Io(e, "Failed to write tag/value output".to_string()))?;
    Ok(())
}

fn render(document: &Document) -> Result<String, SpdxError> {
    let mut out = String::new();

    // Document header
    line(&mut out, "SPDXVersion", &document.version.to_string());
    line(&mut out, "DataLicense", &document.data_license.to_string());
    line(&mut out, "SPDXID", &document.spdx_id);
    line(&mut out, "DocumentName", &document.name);
    line(&mut out, "DocumentNamespace", &document.namespace);
    if let Some(comment) = &document.comment {
        text_line(&mut out, "DocumentComment", comment)?;
    }
    for reference in &document.ext_document_references {
        line(
            &mut out,
            "ExternalDocumentRef",
            &format!(
                "{} {} {}",
                reference.external_document_id, reference.spdx_document_uri, reference.checksum
            ),
        );
    }

    // Creation info
    if let Some(version) = &document.creation_info.license_list_version {
        line(
            &mut out,
            "LicenseListVersion",
            &format!("{}.{}", version.major, version.minor),
        );
    }
    for creator in &document.creation_info.creators {
        line(&mut out, "Creator", &creator.to_string());
    }
    if let Some(created) = &document.creation_info.created {
        line(&mut out, "Created", &format_date(created));
    }
    if let Some(comment) = &document.creation_info.comment {
        text_line(&mut out, "CreatorComment", comment)?;
    }

    if let Some(package) = &document.package {
        out.push('\n');
        render_package(&mut out, package)?;
    }

    for extracted in &document.extracted_licenses {
        out.push('\n');
        line(&mut out, "LicenseID", &extracted.license_ref);
        if let Some(name) = &extracted.name {
            line(&mut out, "LicenseName", name);
        }
        if let Some(text) = &extracted.extracted_text {
            text_line(&mut out, "ExtractedText", text)?;
        }
        for cross_ref in &extracted.cross_refs {
            line(&mut out, "LicenseCrossReference", cross_ref);
        }
        if let Some(comment) = &extracted.comment {
            text_line(&mut out, "LicenseComment", comment)?;
        }
    }

    for review in &document.reviews {
        out.push('\n');
        line(&mut out, "Reviewer", &review.reviewer.to_string());
        if let Some(date) = &review.date {
            line(&mut out, "ReviewDate", &format_date(date));
        }
        if let Some(comment) = &review.comment {
            text_line(&mut out, "ReviewComment", comment)?;
        }
    }

    for snippet in &document.snippets {
        out.push('\n');
        line(&mut out, "SnippetSPDXID", &snippet.spdx_id);
        if let Some(file_id) = &snippet.file_spdx_id {
            line(&mut out, "SnippetFromFileSPDXID", file_id);
        }
        if let Some(name) = &snippet.name {
            line(&mut out, "SnippetName", name);
        }
        if let Some(concluded) = &snippet.license_concluded {
            line(&mut out, "SnippetLicenseConcluded", &concluded.to_string());
        }
        for license in &snippet.licenses_in_snippet {
            line(&mut out, "LicenseInfoInSnippet", &license.to_string());
        }
        if let Some(copyright) = &snippet.copyright_text {
            text_line(&mut out, "SnippetCopyrightText", copyright)?;
        }
        if let Some(comment) = &snippet.comment {
            text_line(&mut out, "SnippetComment", comment)?;
        }
    }

    for annotation in &document.annotations {
        out.push('\n');
        line(&mut out, "Annotator", &annotation.annotator.to_string());
        if let Some(date) = &annotation.date {
            line(&mut out, "AnnotationDate", &format_date(date));
        }
        if let Some(ty) = &annotation.annotation_type {
            line(&mut out, "AnnotationType", ty.as_str());
        }
        if let Some(target) = &annotation.spdx_id_ref {
            line(&mut out, "SPDXREF", target);
        }
        if let Some(comment) = &annotation.comment {
            text_line(&mut out, "AnnotationComment", comment)?;
        }
    }

    if !document.relationships.is_empty() {
        out.push('\n');
        for relationship in &document.relationships {
            line(&mut out, "Relationship", &relationship.to_string());
            if let Some(comment) = &relationship.comment {
                text_line(&mut out, "RelationshipComment", comment)?;
            }
        }
    }

    Ok(out)
}

fn render_package(out: &mut String, package: &Package) -> Result<(), SpdxError> {
    line(out, "PackageName", &package.name);
    if let Some(id) = &package.spdx_id {
        line(out, "SPDXID", id);
    }
    if let Some(version) = &package.version {
        line(out, "PackageVersion", version);
    }
    if let Some(file_name) = &package.file_name {
        line(out, "PackageFileName", file_name);
    }
    if let Some(supplier) = &package.supplier {
        line(out, "PackageSupplier", supplier);
    }
    if let Some(originator) = &package.originator {
        line(out, "PackageOriginator", originator);
    }
    if let Some(location) = &package.download_location {
        line(out, "PackageDownloadLocation", location);
    }
    // Absent FilesAnalyzed means true; only the exception is written.
    if !package.files_analyzed {
        line(out, "FilesAnalyzed", "false");
    }
    if let Some(code) = &package.verif_code {
        line(out, "PackageVerificationCode", code);
    }
    if let Some(checksum) = &package.check_sum {
        line(out, "PackageChecksum", &checksum.to_string());
    }
    if let Some(source_info) = &package.source_info {
        text_line(out, "PackageSourceInfo", source_info)?;
    }
    if let Some(concluded) = &package.license_concluded {
        line(out, "PackageLicenseConcluded", &concluded.to_string());
    }
    for license in &package.license_infos_from_files {
        line(out, "PackageLicenseInfoFromFiles", &license.to_string());
    }
    if let Some(declared) = &package.license_declared {
        line(out, "PackageLicenseDeclared", &declared.to_string());
    }
    if let Some(comment) = &package.license_comment {
        text_line(out, "PackageLicenseComments", comment)?;
    }
    if let Some(copyright) = &package.copyright_text {
        text_line(out, "PackageCopyrightText", copyright)?;
    }
    if let Some(summary) = &package.summary {
        text_line(out, "PackageSummary", summary)?;
    }
    if let Some(description) = &package.description {
        text_line(out, "PackageDescription", description)?;
    }
    if let Some(comment) = &package.comment {
        text_line(out, "PackageComment", comment)?;
    }

    for file in &package.files {
        out.push('\n');
        render_file(out, file)?;
    }
    Ok(())
}

fn render_file(out: &mut String, file: &File) -> Result<(), SpdxError> {
    line(out, "FileName", &file.name);
    if let Some(id) = &file.spdx_id {
        line(out, "SPDXID", id);
    }
    for ty in &file.file_types {
        line(out, "FileType", ty.as_str());
    }
    if let Some(checksum) = &file.checksum {
        line(out, "FileChecksum", &checksum.to_string());
    }
    if let Some(concluded) = &file.license_concluded {
        line(out, "LicenseConcluded", &concluded.to_string());
    }
    for license in &file.licenses_in_file {
        line(out, "LicenseInfoInFile", &license.to_string());
    }
    if let Some(comment) = &file.license_comment {
        text_line(out, "LicenseComments", comment)?;
    }
    if let Some(copyright) = &file.copyright_text {
        text_line(out, "FileCopyrightText", copyright)?;
    }
    if let Some(comment) = &file.comment {
        text_line(out, "FileComment", comment)?;
    }
    if let Some(notice) = &file.notice {
        text_line(out, "FileNotice", notice)?;
    }
    for contributor in &file.contributors {
        line(out, "FileContributor", contributor);
    }
    for dependency in &file.dependencies {
        line(out, "FileDependency", dependency);
    }
    Ok(())
}

fn line(out: &mut String, tag: &str, value: &str) {
    let _ = writeln!(out, "{}: {}", tag, value);
}

/// Free-text values are wrapped in `<text>…</text>`; the sentinel tokens
/// stay bare so they read back as sentinels, not prose. A value containing
/// the literal close delimiter has no representation in this grammar and is
/// rejected.
fn text_line(out: &mut String, tag: &str, value: &str) -> Result<(), SpdxError> {
    if value == LicenseField::NO_ASSERTION_TOKEN || value == LicenseField::NONE_TOKEN {
        line(out, tag, value);
    } else if value.contains(TEXT_CLOSE) {
        return Err(SpdxError::InvalidInput(format!(
            "Value of tag '{}' contains the literal '{}' delimiter and cannot be serialized",
            tag, TEXT_CLOSE
        )));
    } else {
        let _ = writeln!(out, "{}: {}{}{}", tag, TEXT_OPEN, value, TEXT_CLOSE);
    }
    Ok(())
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::tagvalue::parser::parse_str;
    use crate::models::checksum::Checksum;
    use crate::models::document::{Creator, Version};
    use crate::models::license::License;
    use crate::models::package::Package;
    use pretty_assertions::assert_eq;

    fn sample_doc(or_later: bool) -> Document {
        let mut doc = Document::new(
            Version::new(2, 1),
            License::from_identifier("CC0-1.0"),
            "Sample_Document-V2.1",
            "SPDXRef-DOCUMENT",
            "https://spdx.org/spdxdocs/spdx-example-444504E0-4F89-41D3-9A0C-0305E82C3301",
        );
        doc.creation_info.add_creator(Creator::tool("ScanCode"));
        doc.creation_info.set_created_now();

        let mut package = Package::new("some/path");
        package.spdx_id = Some("SPDXRef-Package".to_string());
        package.download_location = Some("NOASSERTION".to_string());
        package.copyright_text = Some("Some copyright".to_string());
        package.verif_code = Some("4e3211c67a2d28fced849ee1bb76e7391b93feba".to_string());
        package.check_sum = Some(Checksum::sha1("SOME-SHA1"));
        package.license_declared = Some(LicenseField::NoAssertion);
        package.license_concluded = Some(LicenseField::NoAssertion);

        let mut file = File::new("./some/path/tofile");
        file.spdx_id = Some("SPDXRef-File".to_string());
        file.checksum = Some(Checksum::sha1("SOME-SHA1"));
        file.license_concluded = Some(LicenseField::NoAssertion);
        file.copyright_text = Some("NOASSERTION".to_string());

        let id = if or_later { "LGPL-2.1-or-later" } else { "LGPL-2.1-only" };
        file.add_lics(LicenseField::asserted(id));
        package.add_lics_from_file(LicenseField::asserted(id));
        package.add_file(file);
        doc.package = Some(package);
        doc
    }

    #[test]
    fn test_write_then_parse_round_trips() {
        let doc = sample_doc(false);
        let mut buffer = Vec::new();
        write_document(&doc, &mut buffer, true).unwrap();
        let reparsed = parse_str(std::str::from_utf8(&buffer).unwrap()).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_or_later_serializes_distinctly_and_round_trips() {
        let plain = sample_doc(false);
        let later = sample_doc(true);

        let mut plain_out = Vec::new();
        let mut later_out = Vec::new();
        write_document(&plain, &mut plain_out, true).unwrap();
        write_document(&later, &mut later_out, true).unwrap();
        assert_ne!(plain_out, later_out);
        assert!(String::from_utf8_lossy(&later_out).contains("LGPL-2.1-or-later"));

        let reparsed = parse_str(std::str::from_utf8(&later_out).unwrap()).unwrap();
        assert_eq!(reparsed, later);
    }

    #[test]
    fn test_invalid_document_fails_closed() {
        let mut doc = sample_doc(false);
        doc.creation_info.creators.clear();
        let mut buffer = Vec::new();
        let err = write_document(&doc, &mut buffer, true).unwrap_err();
        match err {
            SpdxError::InvalidDocument(messages) => {
                assert_eq!(messages, vec!["No creators defined, must have at least one."]);
            }
            other => panic!("expected InvalidDocument, got {:?}", other),
        }
        // Fail-closed: nothing was written.
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_invalid_document_written_when_validation_disabled() {
        let mut doc = sample_doc(false);
        doc.creation_info.creators.clear();
        let mut buffer = Vec::new();
        write_document(&doc, &mut buffer, false).unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_text_value_containing_close_delimiter_is_rejected() {
        let mut doc = sample_doc(false);
        doc.comment = Some("line1</text>\nline2".to_string());
        let mut buffer = Vec::new();
        let err = write_document(&doc, &mut buffer, true).unwrap_err();
        match err {
            SpdxError::InvalidInput(message) => {
                assert!(message.contains("DocumentComment"), "message: {}", message);
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_text_value_containing_open_delimiter_round_trips() {
        let mut doc = sample_doc(false);
        doc.comment = Some("see the <text> marker".to_string());
        let mut buffer = Vec::new();
        write_document(&doc, &mut buffer, true).unwrap();
        let reparsed = parse_str(std::str::from_utf8(&buffer).unwrap()).unwrap();
        assert_eq!(reparsed.comment.as_deref(), Some("see the <text> marker"));
    }

    #[test]
    fn test_record_blocks_follow_validation_walk_order() {
        use crate::models::annotation::{Annotation, AnnotationType, Relationship, Review, Snippet};
        use crate::models::license::ExtractedLicense;

        let mut doc = sample_doc(false);
        let date = doc.creation_info.created.unwrap();

        let mut extracted = ExtractedLicense::new("LicenseRef-1");
        extracted.extracted_text = Some("The verbatim text".to_string());
        doc.add_extracted_license(extracted);

        let mut review = Review::new(Creator::parse("Person: Joe Reviewer").unwrap());
        review.date = Some(date);
        doc.add_review(review);

        let mut snippet = Snippet::new("SPDXRef-Snippet");
        snippet.file_spdx_id = Some("SPDXRef-File".to_string());
        doc.add_snippet(snippet);

        let mut annotation = Annotation::new(Creator::parse("Person: Jane Annotator").unwrap());
        annotation.date = Some(date);
        annotation.annotation_type = Some(AnnotationType::Other);
        annotation.spdx_id_ref = Some("SPDXRef-Package".to_string());
        doc.add_annotation(annotation);

        doc.add_relationship(
            Relationship::parse("SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package").unwrap(),
        );

        let mut buffer = Vec::new();
        write_document(&doc, &mut buffer, true).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let position = |needle: &str| text.find(needle).unwrap();

        assert!(position("PackageName:") < position("LicenseID:"));
        assert!(position("LicenseID:") < position("Reviewer:"));
        assert!(position("Reviewer:") < position("SnippetSPDXID:"));
        assert!(position("SnippetSPDXID:") < position("Annotator:"));
        assert!(position("Annotator:") < position("Relationship:"));

        let reparsed = parse_str(&text).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_multiline_comment_round_trips() {
        let mut doc = sample_doc(false);
        doc.comment = Some("first line\nsecond line".to_string());
        let mut buffer = Vec::new();
        write_document(&doc, &mut buffer, true).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("DocumentComment: <text>first line\nsecond line</text>"));
        let reparsed = parse_str(&text).unwrap();
        assert_eq!(reparsed.comment.as_deref(), Some("first line\nsecond line"));
    }
}
