//! End-to-end round-trip tests across both codecs.
//!
//! A document is built through the model API, serialized, parsed back, and
//! compared structurally. The same document goes through both formats and
//! through the cross-format path (tag/value out, RDF in, and back).

use std::io::Cursor;

use pretty_assertions::assert_eq;

use spdx_toolkit::formats::{rdf, tagvalue, Format};
use spdx_toolkit::models::annotation::{
    Annotation, AnnotationType, Relationship, Review, Snippet,
};
use spdx_toolkit::models::checksum::Checksum;
use spdx_toolkit::models::document::{Creator, Document, ExternalDocumentRef, Version};
use spdx_toolkit::models::file::{File, FileType};
use spdx_toolkit::models::license::{
    ExtractedLicense, License, LicenseExpr, LicenseField,
};
use spdx_toolkit::models::package::Package;
use spdx_toolkit::validation::validate;
use spdx_toolkit::{parse_document, write_document};

fn rich_document() -> Document {
    let mut doc = Document::new(
        Version::new(2, 1),
        License::from_identifier("CC0-1.0"),
        "Sample_Document-V2.1",
        "SPDXRef-DOCUMENT",
        "https://spdx.org/spdxdocs/spdx-example-444504E0-4F89-41D3-9A0C-0305E82C3301",
    );
    doc.comment = Some("A document-level comment.".to_string());
    doc.creation_info
        .add_creator(Creator::tool("ScanCode"));
    doc.creation_info.add_creator(Creator::Person {
        name: "Jane Doe".to_string(),
        email: Some("jane@example.com".to_string()),
    });
    doc.creation_info.set_created_now();
    doc.creation_info.comment = Some("Created for testing.".to_string());
    doc.creation_info.license_list_version = Some(Version::new(2, 6));

    doc.add_ext_document_reference(ExternalDocumentRef::new(
        "DocumentRef-spdx-tool-2.1",
        "https://spdx.org/spdxdocs/spdx-tools-v2.1-3F2504E0-4F89-41D3-9A0C-0305E82C3301",
        Checksum::sha1("d6a770ba38583ed4bb4525bd96e50461655d2759"),
    ));

    let mut package = Package::new("some/path");
    package.spdx_id = Some("SPDXRef-Package".to_string());
    package.version = Some("0.1.0".to_string());
    package.file_name = Some("some-path-0.1.0.tar.gz".to_string());
    package.supplier = Some("Organization: Acme Inc.".to_string());
    package.originator = Some("Person: John Doe".to_string());
    package.download_location = Some("http://example.com/some-path-0.1.0.tar.gz".to_string());
    package.verif_code = Some("4e3211c67a2d28fced849ee1bb76e7391b93feba".to_string());
    package.check_sum = Some(Checksum::sha1("SOME-SHA1"));
    package.source_info = Some("Built from the upstream release tarball.".to_string());
    package.license_concluded = Some(LicenseField::Asserted(
        LicenseExpr::parse("MIT OR Apache-2.0").unwrap(),
    ));
    package.license_declared = Some(LicenseField::Asserted(
        LicenseExpr::parse("MIT OR Apache-2.0").unwrap(),
    ));
    package.license_comment = Some("Dual licensed upstream.".to_string());
    package.copyright_text = Some("Copyright 2010, 2011 Acme Inc.".to_string());
    package.summary = Some("A sample package.".to_string());
    package.description = Some("A longer description of the sample package.".to_string());
    package.comment = Some("A package-level comment.".to_string());
    package.add_lics_from_file(LicenseField::asserted("MIT"));
    package.add_lics_from_file(LicenseField::asserted("Apache-2.0"));
    package.add_lics_from_file(LicenseField::asserted("LicenseRef-Custom"));

    let mut file = File::new("./some/path/tofile");
    file.spdx_id = Some("SPDXRef-File".to_string());
    file.file_types = vec![FileType::Source, FileType::Text];
    file.checksum = Some(Checksum::sha1("d6a770ba38583ed4bb4525bd96e50461655d2759"));
    file.license_concluded = Some(LicenseField::Asserted(
        LicenseExpr::parse("GPL-2.0-only WITH Classpath-exception-2.0").unwrap(),
    ));
    file.add_lics(LicenseField::asserted("MIT"));
    file.add_lics(LicenseField::asserted("LicenseRef-Custom"));
    file.license_comment = Some("Matched by scanner.".to_string());
    file.copyright_text = Some("NOASSERTION".to_string());
    file.notice = Some("This file is provided as-is.".to_string());
    file.comment = Some("A file-level comment.".to_string());
    file.contributors.push("Jane Doe".to_string());
    file.dependencies.push("./some/path/other".to_string());
    package.add_file(file);
    doc.package = Some(package);

    let mut snippet = Snippet::new("SPDXRef-Snippet");
    snippet.name = Some("embedded parser".to_string());
    snippet.file_spdx_id = Some("SPDXRef-File".to_string());
    snippet.license_concluded = Some(LicenseField::asserted("MIT"));
    snippet.licenses_in_snippet.push(LicenseField::asserted("MIT"));
    snippet.copyright_text = Some("Copyright 2014 Acme Inc.".to_string());
    snippet.comment = Some("Taken from the reference parser.".to_string());
    doc.add_snippet(snippet);

    let mut extracted = ExtractedLicense::new("LicenseRef-Custom");
    extracted.name = Some("Custom License".to_string());
    extracted.extracted_text = Some("Permission is granted to use this software.".to_string());
    extracted.cross_refs.push("http://example.com/license".to_string());
    extracted.comment = Some("Found in three files.".to_string());
    doc.add_extracted_license(extracted);

    let mut review = Review::new(Creator::Person {
        name: "Joe Reviewer".to_string(),
        email: None,
    });
    review.date = doc.creation_info.created;
    review.comment = Some("Looks complete.".to_string());
    doc.add_review(review);

    let mut annotation = Annotation::new(Creator::tool("Auditor"));
    annotation.date = doc.creation_info.created;
    annotation.annotation_type = Some(AnnotationType::Other);
    annotation.spdx_id_ref = Some("SPDXRef-Package".to_string());
    annotation.comment = Some("Checked against the manifest.".to_string());
    doc.add_annotation(annotation);

    doc.add_relationship(
        Relationship::parse("SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package").unwrap(),
    );
    let mut amends =
        Relationship::parse("SPDXRef-DOCUMENT AMENDS DocumentRef-spdx-tool-2.1:SPDXRef-DOCUMENT")
            .unwrap();
    amends.comment = Some("Supersedes the earlier scan.".to_string());
    doc.add_relationship(amends);

    doc
}

#[test]
fn test_rich_document_is_valid() {
    let outcome = validate(&rich_document());
    assert_eq!(outcome.messages, Vec::<String>::new());
    assert!(outcome.is_valid);
}

#[test]
fn test_tag_value_round_trip() {
    let doc = rich_document();
    let mut buffer = Vec::new();
    write_document(&doc, &mut buffer, Format::TagValue, true).unwrap();
    let reparsed = parse_document(&buffer, Format::TagValue).unwrap();
    assert_eq!(reparsed, doc);
}

#[test]
fn test_rdf_round_trip() {
    let doc = rich_document();
    let mut buffer = Vec::new();
    write_document(&doc, &mut buffer, Format::Rdf, true).unwrap();
    let reparsed = parse_document(&buffer, Format::Rdf).unwrap();
    assert_eq!(reparsed, doc);
}

#[test]
fn test_cross_format_round_trip() {
    let doc = rich_document();

    let mut tag_value = Vec::new();
    write_document(&doc, &mut tag_value, Format::TagValue, true).unwrap();
    let from_tag_value = parse_document(&tag_value, Format::TagValue).unwrap();

    let mut rdf_out = Vec::new();
    write_document(&from_tag_value, &mut rdf_out, Format::Rdf, true).unwrap();
    let from_rdf = parse_document(&rdf_out, Format::Rdf).unwrap();

    assert_eq!(from_rdf, doc);
}

#[test]
fn test_reader_based_parsers() {
    let doc = rich_document();

    let mut tag_value = Vec::new();
    write_document(&doc, &mut tag_value, Format::TagValue, true).unwrap();
    let mut cursor = Cursor::new(tag_value);
    assert_eq!(tagvalue::parse(&mut cursor).unwrap(), doc);

    let mut rdf_out = Vec::new();
    write_document(&doc, &mut rdf_out, Format::Rdf, true).unwrap();
    let mut cursor = Cursor::new(rdf_out);
    assert_eq!(rdf::parse(&mut cursor).unwrap(), doc);
}

#[test]
fn test_format_detection_matches_output() {
    let doc = rich_document();

    let mut tag_value = Vec::new();
    write_document(&doc, &mut tag_value, Format::TagValue, true).unwrap();
    assert_eq!(Format::from_content(&tag_value).unwrap(), Format::TagValue);

    let mut rdf_out = Vec::new();
    write_document(&doc, &mut rdf_out, Format::Rdf, true).unwrap();
    assert_eq!(Format::from_content(&rdf_out).unwrap(), Format::Rdf);
}

#[test]
fn test_or_later_survives_both_formats() {
    let mut doc = rich_document();
    {
        let file = &mut doc.package.as_mut().unwrap().files[0];
        file.licenses_in_file = vec![
            LicenseField::asserted("LGPL-2.1-only"),
            LicenseField::asserted("LGPL-2.1-or-later"),
            LicenseField::asserted("GPL-2.0+"),
        ];
    }

    for format in [Format::TagValue, Format::Rdf] {
        let mut buffer = Vec::new();
        write_document(&doc, &mut buffer, format, false).unwrap();
        let reparsed = parse_document(&buffer, format).unwrap();
        let lics = &reparsed.package.unwrap().files[0].licenses_in_file;
        assert_eq!(
            lics,
            &[
                LicenseField::asserted("LGPL-2.1-only"),
                LicenseField::asserted("LGPL-2.1-or-later"),
                LicenseField::asserted("GPL-2.0+"),
            ]
        );
    }
}

#[test]
fn test_sentinels_survive_both_formats() {
    let mut doc = rich_document();
    {
        let package = doc.package.as_mut().unwrap();
        package.download_location = Some("NOASSERTION".to_string());
        package.license_concluded = Some(LicenseField::NoAssertion);
        package.license_declared = Some(LicenseField::ExplicitNone);
    }

    for format in [Format::TagValue, Format::Rdf] {
        let mut buffer = Vec::new();
        write_document(&doc, &mut buffer, format, true).unwrap();
        let reparsed = parse_document(&buffer, format).unwrap();
        let package = reparsed.package.unwrap();
        assert_eq!(package.download_location.as_deref(), Some("NOASSERTION"));
        assert_eq!(package.license_concluded, Some(LicenseField::NoAssertion));
        assert_eq!(package.license_declared, Some(LicenseField::ExplicitNone));
    }
}

#[test]
fn test_invalid_document_is_refused_by_both_writers() {
    let mut doc = rich_document();
    doc.creation_info.creators.clear();

    for format in [Format::TagValue, Format::Rdf] {
        let mut buffer = Vec::new();
        let err = write_document(&doc, &mut buffer, format, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("No creators defined"), "{}", message);
        assert!(buffer.is_empty());
    }
}
