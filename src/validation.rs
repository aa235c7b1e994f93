//! Validation engine: a pure, side-effect-free walk over a [`Document`]
//! producing an ordered list of every specification violation.
//!
//! The walk order is fixed (document, creation info, package, files in list
//! order, extracted licenses, reviews, snippets, annotations, relationships)
//! because
//! downstream tooling compares the exact message sequence. Every check runs
//! regardless of earlier failures; the engine never panics and never
//! short-circuits.

use std::collections::HashSet;

use colored::Colorize;
use serde::Serialize;

use crate::models::document::Document;
use crate::models::file::File;
use crate::models::license::LicenseField;
use crate::models::package::Package;

/// Result of validating a document. `is_valid` is true iff `messages` is
/// empty.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub messages: Vec<String>,
}

impl ValidationOutcome {
    fn from_messages(messages: Vec<String>) -> Self {
        Self {
            is_valid: messages.is_empty(),
            messages,
        }
    }

    /// Convert the outcome to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Print the outcome with colors
    pub fn print_colored(&self) {
        if self.is_valid {
            println!("{}", "✓ Document is valid".green().bold());
            return;
        }
        for message in &self.messages {
            println!("{} {}", "✗".red().bold(), message);
        }
        println!();
        let count = self.messages.len();
        let noun = if count == 1 { "violation" } else { "violations" };
        println!("{}", format!("{} {}", count, noun).red().bold());
    }
}

/// Validate a document and everything it owns.
pub fn validate(document: &Document) -> ValidationOutcome {
    let mut messages = Vec::new();

    validate_document_fields(document, &mut messages);
    validate_creation_info(document, &mut messages);
    if let Some(package) = &document.package {
        validate_package(package, &mut messages);
        for file in &package.files {
            validate_file(file, &mut messages);
        }
    }
    validate_extracted_licenses(document, &mut messages);
    validate_reviews(document, &mut messages);
    validate_cross_references(document, &mut messages);

    ValidationOutcome::from_messages(messages)
}

fn validate_document_fields(document: &Document, messages: &mut Vec<String>) {
    if !document.version.is_supported() {
        messages.push(format!(
            "Document version {} is not supported.",
            document.version
        ));
    }
    if document.data_license.identifier.is_empty() {
        messages.push("Document data license must be set.".to_string());
    }
    if document.name.is_empty() {
        messages.push("Document name can not be empty.".to_string());
    }
    if document.spdx_id.is_empty() {
        messages.push("Document SPDX identifier can not be empty.".to_string());
    }
    if document.namespace.is_empty() || !document.namespace.contains("://") {
        messages.push(format!(
            "Document namespace must be a well-formed absolute URI: '{}'.",
            document.namespace
        ));
    } else if document.namespace.contains('#') {
        messages.push("Document namespace must not contain a '#' fragment.".to_string());
    }
    for reference in &document.ext_document_references {
        if reference.external_document_id.is_empty() {
            messages.push("ExternalDocumentRef id can not be empty.".to_string());
        }
        if reference.spdx_document_uri.is_empty() {
            messages.push("ExternalDocumentRef document URI can not be empty.".to_string());
        }
    }
}

fn validate_creation_info(document: &Document, messages: &mut Vec<String>) {
    let info = &document.creation_info;
    if info.creators.is_empty() {
        messages.push("No creators defined, must have at least one.".to_string());
    }
    if info.created.is_none() {
        messages.push("Creation info missing created date.".to_string());
    }
}

fn validate_package(package: &Package, messages: &mut Vec<String>) {
    if package.name.is_empty() {
        messages.push("Package name can not be empty.".to_string());
    }
    if package.check_sum.is_none() {
        messages.push("Package checksum must be provided.".to_string());
    }
    if package.download_location.is_none() {
        messages.push("Package download_location can not be None.".to_string());
    }
    if package.files_analyzed && package.verif_code.is_none() {
        messages.push("Package verif_code can not be None.".to_string());
    }
    if package.copyright_text.is_none() {
        messages.push("Package cr_text can not be None.".to_string());
    }
    if package.files_analyzed && package.files.is_empty() {
        messages.push("Package must have at least one file.".to_string());
    }
    validate_license_field(
        &package.license_concluded,
        "Package concluded license",
        messages,
    );
    validate_license_field(
        &package.license_declared,
        "Package declared license",
        messages,
    );
}

fn validate_file(file: &File, messages: &mut Vec<String>) {
    if file.name.is_empty() {
        messages.push("File name can not be empty.".to_string());
    }
    if file.checksum.is_none() {
        messages.push(format!("File {} checksum must be provided.", file.name));
    }
    validate_license_field(
        &file.license_concluded,
        &format!("File {} concluded license", file.name),
        messages,
    );
    if file.copyright_text.is_none() {
        messages.push(format!("File {} copyright text can not be None.", file.name));
    }
}

/// A license-typed field must be set to one of the three permitted kinds:
/// a license expression, NOASSERTION, or NONE. Unset is the only invalid
/// state the type system leaves representable.
fn validate_license_field(
    field: &Option<LicenseField>,
    context: &str,
    messages: &mut Vec<String>,
) {
    if field.is_none() {
        messages.push(format!(
            "{} must be a license expression, NOASSERTION or NONE.",
            context
        ));
    }
}

fn validate_extracted_licenses(document: &Document, messages: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for extracted in &document.extracted_licenses {
        if !extracted.license_ref.starts_with("LicenseRef-") {
            messages.push(format!(
                "ExtractedLicense id must begin with 'LicenseRef-': '{}'.",
                extracted.license_ref
            ));
        }
        if extracted.extracted_text.is_none() {
            messages.push(format!(
                "ExtractedLicense '{}' missing extracted text.",
                extracted.license_ref
            ));
        }
        if !seen.insert(extracted.license_ref.clone()) {
            messages.push(format!("Duplicate LicenseID '{}'.", extracted.license_ref));
        }
    }
}

fn validate_reviews(document: &Document, messages: &mut Vec<String>) {
    for review in &document.reviews {
        if review.date.is_none() {
            messages.push("Review missing review date.".to_string());
        }
    }
}

/// Every Relationship/Annotation/Snippet target must resolve within the
/// document. `DocumentRef-…` targets point outside and are accepted as-is;
/// so are the NOASSERTION/NONE tokens on the related side of a
/// relationship.
fn validate_cross_references(document: &Document, messages: &mut Vec<String>) {
    let known = known_identifiers(document);
    let resolves = |id: &str| {
        known.contains(id)
            || id.starts_with("DocumentRef-")
            || id == LicenseField::NO_ASSERTION_TOKEN
            || id == LicenseField::NONE_TOKEN
    };

    for snippet in &document.snippets {
        if snippet.spdx_id.is_empty() {
            messages.push("Snippet SPDX identifier can not be empty.".to_string());
        }
        match &snippet.file_spdx_id {
            None => messages.push(format!(
                "Snippet '{}' missing the file it was taken from.",
                snippet.spdx_id
            )),
            Some(target) if !resolves(target) => messages.push(format!(
                "Snippet '{}' refers to unknown SPDX element '{}'.",
                snippet.spdx_id, target
            )),
            Some(_) => {}
        }
    }

    for annotation in &document.annotations {
        if annotation.date.is_none() {
            messages.push("Annotation missing annotation date.".to_string());
        }
        if annotation.annotation_type.is_none() {
            messages.push("Annotation missing annotation type.".to_string());
        }
        match &annotation.spdx_id_ref {
            None => messages.push("Annotation missing SPDX identifier reference.".to_string()),
            Some(target) if !resolves(target) => messages.push(format!(
                "Annotation refers to unknown SPDX element '{}'.",
                target
            )),
            Some(_) => {}
        }
    }

    for relationship in &document.relationships {
        if !resolves(&relationship.spdx_element_id) {
            messages.push(format!(
                "Relationship refers to unknown SPDX element '{}'.",
                relationship.spdx_element_id
            ));
        }
        if !resolves(&relationship.related_element) {
            messages.push(format!(
                "Relationship refers to unknown SPDX element '{}'.",
                relationship.related_element
            ));
        }
    }
}

fn known_identifiers(document: &Document) -> HashSet<String> {
    let mut known = HashSet::new();
    known.insert(document.spdx_id.clone());
    for reference in &document.ext_document_references {
        known.insert(reference.external_document_id.clone());
    }
    if let Some(package) = &document.package {
        if let Some(id) = &package.spdx_id {
            known.insert(id.clone());
        }
        for file in &package.files {
            if let Some(id) = &file.spdx_id {
                known.insert(id.clone());
            }
        }
    }
    for snippet in &document.snippets {
        known.insert(snippet.spdx_id.clone());
    }
    known
}
