//! RDF/XML writer.
//!
//! Walks the document in the same order as the validation engine and emits
//! one typed node per entity. License expressions are anonymous in RDF, so
//! composite expressions get interned: a table keyed by the expression's
//! canonical text assigns a stable `rdf:nodeID` per serialization pass, the
//! first occurrence carries the node definition inline, and every later
//! occurrence is an empty property referencing the same node.

use std::collections::HashMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer as XmlWriter;

use crate::errors::SpdxError;
use crate::formats::rdf::{algorithm_uri, file_type_uri, LICENSE_NS, RDFS_NS, RDF_NS, SPDX_NS};
use crate::models::checksum::Checksum;
use crate::models::document::Document;
use crate::models::file::File;
use crate::models::license::{LicenseExpr, LicenseField};
use crate::models::package::Package;
use crate::validation::validate;

/// Serialize a document as RDF/XML.
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

    let mut buffer = Vec::new();
    let mut writer = RdfWriter {
        xml: XmlWriter::new_with_indent(&mut buffer, b' ', 2),
        namespace: document.namespace.clone(),
        license_nodes: HashMap::new(),
    };
    writer.write_document(document)?;

    out.write_all(&buffer)
        .map_err(|e| SpdxError::Io(e, "Failed to write RDF output".to_string()))?;
    out.write_all(b"\n")
        .map_err(|e| SpdxError::Io(e, "Failed to write RDF output".to_string()))?;
    Ok(())
}

fn xml_err<E: std::fmt::Display>(e: E) -> SpdxError {
    SpdxError::Rdf(e.to_string())
}

struct RdfWriter<'a> {
    xml: XmlWriter<&'a mut Vec<u8>>,
    namespace: String,
    /// Canonical expression text to `rdf:nodeID`, per pass.
    license_nodes: HashMap<String, String>,
}

impl RdfWriter<'_> {
    fn write_document(&mut self, document: &Document) -> Result<(), SpdxError> {
        self.xml
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)?;

        let mut root = BytesStart::new("rdf:RDF");
        root.push_attribute(("xmlns:rdf", RDF_NS));
        root.push_attribute(("xmlns:rdfs", RDFS_NS));
        root.push_attribute(("xmlns:spdx", SPDX_NS));
        self.event(Event::Start(root))?;

        let mut doc_node = BytesStart::new("spdx:SpdxDocument");
        doc_node.push_attribute((
            "rdf:about",
            self.entity_uri(&document.spdx_id).as_str(),
        ));
        self.event(Event::Start(doc_node))?;

        self.text_property("spdx:specVersion", &document.version.to_string())?;
        self.resource_property(
            "spdx:dataLicense",
            &format!("{}{}", LICENSE_NS, document.data_license),
        )?;
        self.text_property("spdx:name", &document.name)?;
        if let Some(comment) = &document.comment {
            self.text_property("rdfs:comment", comment)?;
        }

        self.open("spdx:creationInfo")?;
        self.open("spdx:CreationInfo")?;
        for creator in &document.creation_info.creators {
            self.text_property("spdx:creator", &creator.to_string())?;
        }
        if let Some(created) = &document.creation_info.created {
            self.text_property("spdx:created", &format_date(created))?;
        }
        if let Some(comment) = &document.creation_info.comment {
            self.text_property("rdfs:comment", comment)?;
        }
        if let Some(version) = &document.creation_info.license_list_version {
            self.text_property(
                "spdx:licenseListVersion",
                &format!("{}.{}", version.major, version.minor),
            )?;
        }
        self.close("spdx:CreationInfo")?;
        self.close("spdx:creationInfo")?;

        for reference in &document.ext_document_references {
            self.open("spdx:externalDocumentRef")?;
            self.open("spdx:ExternalDocumentRef")?;
            self.text_property("spdx:externalDocumentId", &reference.external_document_id)?;
            self.resource_property("spdx:spdxDocument", &reference.spdx_document_uri)?;
            self.write_checksum(&reference.checksum)?;
            self.close("spdx:ExternalDocumentRef")?;
            self.close("spdx:externalDocumentRef")?;
        }

        if let Some(package) = &document.package {
            self.open("spdx:describesPackage")?;
            self.write_package(package)?;
            self.close("spdx:describesPackage")?;
        }

        for extracted in &document.extracted_licenses {
            self.open("spdx:hasExtractedLicensingInfo")?;
            self.open("spdx:ExtractedLicensingInfo")?;
            self.text_property("spdx:licenseId", &extracted.license_ref)?;
            if let Some(name) = &extracted.name {
                self.text_property("spdx:name", name)?;
            }
            if let Some(text) = &extracted.extracted_text {
                self.text_property("spdx:extractedText", text)?;
            }
            for cross_ref in &extracted.cross_refs {
                self.text_property("rdfs:seeAlso", cross_ref)?;
            }
            if let Some(comment) = &extracted.comment {
                self.text_property("rdfs:comment", comment)?;
            }
            self.close("spdx:ExtractedLicensingInfo")?;
            self.close("spdx:hasExtractedLicensingInfo")?;
        }

        for review in &document.reviews {
            self.open("spdx:reviewed")?;
            self.open("spdx:Review")?;
            self.text_property("spdx:reviewer", &review.reviewer.to_string())?;
            if let Some(date) = &review.date {
                self.text_property("spdx:reviewDate", &format_date(date))?;
            }
            if let Some(comment) = &review.comment {
                self.text_property("rdfs:comment", comment)?;
            }
            self.close("spdx:Review")?;
            self.close("spdx:reviewed")?;
        }

        for snippet in &document.snippets {
            self.open("spdx:snippet")?;
            let mut node = BytesStart::new("spdx:Snippet");
            node.push_attribute(("rdf:about", self.entity_uri(&snippet.spdx_id).as_str()));
            self.event(Event::Start(node))?;
            if let Some(name) = &snippet.name {
                self.text_property("spdx:name", name)?;
            }
            if let Some(file_id) = &snippet.file_spdx_id {
                self.resource_property("spdx:snippetFromFile", &self.entity_uri(file_id))?;
            }
            if let Some(concluded) = &snippet.license_concluded {
                self.write_license_field("spdx:licenseConcluded", concluded)?;
            }
            for license in &snippet.licenses_in_snippet {
                self.write_license_field("spdx:licenseInfoInSnippet", license)?;
            }
            if let Some(copyright) = &snippet.copyright_text {
                self.text_property("spdx:copyrightText", copyright)?;
            }
            if let Some(comment) = &snippet.comment {
                self.text_property("rdfs:comment", comment)?;
            }
            self.close("spdx:Snippet")?;
            self.close("spdx:snippet")?;
        }

        for annotation in &document.annotations {
            self.open("spdx:annotation")?;
            self.open("spdx:Annotation")?;
            self.text_property("spdx:annotator", &annotation.annotator.to_string())?;
            if let Some(date) = &annotation.date {
                self.text_property("spdx:annotationDate", &format_date(date))?;
            }
            if let Some(ty) = &annotation.annotation_type {
                self.resource_property(
                    "spdx:annotationType",
                    &format!("{}annotationType_{}", SPDX_NS, ty.as_str().to_lowercase()),
                )?;
            }
            if let Some(target) = &annotation.spdx_id_ref {
                self.text_property("spdx:annotationRef", target)?;
            }
            if let Some(comment) = &annotation.comment {
                self.text_property("rdfs:comment", comment)?;
            }
            self.close("spdx:Annotation")?;
            self.close("spdx:annotation")?;
        }

        for relationship in &document.relationships {
            self.open("spdx:relationship")?;
            self.open("spdx:Relationship")?;
            self.text_property("spdx:spdxElementId", &relationship.spdx_element_id)?;
            self.text_property("spdx:relationshipType", &relationship.relationship_type)?;
            self.text_property("spdx:relatedSpdxElement", &relationship.related_element)?;
            if let Some(comment) = &relationship.comment {
                self.text_property("rdfs:comment", comment)?;
            }
            self.close("spdx:Relationship")?;
            self.close("spdx:relationship")?;
        }

        self.close("spdx:SpdxDocument")?;
        self.close("rdf:RDF")?;
        Ok(())
    }

    fn write_package(&mut self, package: &Package) -> Result<(), SpdxError> {
        let mut node = BytesStart::new("spdx:Package");
        if let Some(id) = &package.spdx_id {
            node.push_attribute(("rdf:about", self.entity_uri(id).as_str()));
        }
        self.event(Event::Start(node))?;

        self.text_property("spdx:name", &package.name)?;
        if let Some(version) = &package.version {
            self.text_property("spdx:versionInfo", version)?;
        }
        if let Some(file_name) = &package.file_name {
            self.text_property("spdx:packageFileName", file_name)?;
        }
        if let Some(supplier) = &package.supplier {
            self.text_property("spdx:supplier", supplier)?;
        }
        if let Some(originator) = &package.originator {
            self.text_property("spdx:originator", originator)?;
        }
        if let Some(location) = &package.download_location {
            self.text_property("spdx:downloadLocation", location)?;
        }
        if !package.files_analyzed {
            self.text_property("spdx:filesAnalyzed", "false")?;
        }
        if let Some(code) = &package.verif_code {
            self.open("spdx:packageVerificationCode")?;
            self.open("spdx:PackageVerificationCode")?;
            self.text_property("spdx:packageVerificationCodeValue", code)?;
            self.close("spdx:PackageVerificationCode")?;
            self.close("spdx:packageVerificationCode")?;
        }
        if let Some(checksum) = &package.check_sum {
            self.write_checksum(checksum)?;
        }
        if let Some(source_info) = &package.source_info {
            self.text_property("spdx:sourceInfo", source_info)?;
        }
        if let Some(concluded) = &package.license_concluded {
            self.write_license_field("spdx:licenseConcluded", concluded)?;
        }
        for license in &package.license_infos_from_files {
            self.write_license_field("spdx:licenseInfoFromFiles", license)?;
        }
        if let Some(declared) = &package.license_declared {
            self.write_license_field("spdx:licenseDeclared", declared)?;
        }
        if let Some(comment) = &package.license_comment {
            self.text_property("spdx:licenseComments", comment)?;
        }
        if let Some(copyright) = &package.copyright_text {
            self.text_property("spdx:copyrightText", copyright)?;
        }
        if let Some(summary) = &package.summary {
            self.text_property("spdx:summary", summary)?;
        }
        if let Some(description) = &package.description {
            self.text_property("spdx:description", description)?;
        }
        if let Some(comment) = &package.comment {
            self.text_property("rdfs:comment", comment)?;
        }

        for file in &package.files {
            self.open("spdx:hasFile")?;
            self.write_file(file)?;
            self.close("spdx:hasFile")?;
        }

        self.close("spdx:Package")?;
        Ok(())
    }

    fn write_file(&mut self, file: &File) -> Result<(), SpdxError> {
        let mut node = BytesStart::new("spdx:File");
        if let Some(id) = &file.spdx_id {
            node.push_attribute(("rdf:about", self.entity_uri(id).as_str()));
        }
        self.event(Event::Start(node))?;

        self.text_property("spdx:fileName", &file.name)?;
        for ty in &file.file_types {
            self.resource_property("spdx:fileType", &file_type_uri(*ty))?;
        }
        if let Some(checksum) = &file.checksum {
            self.write_checksum(checksum)?;
        }
        if let Some(concluded) = &file.license_concluded {
            self.write_license_field("spdx:licenseConcluded", concluded)?;
        }
        for license in &file.licenses_in_file {
            self.write_license_field("spdx:licenseInfoInFile", license)?;
        }
        if let Some(comment) = &file.license_comment {
            self.text_property("spdx:licenseComments", comment)?;
        }
        if let Some(copyright) = &file.copyright_text {
            self.text_property("spdx:copyrightText", copyright)?;
        }
        if let Some(comment) = &file.comment {
            self.text_property("rdfs:comment", comment)?;
        }
        if let Some(notice) = &file.notice {
            self.text_property("spdx:noticeText", notice)?;
        }
        for contributor in &file.contributors {
            self.text_property("spdx:fileContributor", contributor)?;
        }
        for dependency in &file.dependencies {
            self.text_property("spdx:fileDependency", dependency)?;
        }

        self.close("spdx:File")?;
        Ok(())
    }

    fn write_checksum(&mut self, checksum: &Checksum) -> Result<(), SpdxError> {
        self.open("spdx:checksum")?;
        self.open("spdx:Checksum")?;
        self.resource_property("spdx:algorithm", &algorithm_uri(checksum.algorithm))?;
        self.text_property("spdx:checksumValue", &checksum.value)?;
        self.close("spdx:Checksum")?;
        self.close("spdx:checksum")?;
        Ok(())
    }

    fn write_license_field(
        &mut self,
        property: &str,
        field: &LicenseField,
    ) -> Result<(), SpdxError> {
        match field {
            LicenseField::NoAssertion => {
                self.resource_property(property, &format!("{}noassertion", SPDX_NS))
            }
            LicenseField::ExplicitNone => {
                self.resource_property(property, &format!("{}none", SPDX_NS))
            }
            LicenseField::Asserted(expr) => self.write_license_expr(property, expr),
        }
    }

    fn write_license_expr(&mut self, property: &str, expr: &LicenseExpr) -> Result<(), SpdxError> {
        if let LicenseExpr::Single(license) = expr {
            // A `+` suffix survives as part of the resource identifier.
            return self.resource_property(property, &format!("{}{}", LICENSE_NS, license));
        }

        let canonical = expr.to_string();
        if let Some(node_id) = self.license_nodes.get(&canonical).cloned() {
            let mut reference = BytesStart::new(property);
            reference.push_attribute(("rdf:nodeID", node_id.as_str()));
            return self.event(Event::Empty(reference));
        }

        let node_id = format!("N{}", self.license_nodes.len());
        self.license_nodes.insert(canonical, node_id.clone());

        let type_name = match expr {
            LicenseExpr::And(_) => "spdx:ConjunctiveLicenseSet",
            LicenseExpr::Or(_) => "spdx:DisjunctiveLicenseSet",
            LicenseExpr::With(_, _) => "spdx:WithExceptionOperator",
            LicenseExpr::Single(_) => unreachable!("handled above"),
        };

        self.open(property)?;
        let mut node = BytesStart::new(type_name);
        node.push_attribute(("rdf:nodeID", node_id.as_str()));
        self.event(Event::Start(node))?;
        match expr {
            LicenseExpr::And(operands) | LicenseExpr::Or(operands) => {
                for operand in operands {
                    self.write_license_expr("spdx:member", operand)?;
                }
            }
            LicenseExpr::With(base, exception) => {
                self.write_license_expr("spdx:member", base)?;
                self.resource_property(
                    "spdx:licenseException",
                    &format!("{}{}", LICENSE_NS, exception),
                )?;
            }
            LicenseExpr::Single(_) => unreachable!("handled above"),
        }
        self.close(type_name)?;
        self.close(property)?;
        Ok(())
    }

    fn entity_uri(&self, spdx_id: &str) -> String {
        format!("{}#{}", self.namespace, spdx_id)
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), SpdxError> {
        self.xml.write_event(event).map_err(xml_err)
    }

    fn open(&mut self, name: &str) -> Result<(), SpdxError> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn close(&mut self, name: &str) -> Result<(), SpdxError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text_property(&mut self, name: &str, value: &str) -> Result<(), SpdxError> {
        self.open(name)?;
        self.event(Event::Text(BytesText::new(value)))?;
        self.close(name)
    }

    fn resource_property(&mut self, name: &str, uri: &str) -> Result<(), SpdxError> {
        let mut element = BytesStart::new(name);
        element.push_attribute(("rdf:resource", uri));
        self.event(Event::Empty(element))
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
