//! RDF/XML parser.
//!
//! Two stages: a small generic element-tree reader on top of quick-xml's
//! event stream, then an interpretation pass that walks the tree, resolves
//! `rdf:nodeID` references against the definitions seen anywhere in the
//! graph, and rebuilds the [`Document`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::SpdxError;
use crate::formats::rdf::{algorithm_from_uri, file_type_from_uri, LICENSE_NS, SPDX_NS};
use crate::models::annotation::{Annotation, Relationship, Review, Snippet};
use crate::models::checksum::Checksum;
use crate::models::document::{
    CreationInfo, Creator, Document, ExternalDocumentRef, Version,
};
use crate::models::file::File;
use crate::models::license::{ExtractedLicense, License, LicenseExpr, LicenseField};
use crate::models::package::Package;

/// Parse an RDF/XML document.
pub fn parse_str(input: &str) -> Result<Document, SpdxError> {
    let root = read_tree(input)?;
    if root.local() != "RDF" {
        return Err(SpdxError::Rdf(format!(
            "Expected rdf:RDF root element, found '{}'",
            root.name
        )));
    }
    let doc_node = root
        .child("SpdxDocument")
        .ok_or_else(|| SpdxError::Rdf("Missing spdx:SpdxDocument element".to_string()))?;

    let mut definitions = HashMap::new();
    collect_node_definitions(&root, &mut definitions);

    build_document(doc_node, &definitions)
}

// ---------------------------------------------------------------------------
// Element tree

#[derive(Debug, Clone, Default)]
struct Element {
    /// Qualified name as written, e.g. `spdx:name`.
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

fn local_name(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

impl Element {
    fn local(&self) -> &str {
        local_name(&self.name)
    }

    /// Attribute lookup by local name, namespace prefix ignored.
    fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local_name(key) == local)
            .map(|(_, value)| value.as_str())
    }

    fn child(&self, local: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.local() == local)
    }

    fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.local() == local)
    }

    /// Verbatim character content. Indentation never lands here: runs of
    /// pure whitespace are dropped while the tree is read, so what remains
    /// is significant, padding included.
    fn text(&self) -> &str {
        &self.text
    }

    fn child_text(&self, local: &str) -> Option<&str> {
        self.child(local).map(|c| c.text()).filter(|t| !t.is_empty())
    }
}

fn rdf_err<E: std::fmt::Display>(e: E) -> SpdxError {
    SpdxError::Rdf(e.to_string())
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, SpdxError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(rdf_err)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(rdf_err)?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn read_tree(input: &str) -> Result<Element, SpdxError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(rdf_err)? {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| SpdxError::Rdf("Unbalanced closing tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(rdf_err)?;
                // Whitespace-only runs are indentation, not content.
                if !value.trim().is_empty() {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&value);
                    }
                }
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    root.ok_or_else(|| SpdxError::Rdf("No root element found".to_string()))
}

/// Collect every element carrying an `rdf:nodeID` definition (an id plus
/// content), keyed by id, so empty back-references can be resolved.
fn collect_node_definitions(element: &Element, out: &mut HashMap<String, Element>) {
    for child in &element.children {
        if let Some(id) = child.attr("nodeID") {
            if !child.children.is_empty() {
                out.insert(id.to_string(), child.clone());
            }
        }
        collect_node_definitions(child, out);
    }
}

// ---------------------------------------------------------------------------
// Interpretation

type Definitions = HashMap<String, Element>;

fn build_document(node: &Element, defs: &Definitions) -> Result<Document, SpdxError> {
    let about = node
        .attr("about")
        .ok_or_else(|| SpdxError::Rdf("SpdxDocument is missing rdf:about".to_string()))?;
    let (namespace, spdx_id) = about.split_once('#').ok_or_else(|| {
        SpdxError::Rdf(format!(
            "Malformed document URI '{}', expected '{{namespace}}#{{id}}'",
            about
        ))
    })?;

    let version: Version = node
        .child_text("specVersion")
        .ok_or_else(|| SpdxError::Rdf("Missing spdx:specVersion".to_string()))?
        .parse()
        .map_err(rdf_err)?;

    let data_license = node
        .child("dataLicense")
        .and_then(|c| c.attr("resource"))
        .and_then(|uri| uri.strip_prefix(LICENSE_NS))
        .map(License::from_identifier)
        .ok_or_else(|| SpdxError::Rdf("Missing spdx:dataLicense resource".to_string()))?;

    let name = node
        .child_text("name")
        .ok_or_else(|| SpdxError::Rdf("Missing spdx:name".to_string()))?;

    let mut document = Document::new(version, data_license, name, spdx_id, namespace);
    document.comment = node.child_text("comment").map(str::to_string);
    document.creation_info = node
        .child("creationInfo")
        .and_then(|c| c.child("CreationInfo"))
        .map(build_creation_info)
        .transpose()?
        .unwrap_or_default();

    for reference in node.children_named("externalDocumentRef") {
        let inner = reference.child("ExternalDocumentRef").ok_or_else(|| {
            SpdxError::Rdf("externalDocumentRef without ExternalDocumentRef node".to_string())
        })?;
        let id = inner
            .child_text("externalDocumentId")
            .ok_or_else(|| SpdxError::Rdf("Missing spdx:externalDocumentId".to_string()))?;
        let uri = inner
            .child("spdxDocument")
            .and_then(|c| c.attr("resource"))
            .ok_or_else(|| SpdxError::Rdf("Missing spdx:spdxDocument resource".to_string()))?;
        let checksum = build_checksum(inner.child("checksum").ok_or_else(|| {
            SpdxError::Rdf("ExternalDocumentRef is missing a checksum".to_string())
        })?)?;
        document.add_ext_document_reference(ExternalDocumentRef::new(id, uri, checksum));
    }

    if let Some(package_node) = node
        .child("describesPackage")
        .and_then(|c| c.child("Package"))
    {
        document.package = Some(build_package(package_node, defs)?);
    }

    for snippet_property in node.children_named("snippet") {
        let snippet_node = snippet_property
            .child("Snippet")
            .ok_or_else(|| SpdxError::Rdf("snippet without Snippet node".to_string()))?;
        document.add_snippet(build_snippet(snippet_node, defs)?);
    }

    for extracted_property in node.children_named("hasExtractedLicensingInfo") {
        let extracted_node = extracted_property.child("ExtractedLicensingInfo").ok_or_else(|| {
            SpdxError::Rdf("hasExtractedLicensingInfo without ExtractedLicensingInfo".to_string())
        })?;
        document.add_extracted_license(build_extracted_license(extracted_node)?);
    }

    for review_property in node.children_named("reviewed") {
        let review_node = review_property
            .child("Review")
            .ok_or_else(|| SpdxError::Rdf("reviewed without Review node".to_string()))?;
        document.add_review(build_review(review_node)?);
    }

    for annotation_property in node.children_named("annotation") {
        let annotation_node = annotation_property
            .child("Annotation")
            .ok_or_else(|| SpdxError::Rdf("annotation without Annotation node".to_string()))?;
        document.add_annotation(build_annotation(annotation_node)?);
    }

    for relationship_property in node.children_named("relationship") {
        let relationship_node = relationship_property
            .child("Relationship")
            .ok_or_else(|| SpdxError::Rdf("relationship without Relationship node".to_string()))?;
        document.add_relationship(build_relationship(relationship_node)?);
    }

    Ok(document)
}

fn build_creation_info(node: &Element) -> Result<CreationInfo, SpdxError> {
    let mut info = CreationInfo::default();
    for creator in node.children_named("creator") {
        info.add_creator(Creator::parse(creator.text()).map_err(rdf_err)?);
    }
    info.created = node.child_text("created").map(parse_date).transpose()?;
    info.comment = node.child_text("comment").map(str::to_string);
    info.license_list_version = node
        .child_text("licenseListVersion")
        .map(|v| v.parse().map_err(rdf_err))
        .transpose()?;
    Ok(info)
}

fn build_package(node: &Element, defs: &Definitions) -> Result<Package, SpdxError> {
    let name = node
        .child_text("name")
        .ok_or_else(|| SpdxError::Rdf("Package is missing spdx:name".to_string()))?;
    let mut package = Package::new(name);
    package.spdx_id = fragment_of(node.attr("about"));
    package.version = node.child_text("versionInfo").map(str::to_string);
    package.file_name = node.child_text("packageFileName").map(str::to_string);
    package.supplier = node.child_text("supplier").map(str::to_string);
    package.originator = node.child_text("originator").map(str::to_string);
    package.download_location = node.child_text("downloadLocation").map(str::to_string);
    package.files_analyzed = node.child_text("filesAnalyzed") != Some("false");
    package.verif_code = node
        .child("packageVerificationCode")
        .and_then(|c| c.child("PackageVerificationCode"))
        .and_then(|c| c.child_text("packageVerificationCodeValue"))
        .map(str::to_string);
    package.check_sum = node.child("checksum").map(build_checksum).transpose()?;
    package.source_info = node.child_text("sourceInfo").map(str::to_string);
    package.license_concluded = node
        .child("licenseConcluded")
        .map(|c| build_license_field(c, defs))
        .transpose()?;
    for info in node.children_named("licenseInfoFromFiles") {
        package.add_lics_from_file(build_license_field(info, defs)?);
    }
    package.license_declared = node
        .child("licenseDeclared")
        .map(|c| build_license_field(c, defs))
        .transpose()?;
    package.license_comment = node.child_text("licenseComments").map(str::to_string);
    package.copyright_text = node.child_text("copyrightText").map(str::to_string);
    package.summary = node.child_text("summary").map(str::to_string);
    package.description = node.child_text("description").map(str::to_string);
    package.comment = node.child_text("comment").map(str::to_string);

    for file_property in node.children_named("hasFile") {
        let file_node = file_property
            .child("File")
            .ok_or_else(|| SpdxError::Rdf("hasFile without File node".to_string()))?;
        package.add_file(build_file(file_node, defs)?);
    }
    Ok(package)
}

fn build_file(node: &Element, defs: &Definitions) -> Result<File, SpdxError> {
    let name = node
        .child_text("fileName")
        .ok_or_else(|| SpdxError::Rdf("File is missing spdx:fileName".to_string()))?;
    let mut file = File::new(name);
    file.spdx_id = fragment_of(node.attr("about"));
    for ty in node.children_named("fileType") {
        let uri = ty
            .attr("resource")
            .ok_or_else(|| SpdxError::Rdf("spdx:fileType without rdf:resource".to_string()))?;
        file.file_types.push(file_type_from_uri(uri)?);
    }
    file.checksum = node.child("checksum").map(build_checksum).transpose()?;
    file.license_concluded = node
        .child("licenseConcluded")
        .map(|c| build_license_field(c, defs))
        .transpose()?;
    for info in node.children_named("licenseInfoInFile") {
        file.add_lics(build_license_field(info, defs)?);
    }
    file.license_comment = node.child_text("licenseComments").map(str::to_string);
    file.copyright_text = node.child_text("copyrightText").map(str::to_string);
    file.comment = node.child_text("comment").map(str::to_string);
    file.notice = node.child_text("noticeText").map(str::to_string);
    for contributor in node.children_named("fileContributor") {
        file.contributors.push(contributor.text().to_string());
    }
    for dependency in node.children_named("fileDependency") {
        file.dependencies.push(dependency.text().to_string());
    }
    Ok(file)
}

fn build_snippet(node: &Element, defs: &Definitions) -> Result<Snippet, SpdxError> {
    let spdx_id = fragment_of(node.attr("about"))
        .ok_or_else(|| SpdxError::Rdf("Snippet is missing rdf:about".to_string()))?;
    let mut snippet = Snippet::new(spdx_id);
    snippet.name = node.child_text("name").map(str::to_string);
    snippet.file_spdx_id = node
        .child("snippetFromFile")
        .and_then(|c| c.attr("resource"))
        .and_then(|uri| uri.rsplit('#').next())
        .map(str::to_string);
    snippet.license_concluded = node
        .child("licenseConcluded")
        .map(|c| build_license_field(c, defs))
        .transpose()?;
    for info in node.children_named("licenseInfoInSnippet") {
        snippet
            .licenses_in_snippet
            .push(build_license_field(info, defs)?);
    }
    snippet.copyright_text = node.child_text("copyrightText").map(str::to_string);
    snippet.comment = node.child_text("comment").map(str::to_string);
    Ok(snippet)
}

fn build_extracted_license(node: &Element) -> Result<ExtractedLicense, SpdxError> {
    let license_ref = node
        .child_text("licenseId")
        .ok_or_else(|| SpdxError::Rdf("ExtractedLicensingInfo is missing licenseId".to_string()))?;
    let mut extracted = ExtractedLicense::new(license_ref);
    extracted.name = node.child_text("name").map(str::to_string);
    extracted.extracted_text = node.child_text("extractedText").map(str::to_string);
    for see_also in node.children_named("seeAlso") {
        extracted.cross_refs.push(see_also.text().to_string());
    }
    extracted.comment = node.child_text("comment").map(str::to_string);
    Ok(extracted)
}

fn build_review(node: &Element) -> Result<Review, SpdxError> {
    let reviewer = node
        .child_text("reviewer")
        .ok_or_else(|| SpdxError::Rdf("Review is missing spdx:reviewer".to_string()))?;
    let mut review = Review::new(Creator::parse(reviewer).map_err(rdf_err)?);
    review.date = node.child_text("reviewDate").map(parse_date).transpose()?;
    review.comment = node.child_text("comment").map(str::to_string);
    Ok(review)
}

fn build_annotation(node: &Element) -> Result<Annotation, SpdxError> {
    let annotator = node
        .child_text("annotator")
        .ok_or_else(|| SpdxError::Rdf("Annotation is missing spdx:annotator".to_string()))?;
    let mut annotation = Annotation::new(Creator::parse(annotator).map_err(rdf_err)?);
    annotation.date = node
        .child_text("annotationDate")
        .map(parse_date)
        .transpose()?;
    annotation.annotation_type = node
        .child("annotationType")
        .and_then(|c| c.attr("resource"))
        .map(|uri| {
            uri.rsplit('#')
                .next()
                .and_then(|local| local.strip_prefix("annotationType_"))
                .and_then(|kind| kind.to_uppercase().parse().ok())
                .ok_or_else(|| SpdxError::Rdf(format!("Unknown annotation type: '{}'", uri)))
        })
        .transpose()?;
    annotation.spdx_id_ref = node.child_text("annotationRef").map(str::to_string);
    annotation.comment = node.child_text("comment").map(str::to_string);
    Ok(annotation)
}

fn build_relationship(node: &Element) -> Result<Relationship, SpdxError> {
    let spdx_element_id = node
        .child_text("spdxElementId")
        .ok_or_else(|| SpdxError::Rdf("Relationship is missing spdxElementId".to_string()))?;
    let relationship_type = node
        .child_text("relationshipType")
        .ok_or_else(|| SpdxError::Rdf("Relationship is missing relationshipType".to_string()))?;
    let related_element = node
        .child_text("relatedSpdxElement")
        .ok_or_else(|| SpdxError::Rdf("Relationship is missing relatedSpdxElement".to_string()))?;
    Ok(Relationship {
        spdx_element_id: spdx_element_id.to_string(),
        relationship_type: relationship_type.to_string(),
        related_element: related_element.to_string(),
        comment: node.child_text("comment").map(str::to_string),
    })
}

fn build_checksum(property: &Element) -> Result<Checksum, SpdxError> {
    let node = property
        .child("Checksum")
        .ok_or_else(|| SpdxError::Rdf("checksum without Checksum node".to_string()))?;
    let algorithm = node
        .child("algorithm")
        .and_then(|c| c.attr("resource"))
        .ok_or_else(|| SpdxError::Rdf("Checksum is missing spdx:algorithm".to_string()))?;
    let value = node
        .child_text("checksumValue")
        .ok_or_else(|| SpdxError::Rdf("Checksum is missing spdx:checksumValue".to_string()))?;
    Ok(Checksum::new(algorithm_from_uri(algorithm)?, value))
}

fn build_license_field(property: &Element, defs: &Definitions) -> Result<LicenseField, SpdxError> {
    if let Some(resource) = property.attr("resource") {
        if resource == format!("{}noassertion", SPDX_NS) {
            return Ok(LicenseField::NoAssertion);
        }
        if resource == format!("{}none", SPDX_NS) {
            return Ok(LicenseField::ExplicitNone);
        }
    }
    Ok(LicenseField::Asserted(build_license_expr(property, defs)?))
}

fn build_license_expr(property: &Element, defs: &Definitions) -> Result<LicenseExpr, SpdxError> {
    if let Some(resource) = property.attr("resource") {
        return resource
            .strip_prefix(LICENSE_NS)
            .map(|id| LicenseExpr::Single(License::from_identifier(id)))
            .ok_or_else(|| {
                SpdxError::Rdf(format!("Unexpected license resource: '{}'", resource))
            });
    }
    if property.children.is_empty() {
        let node_id = property.attr("nodeID").ok_or_else(|| {
            SpdxError::Rdf(format!(
                "License property '{}' has neither resource nor content",
                property.name
            ))
        })?;
        let definition = defs.get(node_id).ok_or_else(|| {
            SpdxError::Rdf(format!("Unresolved rdf:nodeID reference: '{}'", node_id))
        })?;
        return build_license_set(definition, defs);
    }
    build_license_set(&property.children[0], defs)
}

fn build_license_set(node: &Element, defs: &Definitions) -> Result<LicenseExpr, SpdxError> {
    match node.local() {
        "ConjunctiveLicenseSet" => {
            let members = node
                .children_named("member")
                .map(|m| build_license_expr(m, defs))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(LicenseExpr::And(members))
        }
        "DisjunctiveLicenseSet" => {
            let members = node
                .children_named("member")
                .map(|m| build_license_expr(m, defs))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(LicenseExpr::Or(members))
        }
        "WithExceptionOperator" => {
            let member = node
                .child("member")
                .ok_or_else(|| {
                    SpdxError::Rdf("WithExceptionOperator is missing spdx:member".to_string())
                })
                .and_then(|m| build_license_expr(m, defs))?;
            let exception = node
                .child("licenseException")
                .and_then(|c| c.attr("resource"))
                .and_then(|uri| uri.strip_prefix(LICENSE_NS))
                .ok_or_else(|| {
                    SpdxError::Rdf(
                        "WithExceptionOperator is missing spdx:licenseException".to_string(),
                    )
                })?;
            Ok(LicenseExpr::With(Box::new(member), exception.to_string()))
        }
        other => Err(SpdxError::Rdf(format!(
            "Unknown license set element: '{}'",
            other
        ))),
    }
}

fn fragment_of(uri: Option<&str>) -> Option<String> {
    uri.and_then(|u| u.rsplit('#').next()).map(str::to_string)
}

fn parse_date(text: &str) -> Result<DateTime<Utc>, SpdxError> {
    DateTime::parse_from_rfc3339(text)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| SpdxError::Rdf(format!("Invalid date '{}': {}", text, e)))
}
