//! The RDF/XML graph serialization.
//!
//! Entities become typed nodes under the SPDX ontology namespace with
//! `rdf:about` identifiers derived from `{namespace}#{spdx_id}`. License
//! expressions, which have no identifier of their own, are carried as
//! anonymous nodes keyed by `rdf:nodeID`; see [`writer`] for the interning
//! scheme and [`parser`] for reference resolution.

pub mod parser;
pub mod writer;

use std::io::Read;

use crate::errors::SpdxError;
use crate::models::checksum::ChecksumAlgorithm;
use crate::models::document::Document;

pub use parser::parse_str;
pub use writer::write_document;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const SPDX_NS: &str = "http://spdx.org/rdf/terms#";
pub const LICENSE_NS: &str = "http://spdx.org/licenses/";

/// Parse an RDF/XML document from any reader.
pub fn parse<R: Read>(input: &mut R) -> Result<Document, SpdxError> {
    let mut content = String::new();
    input
        .read_to_string(&mut content)
        .map_err(|e| SpdxError::Io(e, "Failed to read RDF input".to_string()))?;
    parse_str(&content)
}

/// `spdx:algorithm` resource URI for a checksum algorithm.
pub(crate) fn algorithm_uri(algorithm: ChecksumAlgorithm) -> String {
    let suffix = match algorithm {
        ChecksumAlgorithm::Sha1 => "checksumAlgorithm_sha1",
        ChecksumAlgorithm::Sha256 => "checksumAlgorithm_sha256",
        ChecksumAlgorithm::Sha512 => "checksumAlgorithm_sha512",
        ChecksumAlgorithm::Md5 => "checksumAlgorithm_md5",
    };
    format!("{}{}", SPDX_NS, suffix)
}

/// `spdx:fileType` resource URI, e.g. `…#fileType_source` for `SOURCE`.
pub(crate) fn file_type_uri(file_type: crate::models::file::FileType) -> String {
    format!(
        "{}fileType_{}",
        SPDX_NS,
        file_type.as_str().to_lowercase()
    )
}

pub(crate) fn file_type_from_uri(uri: &str) -> Result<crate::models::file::FileType, SpdxError> {
    uri.rsplit('#')
        .next()
        .and_then(|local| local.strip_prefix("fileType_"))
        .and_then(|kind| kind.to_uppercase().parse().ok())
        .ok_or_else(|| SpdxError::Rdf(format!("Unknown file type resource: '{}'", uri)))
}

pub(crate) fn algorithm_from_uri(uri: &str) -> Result<ChecksumAlgorithm, SpdxError> {
    match uri.rsplit('#').next() {
        Some("checksumAlgorithm_sha1") => Ok(ChecksumAlgorithm::Sha1),
        Some("checksumAlgorithm_sha256") => Ok(ChecksumAlgorithm::Sha256),
        Some("checksumAlgorithm_sha512") => Ok(ChecksumAlgorithm::Sha512),
        Some("checksumAlgorithm_md5") => Ok(ChecksumAlgorithm::Md5),
        _ => Err(SpdxError::Rdf(format!(
            "Unknown checksum algorithm resource: '{}'",
            uri
        ))),
    }
}
