//! The in-memory SPDX document model.
//!
//! `Document` is the hub: both codecs and the validation engine depend on
//! it and nothing else. All entity equality is structural so round-trip
//! tests can compare parsed and written documents directly.

pub mod annotation;
pub mod checksum;
pub mod document;
pub mod file;
pub mod license;
pub mod package;

pub use annotation::{Annotation, AnnotationType, Relationship, Review, Snippet};
pub use checksum::{Checksum, ChecksumAlgorithm};
pub use document::{
    CreationInfo, Creator, Document, ExternalDocumentRef, Version, SUPPORTED_VERSIONS,
};
pub use file::{File, FileType};
pub use license::{ExtractedLicense, License, LicenseExpr, LicenseField};
pub use package::Package;
