//! Package model.

use crate::models::checksum::Checksum;
use crate::models::file::File;
use crate::models::license::LicenseField;

/// A software package described by the document.
///
/// Every field except `name` starts unset; the validation engine, not the
/// builder, decides which omissions are violations.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub spdx_id: Option<String>,
    pub version: Option<String>,
    pub file_name: Option<String>,
    pub supplier: Option<String>,
    pub originator: Option<String>,
    /// May hold the literal `NOASSERTION`/`NONE` tokens.
    pub download_location: Option<String>,
    pub files_analyzed: bool,
    pub verif_code: Option<String>,
    pub check_sum: Option<Checksum>,
    pub source_info: Option<String>,
    pub license_concluded: Option<LicenseField>,
    /// Licenses found in the package's files, deduplicated, source order.
    pub license_infos_from_files: Vec<LicenseField>,
    pub license_declared: Option<LicenseField>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub files: Vec<File>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spdx_id: None,
            version: None,
            file_name: None,
            supplier: None,
            originator: None,
            download_location: None,
            files_analyzed: true,
            verif_code: None,
            check_sum: None,
            source_info: None,
            license_concluded: None,
            license_infos_from_files: Vec::new(),
            license_declared: None,
            license_comment: None,
            copyright_text: None,
            summary: None,
            description: None,
            comment: None,
            files: Vec::new(),
        }
    }

    /// Append a file, preserving insertion order.
    pub fn add_file(&mut self, file: File) {
        self.files.push(file);
    }

    /// Record a license seen in one of the package's files. Duplicates
    /// (by serialized form) are dropped.
    pub fn add_lics_from_file(&mut self, license: LicenseField) {
        let key = license.to_string();
        if !self
            .license_infos_from_files
            .iter()
            .any(|existing| existing.to_string() == key)
        {
            self.license_infos_from_files.push(license);
        }
    }
}
