//! File model.

use std::fmt;
use std::str::FromStr;

use crate::errors::SpdxError;
use crate::models::checksum::Checksum;
use crate::models::license::LicenseField;

/// File kind markers from the SPDX vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Source,
    Binary,
    Archive,
    Application,
    Audio,
    Image,
    Text,
    Video,
    Documentation,
    Spdx,
    Other,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Source => "SOURCE",
            FileType::Binary => "BINARY",
            FileType::Archive => "ARCHIVE",
            FileType::Application => "APPLICATION",
            FileType::Audio => "AUDIO",
            FileType::Image => "IMAGE",
            FileType::Text => "TEXT",
            FileType::Video => "VIDEO",
            FileType::Documentation => "DOCUMENTATION",
            FileType::Spdx => "SPDX",
            FileType::Other => "OTHER",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = SpdxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SOURCE" => Ok(FileType::Source),
            "BINARY" => Ok(FileType::Binary),
            "ARCHIVE" => Ok(FileType::Archive),
            "APPLICATION" => Ok(FileType::Application),
            "AUDIO" => Ok(FileType::Audio),
            "IMAGE" => Ok(FileType::Image),
            "TEXT" => Ok(FileType::Text),
            "VIDEO" => Ok(FileType::Video),
            "DOCUMENTATION" => Ok(FileType::Documentation),
            "SPDX" => Ok(FileType::Spdx),
            "OTHER" => Ok(FileType::Other),
            other => Err(SpdxError::InvalidInput(format!(
                "Unknown file type: '{}'",
                other
            ))),
        }
    }
}

/// A single file inside a package.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub name: String,
    pub spdx_id: Option<String>,
    pub file_types: Vec<FileType>,
    pub checksum: Option<Checksum>,
    pub license_concluded: Option<LicenseField>,
    /// Licenses found in the file, source order.
    pub licenses_in_file: Vec<LicenseField>,
    pub license_comment: Option<String>,
    /// May hold the literal `NOASSERTION`/`NONE` tokens.
    pub copyright_text: Option<String>,
    pub notice: Option<String>,
    pub comment: Option<String>,
    pub contributors: Vec<String>,
    pub dependencies: Vec<String>,
}

impl File {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spdx_id: None,
            file_types: Vec::new(),
            checksum: None,
            license_concluded: None,
            licenses_in_file: Vec::new(),
            license_comment: None,
            copyright_text: None,
            notice: None,
            comment: None,
            contributors: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Record a license found in this file, preserving source order.
    pub fn add_lics(&mut self, license: LicenseField) {
        self.licenses_in_file.push(license);
    }
}
