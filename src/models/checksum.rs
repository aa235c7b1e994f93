//! Checksum model: a supported hash algorithm plus a hex digest string.

use std::fmt;
use std::str::FromStr;

use crate::errors::SpdxError;

/// Hash algorithms accepted in checksum fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha256,
    Sha512,
    Md5,
}

impl ChecksumAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::Sha1 => "SHA1",
            ChecksumAlgorithm::Sha256 => "SHA256",
            ChecksumAlgorithm::Sha512 => "SHA512",
            ChecksumAlgorithm::Md5 => "MD5",
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = SpdxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHA1" => Ok(ChecksumAlgorithm::Sha1),
            "SHA256" => Ok(ChecksumAlgorithm::Sha256),
            "SHA512" => Ok(ChecksumAlgorithm::Sha512),
            "MD5" => Ok(ChecksumAlgorithm::Md5),
            other => Err(SpdxError::InvalidInput(format!(
                "Unsupported checksum algorithm: '{}'",
                other
            ))),
        }
    }
}

/// A checksum record, e.g. `SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    pub value: String,
}

impl Checksum {
    pub fn new(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> Self {
        Self {
            algorithm,
            value: value.into(),
        }
    }

    pub fn sha1(value: impl Into<String>) -> Self {
        Self::new(ChecksumAlgorithm::Sha1, value)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.algorithm, self.value)
    }
}

impl FromStr for Checksum {
    type Err = SpdxError;

    /// Parse the `ALGORITHM: digest` wire form used by both codecs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (alg, value) = s.split_once(':').ok_or_else(|| {
            SpdxError::InvalidInput(format!("Malformed checksum: '{}', expected 'ALG: digest'", s))
        })?;
        let algorithm = alg.trim().parse::<ChecksumAlgorithm>()?;
        let value = value.trim();
        if value.is_empty() {
            return Err(SpdxError::InvalidInput(
                "Checksum digest must not be empty".to_string(),
            ));
        }
        Ok(Checksum::new(algorithm, value))
    }
}
