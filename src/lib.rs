//! Main library for the SPDX toolkit.
//!
//! This crate contains the document model, validation engine, and the two
//! codecs (tag/value text and RDF/XML) for SPDX documents, plus the
//! pipeline driving the CLI.

pub mod errors;
pub mod formats;
pub mod models;
pub mod registry;
pub mod validation;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;

use errors::SpdxError;
use formats::Format;
use models::document::Document;

/// Top-level configuration for a conversion run.
#[derive(Debug)]
pub struct Config {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub input_format: Option<Format>,
    pub output_format: Option<Format>,
    /// Validate before writing; an invalid document aborts the run with the
    /// full violation list and no output file content.
    pub validate: bool,
}

/// The main entry point for the conversion logic.
///
/// Reads and parses the input, optionally validates, and writes the
/// document in the requested output format.
pub fn run(config: Config) -> Result<(), SpdxError> {
    let start_time = Instant::now();
    info!("Starting conversion");
    info!("  Input: {}", config.input_file.display());
    info!("  Output: {}", config.output_file.display());

    let content = fs::read(&config.input_file)
        .map_err(|e| SpdxError::Io(e, "Failed to read input file".to_string()))?;

    // Extension first, content sniffing as the fallback.
    let input_format = match config.input_format {
        Some(format) => format,
        None => Format::from_extension(&config.input_file)
            .or_else(|_| Format::from_content(&content))?,
    };
    let output_format = match config.output_format {
        Some(format) => format,
        None => Format::from_extension(&config.output_file).unwrap_or(input_format),
    };
    info!("  Input format: {:?}", input_format);
    info!("  Output format: {:?}", output_format);

    let parse_start = Instant::now();
    let document = parse_document(&content, input_format)?;
    info!(
        "Parsed document '{}' ({}). (Took {:.2?})",
        document.name,
        document.version,
        parse_start.elapsed()
    );

    let output_file = fs::File::create(&config.output_file)
        .map_err(|e| SpdxError::Io(e, "Failed to create output file".to_string()))?;
    let mut output_writer = BufWriter::new(output_file);
    write_document(&document, &mut output_writer, output_format, config.validate)?;
    output_writer
        .flush()
        .map_err(|e| SpdxError::Io(e, "Failed to flush output file".to_string()))?;

    info!("Total execution time: {:.2?}", start_time.elapsed());
    Ok(())
}

/// Read and parse a document from a file, detecting the format from the
/// extension (falling back to content sniffing) unless one is given.
pub fn load_document(path: &Path, format: Option<Format>) -> Result<Document, SpdxError> {
    let content = fs::read(path)
        .map_err(|e| SpdxError::Io(e, "Failed to read input file".to_string()))?;
    let format = match format {
        Some(format) => format,
        None => Format::from_extension(path).or_else(|_| Format::from_content(&content))?,
    };
    parse_document(&content, format)
}

/// Parse a document from raw bytes in the given format.
pub fn parse_document(content: &[u8], format: Format) -> Result<Document, SpdxError> {
    let text = std::str::from_utf8(content)
        .map_err(|e| SpdxError::InvalidInput(format!("Input is not valid UTF-8: {}", e)))?;
    match format {
        Format::TagValue => formats::tagvalue::parse_str(text),
        Format::Rdf => formats::rdf::parse_str(text),
    }
}

/// Serialize a document in the given format. With `check` set the document
/// is validated first and nothing is written if it is invalid.
pub fn write_document<W: Write>(
    document: &Document,
    out: &mut W,
    format: Format,
    check: bool,
) -> Result<(), SpdxError> {
    match format {
        Format::TagValue => formats::tagvalue::write_document(document, out, check),
        Format::Rdf => formats::rdf::write_document(document, out, check),
    }
}
