//! Main binary entry point for the spdx-toolkit.

use clap::{Parser, Subcommand, ValueEnum};
use spdx_toolkit::errors::SpdxError;
use spdx_toolkit::formats::Format;
use spdx_toolkit::validation::validate;
use spdx_toolkit::{load_document, Config};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a document between tag/value and RDF/XML
    Convert {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        #[arg(long, value_enum, help = "Input format (detected when omitted)")]
        from: Option<CliFormat>,

        #[arg(long, value_enum, help = "Output format (detected when omitted)")]
        to: Option<CliFormat>,

        #[arg(long, help = "Validate before writing; abort on violations")]
        validate: bool,
    },
    /// Validate a document and report every violation
    Validate {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(long, value_enum, help = "Input format (detected when omitted)")]
        from: Option<CliFormat>,

        #[arg(long, help = "Emit the outcome as JSON instead of text")]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    #[value(name = "tag-value")]
    TagValue,
    #[value(name = "rdf")]
    Rdf,
}

impl From<CliFormat> for Format {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::TagValue => Format::TagValue,
            CliFormat::Rdf => Format::Rdf,
        }
    }
}

fn setup_logging(verbose: bool) {
    let filter_level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, filter_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_app() -> Result<ExitCode, SpdxError> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Command::Convert {
            input,
            output,
            from,
            to,
            validate,
        } => {
            let config = Config {
                input_file: input,
                output_file: output,
                input_format: from.map(Format::from),
                output_format: to.map(Format::from),
                validate,
            };
            spdx_toolkit::run(config)?;
            log::info!("Conversion completed successfully.");
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { input, from, json } => {
            let document = load_document(&input, from.map(Format::from))?;
            let outcome = validate(&document);
            if json {
                let report = outcome
                    .to_json()
                    .map_err(|e| SpdxError::Serialization(e.to_string()))?;
                println!("{}", report);
            } else {
                outcome.print_colored();
            }
            if outcome.is_valid {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn main() -> ExitCode {
    match run_app() {
        Ok(code) => code,
        Err(e) => {
            log::error!("A fatal error occurred:");
            log::error!("{}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(s) = source {
                log::error!("  Caused by: {}", s);
                source = std::error::Error::source(s);
            }
            ExitCode::FAILURE
        }
    }
}
