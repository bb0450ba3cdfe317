//! CLI commands for data export
//!
//! Writes the document (JSON/YAML) or the live ledger lines (CSV) to a file,
//! or to stdout when no file is given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{FincalcError, FincalcResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (whole document, re-importable)
    Json,
    /// YAML format (whole document, human-readable)
    Yaml,
    /// CSV format (live items and expenses only)
    Csv,
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (stdout if omitted)
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> FincalcResult<()> {
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FincalcError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Json => json::export_full_json(storage, &mut writer)?,
        ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
        ExportFormat::Csv => csv::export_ledger_csv(storage, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| FincalcError::Export(e.to_string()))?;

    if let Some(path) = args.output {
        match args.format {
            ExportFormat::Csv => eprintln!("Ledger lines exported to: {}", path.display()),
            _ => eprintln!("Full document exported to: {}", path.display()),
        }
    }

    Ok(())
}
