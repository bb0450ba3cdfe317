//! CLI command handler for document import
//!
//! Reads a JSON or YAML document and replaces or merges it into the stored
//! data. A document without `items`/`expenses` is only applied with `--force`.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{FincalcError, FincalcResult};
use crate::export::import_from_yaml;
use crate::services::{ImportDocument, ImportMode, ImportService};
use crate::storage::Storage;

/// Import arguments
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to a JSON or YAML document
    pub file: PathBuf,

    /// Append incoming lines and folders instead of replacing everything
    #[arg(long)]
    pub merge: bool,

    /// Proceed even if the document lacks items or expenses
    #[arg(long)]
    pub force: bool,

    /// Show what would be imported without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Handle the import command
pub fn handle_import_command(storage: &Storage, args: ImportArgs) -> FincalcResult<()> {
    let content = std::fs::read_to_string(&args.file).map_err(|e| {
        FincalcError::Import(format!("Failed to read {}: {}", args.file.display(), e))
    })?;

    let incoming = if is_yaml(&args.file) {
        import_from_yaml(&content)?
    } else {
        ImportDocument::parse(&content)?
    };

    let mode = if args.merge {
        ImportMode::Merge
    } else {
        ImportMode::Replace
    };
    let service = ImportService::new(storage);

    if args.dry_run {
        let preview = service.preview(&incoming, mode);
        println!("Import Preview ({})", mode);
        println!("{}", "=".repeat(40));
        println!("  Items:     {}", preview.items);
        println!("  Expenses:  {}", preview.expenses);
        println!("  Folders:   {}", preview.folders);
        if mode == ImportMode::Replace {
            println!("  Months:    {}", preview.history_months);
            println!(
                "  Settings:  {}",
                if preview.settings_replaced { "replaced" } else { "kept" }
            );
        }
        if !incoming.has_expected_structure() {
            println!();
            println!(
                "Warning: unexpected document structure, missing {}",
                preview.missing_fields.join(", ")
            );
        }
        return Ok(());
    }

    let result = service.import(incoming, mode, args.force).map_err(|e| {
        if e.is_structural_mismatch() {
            FincalcError::Import(format!("{}. Re-run with --force to import anyway", e))
        } else {
            e
        }
    })?;

    if !result.missing_fields.is_empty() {
        eprintln!(
            "Warning: missing {} treated as empty",
            result.missing_fields.join(", ")
        );
    }
    println!("Imported ({})", result.summary_line());
    Ok(())
}
