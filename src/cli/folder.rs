//! Folder and job CLI commands
//!
//! Folders are created by name; jobs are archived copies of the live ledger
//! (or of one item) and can be inserted back into it.

use clap::Subcommand;

use crate::display::{format_folder_details, format_folder_list};
use crate::error::FincalcResult;
use crate::services::{ArchiveService, LedgerService};
use crate::storage::Storage;

/// Folder subcommands
#[derive(Subcommand)]
pub enum FolderCommands {
    /// Create an empty folder
    Create {
        /// Folder name
        name: String,
    },
    /// List folders with job counts
    List,
    /// Show a folder's jobs
    Show {
        /// Folder name or ID
        folder: String,
    },
    /// Delete a folder and all of its jobs
    Delete {
        /// Folder name or ID
        folder: String,
    },
}

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Archive the live ledger as a job
    Archive {
        /// Folder name or ID
        folder: String,
        /// Job name
        name: String,
    },
    /// Archive a single live item as a job
    ArchiveItem {
        /// Folder name or ID
        folder: String,
        /// Item ID (or unique prefix)
        item: String,
    },
    /// Append copies of a job's lines to the live ledger
    Insert {
        /// Folder name or ID
        folder: String,
        /// Job ID (or unique prefix)
        job: String,
    },
    /// Delete a job (the folder is kept)
    Delete {
        /// Folder name or ID
        folder: String,
        /// Job ID (or unique prefix)
        job: String,
    },
}

/// Handle a folder command
pub fn handle_folder_command(storage: &Storage, cmd: FolderCommands) -> FincalcResult<()> {
    let service = ArchiveService::new(storage);

    match cmd {
        FolderCommands::Create { name } => {
            let folder = service.create_folder(&name)?;
            println!("Created folder: {}", folder.name);
            println!("  ID: {}", folder.id);
        }

        FolderCommands::List => {
            print!("{}", format_folder_list(&service.list()?));
        }

        FolderCommands::Show { folder } => {
            let id = service.resolve_folder(&folder)?;
            print!("{}", format_folder_details(&service.get(&id)?));
        }

        FolderCommands::Delete { folder } => {
            let id = service.resolve_folder(&folder)?;
            let removed = service.delete_folder(&id)?;
            println!(
                "Deleted folder: {} ({} jobs)",
                removed.name,
                removed.jobs.len()
            );
        }
    }

    Ok(())
}

/// Handle a job command
pub fn handle_job_command(storage: &Storage, cmd: JobCommands) -> FincalcResult<()> {
    let service = ArchiveService::new(storage);

    match cmd {
        JobCommands::Archive { folder, name } => {
            let folder_id = service.resolve_folder(&folder)?;
            let job = service.archive_ledger(&folder_id, &name)?;
            println!("Archived job: {}", job);
            println!("  ID: {}", job.id);
        }

        JobCommands::ArchiveItem { folder, item } => {
            let folder_id = service.resolve_folder(&folder)?;
            let item_id = LedgerService::new(storage).resolve_item(&item)?;
            let job = service.archive_item(&folder_id, &item_id)?;
            println!("Archived job: {}", job);
            println!("  ID: {}", job.id);
        }

        JobCommands::Insert { folder, job } => {
            let folder_id = service.resolve_folder(&folder)?;
            let job_id = service.resolve_job(&folder_id, &job)?;
            let (items, expenses) = service.insert_job(&folder_id, &job_id)?;
            println!("Inserted {} items and {} expenses into the ledger", items, expenses);
        }

        JobCommands::Delete { folder, job } => {
            let folder_id = service.resolve_folder(&folder)?;
            let job_id = service.resolve_job(&folder_id, &job)?;
            let removed = service.delete_job(&folder_id, &job_id)?;
            println!("Deleted job: {}", removed.name);
        }
    }

    Ok(())
}
