//! Folder and job display formatting

use crate::models::Folder;
use crate::services::archive::FolderSummary;

use super::currency::{format_amount, Currency};

/// Format folders with job counts and net balance
pub fn format_folder_list(summaries: &[FolderSummary]) -> String {
    if summaries.is_empty() {
        return "No folders found.".to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.folder.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<18}  {:<name_width$}  {:>5}  {:>18}\n",
        "ID",
        "Name",
        "Jobs",
        "Net balance",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<18}  {:-<name_width$}  {:->5}  {:->18}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:<18}  {:<name_width$}  {:>5}  {:>18}\n",
            summary.folder.id.short(),
            summary.folder.name,
            summary.folder.jobs.len(),
            format_amount(summary.net_balance, Currency::Ars),
            name_width = name_width,
        ));
    }

    output
}

/// Format one folder with its jobs
pub fn format_folder_details(folder: &Folder) -> String {
    let mut output = format!("Folder: {} ({})\n", folder.name, folder.id);

    if folder.jobs.is_empty() {
        output.push_str("  No jobs.\n");
        return output;
    }

    for job in &folder.jobs {
        output.push_str(&format!(
            "  {}  {}  [{}]  {} items, {} expenses  net {}\n",
            job.id.short(),
            job.name,
            job.created_at.format("%Y-%m-%d %H:%M"),
            job.items.len(),
            job.expenses.len(),
            format_amount(job.summary.net_balance(), Currency::Ars),
        ));
    }

    output
}
