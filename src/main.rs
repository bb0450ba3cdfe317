use anyhow::Result;
use clap::{Parser, Subcommand};

use fincalc::cli::{
    handle_expense_command, handle_export_command, handle_folder_command,
    handle_history_command, handle_import_command, handle_item_command, handle_job_command,
    handle_settings_command,
};
use fincalc::config::{init_tracing, FincalcPaths};
use fincalc::display::{format_expense_list, format_item_list, format_totals};
use fincalc::services::LedgerService;
use fincalc::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Small-business ledger: items, expenses, jobs and monthly history",
    long_about = "fincalc tracks income lines and expenses, keeps running totals, \
                  and archives the working ledger as jobs inside folders or as \
                  monthly snapshots. Data can be exported and imported as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income line commands
    #[command(subcommand)]
    Item(fincalc::cli::ItemCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(fincalc::cli::ExpenseCommands),

    /// Folder commands
    #[command(subcommand)]
    Folder(fincalc::cli::FolderCommands),

    /// Job commands (archive, insert, delete)
    #[command(subcommand)]
    Job(fincalc::cli::JobCommands),

    /// Monthly history commands
    #[command(subcommand)]
    History(fincalc::cli::HistoryCommands),

    /// Exchange rate and USD display
    #[command(subcommand)]
    Settings(fincalc::cli::SettingsCommands),

    /// Show the live ledger and totals
    Summary,

    /// Export data
    Export(fincalc::cli::ExportArgs),

    /// Import a JSON or YAML document
    Import(fincalc::cli::ImportArgs),

    /// Initialize storage, seeding example data into an empty ledger
    Init,

    /// Delete everything and start from an empty ledger
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = FincalcPaths::new()?;

    if let Some(Commands::Init) = cli.command {
        println!("Initializing fincalc at: {}", paths.data_dir().display());
        if fincalc::storage::initialize_storage(&paths)? {
            println!("Example data has been added:");
            println!("  - Item: Example: 1m of pipe (10 m x 20)");
            println!("  - Expense: Team salaries (1000 x 30 days)");
        } else {
            println!("Ledger already has data; nothing seeded.");
        }
        return Ok(());
    }

    let storage = Storage::new(paths.clone())?;
    storage.load()?;

    match cli.command {
        Some(Commands::Item(cmd)) => handle_item_command(&storage, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, cmd)?,
        Some(Commands::Folder(cmd)) => handle_folder_command(&storage, cmd)?,
        Some(Commands::Job(cmd)) => handle_job_command(&storage, cmd)?,
        Some(Commands::History(cmd)) => handle_history_command(&storage, cmd)?,
        Some(Commands::Settings(cmd)) => handle_settings_command(&storage, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Import(args)) => handle_import_command(&storage, args)?,
        Some(Commands::Summary) => {
            let service = LedgerService::new(&storage);
            println!("Items");
            print!("{}", format_item_list(&service.items()?));
            println!();
            println!("Expenses");
            print!("{}", format_expense_list(&service.expenses()?));
            println!();
            print!("{}", format_totals(&service.totals()?));
        }
        Some(Commands::Reset { yes }) => {
            if !yes {
                anyhow::bail!("Reset deletes all items, expenses, folders and history. Re-run with --yes to confirm.");
            }
            LedgerService::new(&storage).reset()?;
            println!("Ledger reset.");
        }
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Config) => {
            println!("fincalc Configuration");
            println!("=====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
        }
        Some(Commands::Init) => {}
        None => {
            println!("fincalc - small-business ledger");
            println!();
            println!("Run 'fincalc --help' for usage information.");
            if !paths.is_initialized() {
                println!("Run 'fincalc init' to start with example data.");
            }
        }
    }

    Ok(())
}
