use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tally_cli::cli::{
    handle_export_command, handle_import_command, handle_record_command,
    handle_settings_command, RecordCommands, SettingsCommands,
};
use tally_cli::config::paths::TallyPaths;
use tally_cli::reports::DashboardReport;
use tally_cli::storage::Storage;

/// Environment variable holding the log filter (e.g. `debug`, `tally_cli=trace`)
const LOG_ENV: &str = "TALLY_LOG";

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "tally keeps a list of expense records with validated fields, \
                  regex search with highlighted matches, sortable listings, \
                  USD/RWF display and budget cap alerts."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Record(RecordCommands),

    /// Show totals, budget status and the 7-day trend
    Dashboard,

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Import records from a JSON array file
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Export all records as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    let mut storage = Storage::open(paths)?;
    storage.on_change(|change| tracing::debug!(?change, "state changed"));

    match cli.command {
        Some(Commands::Record(cmd)) => {
            handle_record_command(&mut storage, cmd)?;
        }
        Some(Commands::Dashboard) => {
            let report = DashboardReport::generate(&storage, Local::now().date_naive());
            print!("{}", report.format_terminal());
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&mut storage, cmd)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&mut storage, &file)?;
        }
        Some(Commands::Export { output }) => {
            handle_export_command(&mut storage, output)?;
        }
        Some(Commands::Audit { limit }) => {
            let entries = match storage.audit() {
                Some(logger) => logger.read_recent(limit)?,
                None => Vec::new(),
            };
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Config) => {
            println!("tally Configuration");
            println!("===================");
            if let Some(paths) = storage.paths() {
                let state = if paths.is_initialized() {
                    ""
                } else {
                    " (not created yet)"
                };
                println!("Base directory: {}", paths.base_dir().display());
                println!("Store file:     {}{}", paths.store_file().display(), state);
                println!("Audit log:      {}", paths.audit_log().display());
                println!();
            }
            println!("Settings:");
            println!("  Display currency: {}", storage.settings.display_currency);
            println!("  Budget cap:       {:.2} USD", storage.settings.budget);
        }
        None => {
            println!("tally - Terminal-based personal expense tracker");
            println!();
            println!("Run 'tally --help' for usage information.");
            println!("Run 'tally add \"Lunch\" 12.50 -c Food' to record an expense.");
        }
    }

    Ok(())
}
