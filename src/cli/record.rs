//! Record CLI commands
//!
//! Implements the commands that create, change, remove and list records.

use chrono::Local;
use clap::Subcommand;

use crate::display::{format_record_details, format_record_list};
use crate::error::{TallyError, TallyResult};
use crate::models::{NewRecord, RecordId, RecordUpdate};
use crate::query::{RecordQuery, SortDir, SortKey, SortState};
use crate::services::RecordService;
use crate::storage::Storage;

/// Record subcommands
#[derive(Subcommand)]
pub enum RecordCommands {
    /// Add a new record
    Add {
        /// What the money was spent on
        description: String,
        /// Amount in USD (e.g., "12.50")
        amount: String,
        /// Category (letters, spaces and hyphens)
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Edit a record; blank values leave a field unchanged
    Edit {
        /// Record ID
        id: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a record
    Delete {
        /// Record ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Show record details
    Show {
        /// Record ID
        id: String,
    },
    /// List records
    List {
        /// Sort by description, amount or date (newest date first when omitted)
        #[arg(short, long)]
        sort: Option<SortKey>,
        /// Sort direction (asc or desc); a --sort without it starts ascending
        #[arg(long)]
        dir: Option<SortDir>,
        /// Regular expression matched against description and category
        #[arg(short = 'S', long)]
        search: Option<String>,
        /// Match the search case-insensitively
        #[arg(short, long)]
        ignore_case: bool,
        /// Do not mark search matches
        #[arg(long)]
        no_highlight: bool,
    },
}

/// Handle a record command
pub fn handle_record_command(storage: &mut Storage, cmd: RecordCommands) -> TallyResult<()> {
    let currency = storage.settings.display_currency;

    match cmd {
        RecordCommands::Add {
            description,
            amount,
            category,
            date,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
            let mut service = RecordService::new(storage);
            let record = service.add_record(NewRecord::new(description, amount, category, date))?;

            println!("Added record: {}", record.id);
            println!("  {}", record);
        }

        RecordCommands::Edit {
            id,
            description,
            amount,
            category,
            date,
        } => {
            let update = RecordUpdate {
                description,
                amount,
                category,
                date,
            };
            if update.is_empty() {
                println!("Nothing to change; only the update time will be refreshed.");
            }

            let mut service = RecordService::new(storage);
            let record = service
                .edit_record(&RecordId::from(id.trim()), update)?
                .ok_or_else(|| TallyError::record_not_found(&id))?;

            println!("Updated record: {}", record.id);
            println!("  {}", record);
        }

        RecordCommands::Delete { id, force } => {
            let mut service = RecordService::new(storage);
            let record = service
                .find(&id)
                .cloned()
                .ok_or_else(|| TallyError::record_not_found(&id))?;

            if !force {
                println!("About to delete record:");
                print!("{}", format_record_details(&record, currency));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete_record(&record.id)?;
            println!("Deleted record: {} ({})", record.id, record.description);
        }

        RecordCommands::Show { id } => {
            let service = RecordService::new(storage);
            let record = service
                .find(&id)
                .ok_or_else(|| TallyError::record_not_found(&id))?;

            print!("{}", format_record_details(record, currency));
        }

        RecordCommands::List {
            sort,
            dir,
            search,
            ignore_case,
            no_highlight,
        } => {
            let query = RecordQuery::new(sort_state(sort, dir))
                .search(search.as_deref().unwrap_or(""), ignore_case);

            let records = storage.records.all();
            let rows = query.rows(records, currency);
            print!(
                "{}",
                format_record_list(&rows, &query.status(records), !no_highlight)
            );
        }
    }

    Ok(())
}

/// Sort for `list`: a key picked without a direction behaves like selecting
/// it from the default listing
fn sort_state(sort: Option<SortKey>, dir: Option<SortDir>) -> SortState {
    match (sort, dir) {
        (None, None) => SortState::default(),
        (Some(key), None) => SortState::default().toggled(key),
        (key, Some(dir)) => SortState::new(key.unwrap_or_default(), dir),
    }
}
