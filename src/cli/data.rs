//! CLI commands for JSON import and export

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TallyError, TallyResult};
use crate::services::RecordService;
use crate::storage::Storage;

/// Import records from a JSON file
pub fn handle_import_command(storage: &mut Storage, file: &Path) -> TallyResult<()> {
    if !file.exists() {
        return Err(TallyError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let content = fs::read_to_string(file)
        .map_err(|e| TallyError::Import(format!("Failed to read file: {}", e)))?;

    let mut service = RecordService::new(storage);
    let count = service.import_json(&content)?;

    println!("Import success. You have added {} records.", count);
    Ok(())
}

/// Export all records as pretty JSON to a file, or stdout without one
pub fn handle_export_command(storage: &mut Storage, output: Option<PathBuf>) -> TallyResult<()> {
    let service = RecordService::new(storage);
    let json = service.export_json()?;

    match output {
        Some(path) => {
            fs::write(&path, format!("{}\n", json)).map_err(|e| {
                TallyError::Export(format!("Failed to write file {}: {}", path.display(), e))
            })?;
            println!(
                "Exported {} records to: {}",
                storage.records.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
