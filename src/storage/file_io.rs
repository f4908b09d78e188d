//! Reading and writing the store file
//!
//! The store file is one JSON object mapping string keys to string values.
//! Writes go to a sibling `.tmp` file that is synced and then renamed over the
//! target. A file that exists but no longer parses is reported separately so
//! the caller can move it aside instead of refusing to start.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{TallyError, TallyResult};

/// Key-value pairs as persisted
pub type Entries = BTreeMap<String, String>;

/// What was found at the store path
#[derive(Debug)]
pub enum StoreFile {
    /// Nothing has been written yet
    Missing,
    Entries(Entries),
    /// The file exists but is not a JSON object of strings
    Unreadable(serde_json::Error),
}

/// Read the store file at `path`.
///
/// Only I/O failures are errors; unparseable content comes back as
/// [`StoreFile::Unreadable`].
pub fn read_store(path: &Path) -> TallyResult<StoreFile> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoreFile::Missing),
        Err(e) => {
            return Err(TallyError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    Ok(match serde_json::from_slice(&bytes) {
        Ok(entries) => StoreFile::Entries(entries),
        Err(err) => StoreFile::Unreadable(err),
    })
}

/// Rename the file at `path` to `<name>.corrupt-<timestamp>` and return the new path
pub fn set_aside(path: &Path, at: DateTime<Utc>) -> TallyResult<PathBuf> {
    let target = sibling(path, &format!(".corrupt-{}", at.format("%Y%m%dT%H%M%S%3f")));

    fs::rename(path, &target).map_err(|e| {
        TallyError::Storage(format!(
            "Failed to move {} aside: {}",
            path.display(),
            e
        ))
    })?;
    Ok(target)
}

/// Replace the store file with `entries`.
///
/// On failure the previous file is left in place and the temp file removed.
pub fn write_store(path: &Path, entries: &Entries) -> TallyResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TallyError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let bytes = serde_json::to_vec_pretty(entries)?;
    let temp_path = sibling(path, ".tmp");

    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(&bytes)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    });

    written.map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TallyError::Storage(format!("Failed to write {}: {}", path.display(), e))
    })
}

// Same directory, so the rename stays on one filesystem
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("store"));
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        assert!(matches!(read_store(&path).unwrap(), StoreFile::Missing));
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("store.json");

        let mut entries = Entries::new();
        entries.insert("app:cap".to_string(), "150".to_string());
        write_store(&path, &entries).unwrap();

        assert!(!temp_dir.path().join("data").join("store.json.tmp").exists());
        match read_store(&path).unwrap() {
            StoreFile::Entries(loaded) => assert_eq!(loaded, entries),
            other => panic!("expected entries, got {other:?}"),
        }
    }

    #[test]
    fn test_non_string_values_are_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        for content in ["not json at all", "[1, 2]", r#"{"app:cap": 150}"#] {
            fs::write(&path, content).unwrap();
            assert!(matches!(read_store(&path).unwrap(), StoreFile::Unreadable(_)));
        }
    }

    #[test]
    fn test_set_aside_keeps_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "{broken").unwrap();

        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let moved = set_aside(&path, at).unwrap();

        assert_eq!(
            moved,
            temp_dir.path().join("store.json.corrupt-20240501T093000000")
        );
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(moved).unwrap(), "{broken");
    }
}
