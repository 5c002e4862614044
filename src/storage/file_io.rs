//! JSON data files
//!
//! Data files are written to a sibling `.tmp` file, synced, then renamed over
//! the original, so a failed save leaves the previous contents in place.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SubtrackError;

fn storage_error(action: &str, path: &Path, err: impl Display) -> SubtrackError {
    SubtrackError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load a data file; a missing or zero-length file yields `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, SubtrackError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let len = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
        Err(e) => return Err(storage_error("inspect", path, e)),
    };
    if len == 0 {
        tracing::debug!(path = %path.display(), "no data yet, using defaults");
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    let value =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))?;

    tracing::debug!(path = %path.display(), bytes = len, "loaded data file");
    Ok(value)
}

/// Replace a data file with pretty-printed JSON
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SubtrackError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(path);
    let result = write_synced(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| storage_error("replace", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        tracing::debug!(path = %path.display(), "saved data file");
    }
    result
}

fn write_synced<T: Serialize>(path: &Path, data: &T) -> Result<(), SubtrackError> {
    let file = File::create(path).map_err(|e| storage_error("create", path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| storage_error("write", path, e))?;
    writer.flush().map_err(|e| storage_error("flush", path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", path, e))
}

/// Whether `path` holds well-formed JSON
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    File::open(path.as_ref())
        .map(|file| serde_json::from_reader::<_, serde_json::Value>(BufReader::new(file)).is_ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize, Default)]
    struct Ledger {
        names: Vec<String>,
    }

    fn ledger() -> Ledger {
        Ledger {
            names: vec!["Netflix".into(), "Spotify".into()],
        }
    }

    #[test]
    fn test_missing_and_empty_files_read_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        let empty = temp_dir.path().join("empty.json");
        fs::write(&empty, "").unwrap();

        assert_eq!(read_json::<Ledger, _>(&missing).unwrap(), Ledger::default());
        assert_eq!(read_json::<Ledger, _>(&empty).unwrap(), Ledger::default());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Ledger, _>(&path).unwrap_err();
        assert!(matches!(err, SubtrackError::Storage(ref msg) if msg.contains("corrupt.json")));
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("subscriptions.json");

        write_json_atomic(&path, &ledger()).unwrap();

        assert_eq!(read_json::<Ledger, _>(&path).unwrap(), ledger());
        assert!(!temp_dir.path().join("data").join("subscriptions.json.tmp").exists());
    }

    #[test]
    fn test_write_replaces_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");

        write_json_atomic(&path, &ledger()).unwrap();
        write_json_atomic(&path, &Ledger::default()).unwrap();

        assert_eq!(read_json::<Ledger, _>(&path).unwrap(), Ledger::default());
    }

    #[test]
    fn test_json_file_valid() {
        let temp_dir = TempDir::new().unwrap();
        let valid = temp_dir.path().join("valid.json");
        let invalid = temp_dir.path().join("invalid.json");
        fs::write(&valid, r#"{"subscriptions": []}"#).unwrap();
        fs::write(&invalid, "not json at all").unwrap();

        assert!(json_file_valid(&valid));
        assert!(!json_file_valid(&invalid));
        assert!(!json_file_valid(temp_dir.path().join("missing.json")));
    }
}
