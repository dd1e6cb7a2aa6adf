use chrono::Utc;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    errors::PersistenceError,
    ledger::{Expense, ExpenseFile, CURRENT_SCHEMA_VERSION},
    utils::{paths, persistence},
};

use super::{Result, StorageBackend};

const QUARANTINE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Stores the expense list as a single pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_snapshot(&self) -> Result<Option<ExpenseFile>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let snapshot: ExpenseFile = serde_json::from_str(&data)?;
        if !snapshot.is_supported() {
            return Err(PersistenceError::UnsupportedSchema {
                found: snapshot.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(Some(snapshot))
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<Vec<Expense>>> {
        let snapshot = self.read_snapshot()?;
        if let Some(snapshot) = &snapshot {
            tracing::debug!(
                path = %self.path.display(),
                count = snapshot.expenses.len(),
                saved_at = %snapshot.saved_at,
                "loaded expense file"
            );
        }
        Ok(snapshot.map(|snapshot| snapshot.expenses))
    }

    fn save(&self, expenses: &[Expense]) -> Result<()> {
        let snapshot = ExpenseFile::new(expenses.to_vec());
        let json = serde_json::to_string_pretty(&snapshot)?;
        persistence::write_atomic(&self.path, json.as_bytes())?;
        tracing::debug!(path = %self.path.display(), count = expenses.len(), "saved expense file");
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let stamp = Utc::now().format(QUARANTINE_TIMESTAMP_FORMAT);
        let target = paths::with_suffix(&self.path, &format!("corrupt-{}", stamp));
        fs::rename(&self.path, &target)?;
        tracing::info!(
            from = %self.path.display(),
            to = %target.display(),
            "moved unreadable expense file aside"
        );
        Ok(Some(target))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("expenses.json"));
        (storage, temp)
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            Expense::new("Coffee", 4.5, "Food"),
            Expense::new("Bus", 2.0, "Transport"),
        ]
    }

    #[test]
    fn missing_file_loads_as_none() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load().expect("load").is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.save(&sample_expenses()).expect("save");
        let loaded = storage.load().expect("load").expect("file present");
        assert_eq!(loaded, sample_expenses());
        assert!(!paths::tmp_path(storage.path()).exists());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("nested/deeper/expenses.json"));
        storage.save(&sample_expenses()).expect("save");
        assert!(storage.path().exists());
    }

    #[test]
    fn written_file_carries_schema_version() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.save(&sample_expenses()).expect("save");
        let raw = fs::read_to_string(storage.path()).expect("read file");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value["schema_version"], CURRENT_SCHEMA_VERSION);
        assert_eq!(value["expenses"][1]["category"], "Transport");
    }

    #[test]
    fn corrupt_file_is_a_serde_error() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.path(), "not json at all").expect("write garbage");
        let err = storage.load().expect_err("corrupt file must fail");
        assert!(matches!(err, PersistenceError::Serde(_)));
    }

    #[test]
    fn newer_schema_is_rejected() {
        let (storage, _guard) = storage_with_temp_dir();
        let raw = format!(
            r#"{{ "schema_version": {}, "saved_at": "2024-01-01T00:00:00Z", "expenses": [] }}"#,
            CURRENT_SCHEMA_VERSION + 1
        );
        fs::write(storage.path(), raw).expect("write file");
        let err = storage.load().expect_err("future schema must fail");
        assert!(matches!(err, PersistenceError::UnsupportedSchema { .. }));
    }

    #[test]
    fn quarantine_moves_the_file_aside() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.path(), "garbage").expect("write garbage");
        let moved = storage
            .quarantine()
            .expect("quarantine")
            .expect("file was moved");
        assert!(!storage.path().exists());
        assert_eq!(fs::read_to_string(&moved).expect("read moved"), "garbage");
        let name = moved.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.starts_with("expenses.json.corrupt-"), "unexpected name {name}");
    }

    #[test]
    fn quarantine_without_file_is_a_no_op() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.quarantine().expect("quarantine").is_none());
    }
}
