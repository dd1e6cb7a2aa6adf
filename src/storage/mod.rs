pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{errors::PersistenceError, ledger::Expense};

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Abstraction over the place the expense list is persisted.
pub trait StorageBackend {
    /// Reads the full expense list. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<Expense>>>;

    /// Replaces the persisted list with `expenses`.
    fn save(&self, expenses: &[Expense]) -> Result<()>;

    /// Moves an unreadable file out of the way so the next save does not
    /// overwrite it. Returns where it went, or `None` if nothing was moved.
    fn quarantine(&self) -> Result<Option<PathBuf>> {
        Ok(None)
    }

    /// Human-readable location of the persisted data.
    fn location(&self) -> &Path;
}

pub use json_backend::JsonStorage;
