use thiserror::Error;

/// Failures raised while reading or writing the expense file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unsupported schema version {found} (this build reads up to v{supported})")]
    UnsupportedSchema { found: u32, supported: u32 },
}

/// Error type returned by [`crate::core::store::ExpenseStore`] operations.
///
/// None of these are fatal: callers report them and keep going.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error loading expenses: {0}")]
    Load(#[source] PersistenceError),
    #[error("Error saving expenses: {0}")]
    Save(#[source] PersistenceError),
    #[error("Invalid index: {position} (expenses recorded: {len})")]
    InvalidIndex { position: i64, len: usize },
}

impl StoreError {
    /// True when the in-memory mutation went through but could not be persisted.
    pub fn is_save_failure(&self) -> bool {
        matches!(self, StoreError::Save(_))
    }
}

/// Errors raised by the configuration layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_index_message_names_position_and_length() {
        let single = StoreError::InvalidIndex {
            position: 3,
            len: 1,
        };
        assert_eq!(single.to_string(), "Invalid index: 3 (expenses recorded: 1)");

        let empty = StoreError::InvalidIndex {
            position: 1,
            len: 0,
        };
        assert_eq!(empty.to_string(), "Invalid index: 1 (expenses recorded: 0)");

        let negative = StoreError::InvalidIndex {
            position: -3,
            len: 1,
        };
        assert_eq!(negative.to_string(), "Invalid index: -3 (expenses recorded: 1)");
    }

    #[test]
    fn save_failures_are_flagged() {
        let err = StoreError::Save(PersistenceError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )));
        assert!(err.is_save_failure());
        assert!(err.to_string().starts_with("Error saving expenses"));
    }
}
