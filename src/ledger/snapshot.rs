use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Expense;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// On-disk document holding the full ordered list of expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseFile {
    #[serde(default = "ExpenseFile::schema_version_default")]
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl ExpenseFile {
    pub fn new(expenses: Vec<Expense>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            expenses,
        }
    }

    pub fn schema_version_default() -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn is_supported(&self) -> bool {
        self.schema_version <= CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_schema_version_defaults_to_current() {
        let raw = r#"{ "saved_at": "2024-01-01T00:00:00Z", "expenses": [] }"#;
        let snapshot: ExpenseFile = serde_json::from_str(raw).expect("parse snapshot");
        assert_eq!(snapshot.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(snapshot.is_supported());
    }

    #[test]
    fn newer_schema_is_not_supported() {
        let mut snapshot = ExpenseFile::new(Vec::new());
        snapshot.schema_version = CURRENT_SCHEMA_VERSION + 1;
        assert!(!snapshot.is_supported());
    }
}
