use std::fmt;

use serde::{Deserialize, Serialize};

/// A single spending entry.
///
/// Expenses carry no identifier; their position in the store is the only
/// handle callers get, and it shifts when earlier entries are deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub description: String,
    pub amount: f64,
    pub category: String,
}

impl Expense {
    pub fn new(description: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ${:.2} ({})",
            self.description, self.amount, self.category
        )
    }
}
