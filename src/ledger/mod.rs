//! Expense domain models and persistence-friendly types.

pub mod expense;
pub mod snapshot;
pub mod summary;

pub use expense::Expense;
pub use snapshot::{ExpenseFile, CURRENT_SCHEMA_VERSION};
pub use summary::Summary;
