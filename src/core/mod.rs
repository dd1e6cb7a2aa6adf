//! Expense store and the operations the CLI drives.

pub mod store;

pub use store::{Entries, ExpenseStore, LoadStatus, OpenOptions, OpenReport};
