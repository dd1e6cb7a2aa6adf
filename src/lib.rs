#![doc(test(attr(deny(warnings))))]

//! Expense Tracker keeps a single-user list of spending entries on disk and
//! summarizes them by category. The [`core::store::ExpenseStore`] owns the
//! records, [`storage`] persists them, and [`cli`] drives the menu loop.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Expense tracker tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
