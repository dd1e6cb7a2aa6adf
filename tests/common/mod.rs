#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use expense_tracker::{
    cli::SCRIPT_ENV,
    core::{ExpenseStore, OpenReport},
    storage::JsonStorage,
};
use tempfile::TempDir;

pub const BIN_NAME: &str = "expense_tracker";

/// Temporary application directory; dropped with the test.
pub struct TestHome {
    pub dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("expenses.json")
    }

    pub fn open_store(&self) -> OpenReport {
        ExpenseStore::open(Box::new(JsonStorage::new(self.data_file())))
    }

    /// Script-mode invocation of the binary rooted at this directory.
    pub fn script_command(&self) -> Command {
        let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
        cmd.env(SCRIPT_ENV, "1")
            .env("EXPENSE_TRACKER_HOME", self.path())
            .env_remove("EXPENSE_TRACKER_FILE")
            .env_remove("RUST_LOG");
        cmd
    }
}
