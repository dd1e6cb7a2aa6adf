//! Numbered main menu shown before each prompt in interactive mode.

use crate::cli::output;

pub struct MenuEntry {
    pub choice: &'static str,
    pub label: &'static str,
    pub command: &'static str,
}

pub const MAIN_MENU: &[MenuEntry] = &[
    MenuEntry {
        choice: "1",
        label: "Add Expense",
        command: "add",
    },
    MenuEntry {
        choice: "2",
        label: "View Expenses",
        command: "view",
    },
    MenuEntry {
        choice: "3",
        label: "Delete Expense",
        command: "delete",
    },
    MenuEntry {
        choice: "4",
        label: "Summarize Expenses",
        command: "summary",
    },
    MenuEntry {
        choice: "5",
        label: "Exit",
        command: "exit",
    },
];

pub const PROMPT: &str = "Choose an option: ";

/// Maps a menu number to the command it runs.
pub fn command_for_choice(choice: &str) -> Option<&'static str> {
    MAIN_MENU
        .iter()
        .find(|entry| entry.choice == choice.trim())
        .map(|entry| entry.command)
}

pub fn lines() -> Vec<String> {
    MAIN_MENU
        .iter()
        .map(|entry| format!("{}. {}", entry.choice, entry.label))
        .collect()
}

pub fn print() {
    for line in lines() {
        output::plain(line);
    }
}
