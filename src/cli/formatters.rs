//! Plain-text renderings of expenses and summaries.

use crate::ledger::{Expense, Summary};

pub const NO_EXPENSES: &str = "No expenses recorded.";
pub const SUMMARY_TITLE: &str = "Expense Summary";

pub fn format_amount(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// `<position>. <description>: $<amount> (<category>)`
pub fn format_entry(position: usize, expense: &Expense, symbol: &str) -> String {
    format!(
        "{}. {}: {} ({})",
        position,
        expense.description,
        format_amount(symbol, expense.amount),
        expense.category
    )
}

pub fn format_entries<'a>(
    entries: impl IntoIterator<Item = (usize, &'a Expense)>,
    symbol: &str,
) -> Vec<String> {
    entries
        .into_iter()
        .map(|(position, expense)| format_entry(position, expense, symbol))
        .collect()
}

/// One line per category followed by the grand total.
pub fn summary_lines(summary: &Summary, symbol: &str) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .by_category
        .iter()
        .map(|(category, total)| format!("{}: {}", category, format_amount(symbol, *total)))
        .collect();
    lines.push(format!(
        "Total Spending: {}",
        format_amount(symbol, summary.total)
    ));
    lines
}
