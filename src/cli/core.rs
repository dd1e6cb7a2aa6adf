//! Shell context construction, dispatch, prompting, and error reporting.

use std::{collections::VecDeque, io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    core::{ExpenseStore, LoadStatus, OpenOptions},
    errors::{ConfigError, StoreError},
    storage::JsonStorage,
};

use super::commands;
use super::formatters::{self, NO_EXPENSES, SUMMARY_TITLE};
use super::io as cli_io;
use super::menu;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    /// Builds a context rooted at the default application directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new())
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(error = %err, "falling back to default configuration");
                cli_io::print_warning(format!(
                    "Could not read {}: {}. Using defaults.",
                    config_manager.path().display(),
                    err
                ));
                Config::default()
            }
        };
        output::set_preferences(OutputPreferences {
            color: config.color && mode == CliMode::Interactive,
        });

        let data_file = config_manager.data_file(&config);
        let report = ExpenseStore::open_with(
            Box::new(JsonStorage::new(data_file)),
            OpenOptions {
                preserve_corrupt: config.preserve_corrupt,
            },
        );
        report_load(&report.status);

        Ok(ShellContext {
            mode,
            registry,
            store: report.store,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            pending_input: VecDeque::new(),
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn currency_symbol(&self) -> &str {
        &self.config.currency_symbol
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let name = menu::command_for_choice(command).unwrap_or(command);
        if let Some(handler) = self.registry.handler(name) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        self.last_command = Some(line.trim().to_string());
        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        match self.dispatch(&command, &tokens[0], &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning("Invalid choice. Try again.");

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 2 {
                cli_io::print_info(format!("Did you mean `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit expense tracker?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Store(err @ StoreError::Save(_)) => {
                self.print_error(&err.to_string());
                cli_io::print_warning(
                    "The change is kept for this session and will be saved with the next change.",
                );
            }
            other => self.print_error(&other.to_string()),
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    /// Reads one answer: from the terminal when interactive, from the queued
    /// script lines otherwise.
    fn next_answer(&mut self, label: &str) -> Result<String, CommandError> {
        self.pending_input
            .pop_front()
            .map(|line| line.trim().to_string())
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!("missing input for `{}`", label))
            })
    }

    pub(crate) fn prompt_text(&mut self, label: &str) -> Result<String, CommandError> {
        match self.mode {
            CliMode::Interactive => cli_io::prompt_text(&self.theme, label),
            CliMode::Script => self.next_answer(label),
        }
    }

    pub(crate) fn prompt_amount(&mut self, label: &str) -> Result<f64, CommandError> {
        match self.mode {
            CliMode::Interactive => cli_io::prompt_amount(&self.theme, label),
            // Mirrors the interactive prompt: a bad answer is reported and the
            // next queued line is read as the amount, never run as a command.
            CliMode::Script => loop {
                let raw = self.next_answer(label)?;
                match cli_io::parse_amount(&raw) {
                    Ok(amount) => break Ok(amount),
                    Err(message) => self.print_error(&message),
                }
            },
        }
    }

    pub(crate) fn prompt_index(&mut self, label: &str) -> Result<i64, CommandError> {
        match self.mode {
            CliMode::Interactive => cli_io::prompt_index(&self.theme, label),
            CliMode::Script => {
                let raw = self.next_answer(label)?;
                parse_index(&raw)
            }
        }
    }

    pub(crate) fn add_expense(
        &mut self,
        description: String,
        amount: f64,
        category: String,
    ) -> CommandResult {
        self.store.add(description, amount, category)?;
        cli_io::print_success("Expense added.");
        Ok(())
    }

    pub(crate) fn list_expenses(&self) -> CommandResult {
        match self.store.list() {
            None => output::plain(NO_EXPENSES),
            Some(entries) => {
                for line in formatters::format_entries(entries, self.currency_symbol()) {
                    output::plain(line);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn delete_expense(&mut self, index: i64) -> CommandResult {
        let removed = self.store.delete(index)?;
        cli_io::print_success(format!("Expense deleted: {}", removed));
        Ok(())
    }

    pub(crate) fn summarize_expenses(&self) -> CommandResult {
        let summary = self.store.summarize();
        output::section(SUMMARY_TITLE);
        for line in formatters::summary_lines(&summary, self.currency_symbol()) {
            output::plain(line);
        }
        Ok(())
    }

    pub(crate) fn show_config(&self) -> CommandResult {
        output::section("Configuration");
        cli_io::print_info(format!("  config file      : {}", self.config_manager.path().display()));
        cli_io::print_info(format!(
            "  data file        : {}",
            self.store.storage().location().display()
        ));
        cli_io::print_info(format!("  currency_symbol  : {}", self.config.currency_symbol));
        cli_io::print_info(format!("  preserve_corrupt : {}", self.config.preserve_corrupt));
        cli_io::print_info(format!("  color            : {}", self.config.color));
        Ok(())
    }

    pub(crate) fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        let mut updated = self.config.clone();
        match key.to_lowercase().as_str() {
            "currency_symbol" | "currency" => updated.currency_symbol = value.to_string(),
            "preserve_corrupt" => updated.preserve_corrupt = parse_flag(value)?,
            "color" => updated.color = parse_flag(value)?,
            "data_file" => {
                updated.data_file = if value.is_empty() || value.eq_ignore_ascii_case("default") {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown config key `{}` (use currency_symbol, preserve_corrupt, color, data_file)",
                    other
                )))
            }
        }
        self.config_manager.save(&updated)?;
        let data_file_changed = updated.data_file != self.config.data_file;
        self.config = updated;
        cli_io::print_success(format!("Updated `{}`.", key));
        if data_file_changed {
            cli_io::print_info("The new data file is used from the next start.");
        }
        Ok(())
    }
}

fn report_load(status: &LoadStatus) {
    match status {
        LoadStatus::Fresh => cli_io::print_info("No previous data found. Starting fresh."),
        LoadStatus::Loaded { count } => {
            tracing::debug!(count, "expenses available at startup");
        }
        LoadStatus::Recovered { error, quarantined } => {
            cli_io::print_error(error);
            match quarantined {
                Some(path) => cli_io::print_warning(format!(
                    "The unreadable file was kept as {}. Starting with an empty list.",
                    path.display()
                )),
                None => cli_io::print_warning(
                    "Starting with an empty list; the next change overwrites the unreadable file.",
                ),
            }
        }
    }
}

pub(crate) fn parse_index(raw: &str) -> Result<i64, CommandError> {
    raw.trim().parse::<i64>().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid index `{}` (expected a whole number)", raw.trim()))
    })
}

fn parse_flag(value: &str) -> Result<bool, CommandError> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected on/off, got `{}`",
            other
        ))),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that stop the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    config_manager: ConfigManager,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_config_manager(CliMode::Script, config_manager)?;
    app.pending_input = lines.iter().map(|line| line.to_string()).collect();
    while let Some(line) = app.pending_input.pop_front() {
        match app.process_line(&line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err),
        }
    }
    Ok(app)
}
