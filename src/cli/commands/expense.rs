use crate::cli::core::{parse_index, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Add an expense",
            "add [<description> <amount> <category>]",
            cmd_add,
        ),
        CommandEntry::new("view", "List recorded expenses", "view", cmd_view)
            .with_aliases(&["list"]),
        CommandEntry::new(
            "delete",
            "Delete an expense by its number in the list",
            "delete [index]",
            cmd_delete,
        )
        .with_aliases(&["remove"]),
        CommandEntry::new(
            "summary",
            "Show totals per category",
            "summary",
            cmd_summary,
        )
        .with_aliases(&["summarize"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (description, amount, category) = match args {
        [] => {
            let description = context.prompt_text("Enter description")?;
            let amount = context.prompt_amount("Enter amount")?;
            let category = context.prompt_text("Enter category")?;
            (description, amount, category)
        }
        [description, amount, category @ ..] if !category.is_empty() => {
            let amount = io::parse_amount(amount).map_err(CommandError::InvalidArguments)?;
            (description.to_string(), amount, category.join(" "))
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: add <description> <amount> <category>".into(),
            ))
        }
    };
    context.add_expense(description, amount, category)
}

fn cmd_view(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.list_expenses()
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = match args {
        [] => context.prompt_index("Enter expense index to delete")?,
        [raw] => parse_index(raw)?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: delete [index]".into(),
            ))
        }
    };
    context.delete_expense(index)
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.summarize_expenses()
}
