//! `help` command - Usage for shell commands

use console::style;

use crate::cli::commands::CommandKind;

#[derive(Debug, Default)]
pub struct HelpArgs {
    /// Command to describe; all commands when absent or unknown
    pub command: Option<CommandKind>,
}

impl HelpArgs {
    pub fn parse(args: &[&str]) -> Self {
        Self {
            command: args.first().and_then(|name| CommandKind::from_name(name)),
        }
    }
}

/// Usage line and description of a command
pub fn usage(kind: CommandKind) -> (&'static str, &'static str) {
    match kind {
        CommandKind::List => (
            "list [pattern]",
            "List topics. The optional pattern is a regex matched from the start of the name.",
        ),
        CommandKind::Partition => (
            "partition <topic> [topic...]",
            "Show the beginning and end offset of every partition of each topic.",
        ),
        CommandKind::Help => ("help [command]", "Show usage for all commands, or for one. Alias: ?"),
        CommandKind::Exit => ("exit", "Leave the shell. Alias: quit"),
    }
}

/// Render usage for one command, or for all of them
pub fn render(command: Option<CommandKind>) -> String {
    let mut out = String::from("Usage:\n");
    let kinds: Vec<CommandKind> = match command {
        Some(kind) => vec![kind],
        None => CommandKind::ALL.to_vec(),
    };
    for kind in kinds {
        let (line, about) = usage(kind);
        out.push_str(&format!("  {}\n      {}\n\n", style(line).bold(), about));
    }
    out
}
