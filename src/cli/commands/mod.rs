//! Shell command implementations
//!
//! A routed line is parsed into a typed [`Command`] first and executed
//! second, so a malformed line ([`ParseError`]) never reaches the broker.

use std::fmt;
use thiserror::Error;

use crate::cli::helpers::split_words;
use crate::core::inspector::InspectError;

pub mod help;
pub mod list;
pub mod partition;

pub use help::HelpArgs;
pub use list::ListArgs;
pub use partition::PartitionArgs;

/// The commands a prefix can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    List,
    Partition,
    Exit,
}

impl CommandKind {
    /// Every kind, in the order help lists them
    pub const ALL: [CommandKind; 4] = [
        CommandKind::List,
        CommandKind::Partition,
        CommandKind::Help,
        CommandKind::Exit,
    ];

    /// Canonical command word
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Help => "help",
            CommandKind::List => "list",
            CommandKind::Partition => "partition",
            CommandKind::Exit => "exit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Prefix table of the shell, in registration order
///
/// Earlier entries win when a line starts with more than one prefix.
pub const BUILTIN_PREFIXES: &[(&str, CommandKind)] = &[
    ("help", CommandKind::Help),
    ("?", CommandKind::Help),
    ("list", CommandKind::List),
    ("partition", CommandKind::Partition),
    ("exit", CommandKind::Exit),
    ("quit", CommandKind::Exit),
];

/// A fully parsed shell command
#[derive(Debug)]
pub enum Command {
    List(ListArgs),
    Partition(PartitionArgs),
    Help(HelpArgs),
    Exit,
    /// The line matched no registered prefix
    Unknown,
}

impl Command {
    /// Parse `line` as a command of `kind`
    ///
    /// The first word is the command itself; everything after it is
    /// arguments.
    pub fn parse(kind: Option<CommandKind>, line: &str) -> Result<Self, ParseError> {
        let words = split_words(line);
        let args = words.get(1..).unwrap_or_default();

        let command = match kind {
            Some(CommandKind::List) => Command::List(ListArgs::parse(args)?),
            Some(CommandKind::Partition) => Command::Partition(PartitionArgs::parse(args)?),
            Some(CommandKind::Help) => Command::Help(HelpArgs::parse(args)),
            Some(CommandKind::Exit) => Command::Exit,
            None => Command::Unknown,
        };
        Ok(command)
    }
}

/// A line that could not be turned into a command
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("missing arguments for '{command}'")]
    MissingArgument { command: CommandKind },
}

/// Any failure of a routed command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Inspect(#[from] InspectError),

    #[error("could not encode output: {0}")]
    Render(#[from] serde_json::Error),

    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
}
