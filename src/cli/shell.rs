//! The interactive read-eval loop
//!
//! One line is processed to completion before the next one is read.
//! Failures of a single command are reported and never end the session.

use console::style;
use dialoguer::{theme::Theme, BasicHistory, Completion, Input};
use std::fmt;
use std::io::{self, BufRead, Write};

use crate::cli::commands::{
    self, help, Command, CommandError, CommandKind, ParseError, BUILTIN_PREFIXES,
};
use crate::cli::router::Router;
use crate::cli::OutputFormat;
use crate::core::broker::BrokerSession;
use crate::core::inspector::Inspector;

/// Prompt label, rendered as `kafka> `
pub const PROMPT: &str = "kafka";

/// Whether the loop should keep reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Command shell bound to one broker session
pub struct Shell<S> {
    inspector: Inspector<S>,
    router: Router<CommandKind>,
    format: OutputFormat,
}

impl<S: BrokerSession> Shell<S> {
    pub fn new(session: S, format: OutputFormat) -> Self {
        Self {
            inspector: Inspector::new(session),
            router: builtin_router(),
            format,
        }
    }

    /// Route a trimmed, non-empty line and run its command
    ///
    /// Errors are written to `out` and logged; they never escape.
    pub fn dispatch(&mut self, line: &str, out: &mut dyn Write) -> Flow {
        let kind = self.router.route(line).copied();
        tracing::debug!(line, command = ?kind, "dispatching");

        match self.execute(kind, line, out) {
            Ok(flow) => flow,
            Err(CommandError::Parse(ParseError::MissingArgument { command })) => {
                report(out, &help::render(Some(command)));
                Flow::Continue
            }
            Err(e) => {
                tracing::warn!(line, error = %e, "command failed");
                report(out, &format!("{}\n", style(format!("Error: {}", e)).red()));
                Flow::Continue
            }
        }
    }

    fn execute(
        &mut self,
        kind: Option<CommandKind>,
        line: &str,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let output = match Command::parse(kind, line)? {
            Command::List(args) => commands::list::run(&args, &mut self.inspector, self.format)?,
            Command::Partition(args) => {
                commands::partition::run(&args, &mut self.inspector, self.format)?
            }
            Command::Help(args) => help::render(args.command),
            Command::Unknown => help::render(None),
            Command::Exit => return Ok(Flow::Exit),
        };
        out.write_all(output.as_bytes())?;
        out.flush()?;
        Ok(Flow::Continue)
    }

    /// Run commands read line by line from `input`, without a prompt
    pub fn run_script<R: BufRead>(&mut self, input: R, out: &mut dyn Write) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if self.dispatch(line, out) == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Prompt on the terminal until `exit`
    ///
    /// Ctrl-C is handled by the SIGINT handler from [`crate::cli::interrupt`].
    pub fn run_interactive(&mut self, history_size: usize) -> io::Result<()> {
        let theme = PromptTheme;
        let completion = CommandCompletion::new(&self.router);
        let mut history = BasicHistory::new()
            .max_entries(history_size)
            .no_duplicates(true);
        let mut stdout = io::stdout();

        loop {
            let read = Input::<String>::with_theme(&theme)
                .with_prompt(PROMPT)
                .allow_empty(true)
                .history_with(&mut history)
                .completion_with(&completion)
                .interact_text();

            // Ctrl-C never returns here, see `cli::interrupt`
            let line = read.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if self.dispatch(line, &mut stdout) == Flow::Exit {
                break;
            }
        }
        Ok(())
    }
}

/// Router with the built-in command prefixes registered in order
pub fn builtin_router() -> Router<CommandKind> {
    let mut router = Router::new();
    for &(prefix, kind) in BUILTIN_PREFIXES {
        router.register(prefix, kind);
    }
    router
}

/// Welcome text printed before the first prompt
pub fn banner() -> String {
    let rule = "#".repeat(50);
    let text = format!(
        "{rule}\n{} (version {})\nType \"help\" or \"?\" for more information.\n{rule}\n",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );
    style(text).yellow().to_string()
}

/// Line printed when the session ends
pub fn farewell() -> &'static str {
    "Thanks for using kshell, bye."
}

fn report(out: &mut dyn Write, text: &str) {
    if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        tracing::error!(error = %e, "could not write to output");
    }
}

/// `kafka> ` prompt in the shell's colors
struct PromptTheme;

impl Theme for PromptTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{}", style(format!("{}> ", prompt)).cyan())
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(f, "{}{}", style(format!("{}> ", prompt)).cyan(), sel)
    }
}

/// Tab completion of the first word against registered command names
struct CommandCompletion {
    names: Vec<String>,
}

impl CommandCompletion {
    fn new(router: &Router<CommandKind>) -> Self {
        let names = router
            .prefixes()
            .filter(|p| p.chars().all(|c| c.is_ascii_alphabetic()))
            .map(String::from)
            .collect();
        Self { names }
    }
}

impl Completion for CommandCompletion {
    fn get(&self, input: &str) -> Option<String> {
        if input.is_empty() || input.contains(char::is_whitespace) {
            return None;
        }
        let mut candidates = self.names.iter().filter(|n| n.starts_with(input));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Some(only.clone()),
            _ => None,
        }
    }
}
