//! CLI module - argument parsing, command routing and the shell loop

pub mod args;
pub mod commands;
pub mod helpers;
pub mod interrupt;
pub mod router;
pub mod shell;
pub mod table;

pub use args::{Cli, GlobalOpts, OutputFormat};
pub use shell::{Flow, Shell};
