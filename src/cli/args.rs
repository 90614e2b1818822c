//! CLI argument definitions using clap derive

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "kshell")]
#[command(author, version, about = "Interactive Kafka inspection shell")]
#[command(long_about = "An interactive shell for listing Kafka topics and inspecting the offset ranges of their partitions.")]
pub struct Cli {
    /// Kafka bootstrap server(s), host:port, comma separated
    #[arg(long, short = 's', env = "KSHELL_SERVER")]
    pub server: Option<String>,

    /// Client id sent to the brokers
    #[arg(long, env = "KSHELL_CLIENT_ID")]
    pub client_id: Option<String>,

    #[command(flatten)]
    pub global: GlobalOpts,

    /// Print a completion script for the given shell and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format for command results
    #[arg(long, short = 'f')]
    pub format: Option<OutputFormat>,

    /// Suppress the welcome banner
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Enable verbose (debug) logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tables and separators for reading at the prompt
    #[default]
    Table,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
}

impl OutputFormat {
    /// Parse a format name as written in the config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }

    /// Pick the output format: `--format` first, then the config file
    ///
    /// An unknown name in the config is logged and ignored.
    pub fn resolve(flag: Option<Self>, configured: Option<&str>) -> Self {
        if let Some(format) = flag {
            return format;
        }
        match configured {
            Some(name) => Self::from_name(name).unwrap_or_else(|| {
                tracing::warn!(format = name, "ignoring unknown output format in config");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
