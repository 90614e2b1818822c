//! `partition` command - Show partition offsets
//!
//! ```text
//! kafka> partition orders
//! kafka> partition orders payments
//! ```

use crate::cli::commands::{CommandError, CommandKind, ParseError};
use crate::cli::table::render_offsets;
use crate::cli::OutputFormat;
use crate::core::broker::BrokerSession;
use crate::core::inspector::Inspector;

#[derive(Debug)]
pub struct PartitionArgs {
    topics: Vec<String>,
}

impl PartitionArgs {
    /// Build from the words after `partition`; at least one topic is required
    pub fn parse(args: &[&str]) -> Result<Self, ParseError> {
        if args.is_empty() {
            return Err(ParseError::MissingArgument {
                command: CommandKind::Partition,
            });
        }
        Ok(Self {
            topics: args.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Requested topics, in the order given; never empty
    pub fn topics(&self) -> &[String] {
        &self.topics
    }
}

pub fn run<S: BrokerSession>(
    args: &PartitionArgs,
    inspector: &mut Inspector<S>,
    format: OutputFormat,
) -> Result<String, CommandError> {
    let result = inspector.get_partitions(args.topics())?;
    Ok(render_offsets(&result, format)?)
}
