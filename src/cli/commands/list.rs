//! `list` command - List topics
//!
//! ```text
//! kafka> list
//! kafka> list orders.*
//! ```
//!
//! The optional pattern is a regular expression matched against topic names
//! from their first character, so `list pay` lists `payments` but not
//! `repay`.

use regex::Regex;

use crate::cli::commands::{CommandError, ParseError};
use crate::cli::table::render_listing;
use crate::cli::OutputFormat;
use crate::core::broker::BrokerSession;
use crate::core::inspector::Inspector;

#[derive(Debug, Default)]
pub struct ListArgs {
    /// Only topics this pattern matches from the start are listed
    pub pattern: Option<Regex>,
}

impl ListArgs {
    /// Build from the words after `list`; words past the pattern are ignored
    pub fn parse(args: &[&str]) -> Result<Self, ParseError> {
        let pattern = match args.first() {
            Some(raw) => Some(Regex::new(raw).map_err(|source| ParseError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })?),
            None => None,
        };
        Ok(Self { pattern })
    }
}

pub fn run<S: BrokerSession>(
    args: &ListArgs,
    inspector: &mut Inspector<S>,
    format: OutputFormat,
) -> Result<String, CommandError> {
    let listing = inspector.list_topics(args.pattern.as_ref())?;
    Ok(render_listing(&listing, format)?)
}
