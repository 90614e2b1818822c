//! kshell: an interactive Kafka inspection shell
//!
//! Lists topics and reports the beginning and end offsets of their
//! partitions through a small prefix-routed command language.

pub mod cli;
pub mod core;
