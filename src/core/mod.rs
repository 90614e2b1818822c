//! Core module - broker access, inspection and configuration

pub mod broker;
pub mod config;
pub mod inspector;
pub mod kafka;

pub use broker::{BrokerError, BrokerSession, TopicPartition};
pub use config::Config;
pub use inspector::{InspectError, InspectionResult, Inspector, OffsetRange, TopicListing, TopicOffsets};
pub use kafka::KafkaSession;
