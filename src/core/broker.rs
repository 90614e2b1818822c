//! Broker session abstraction
//!
//! The inspector only ever talks to the cluster through [`BrokerSession`].
//! Implementations are expected to be read-only: nothing here creates,
//! deletes or commits anything on the broker.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// A (topic, partition id) pair, the key used for offset lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TopicPartition {
    pub topic: String,
    pub partition: i32,
}

impl TopicPartition {
    pub fn new(topic: impl Into<String>, partition: i32) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }
}

/// Offsets keyed by partition, as returned by the offset queries
pub type OffsetMap = HashMap<TopicPartition, i64>;

/// Errors raised by a broker session
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("connecting to {server} failed: {reason}")]
    Connect { server: String, reason: String },

    #[error("no bootstrap server configured")]
    NoServer,

    #[error("broker request failed: {0}")]
    Client(#[from] kafka::Error),
}

/// Read-only view of a broker cluster
///
/// Methods take `&mut self` because real clients refresh cached metadata
/// while answering, not because broker state changes.
pub trait BrokerSession {
    /// All topic names currently known to the cluster
    fn topics(&mut self) -> Result<BTreeSet<String>, BrokerError>;

    /// Partition ids of `topic`, or `None` if the cluster does not know it
    fn partitions_for_topic(&mut self, topic: &str) -> Result<Option<BTreeSet<i32>>, BrokerError>;

    /// Oldest retained offset for each requested partition, in one request
    fn beginning_offsets(&mut self, partitions: &[TopicPartition]) -> Result<OffsetMap, BrokerError>;

    /// One-past-newest offset for each requested partition, in one request
    fn end_offsets(&mut self, partitions: &[TopicPartition]) -> Result<OffsetMap, BrokerError>;
}

/// In-memory session used by unit tests across the crate
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Default)]
    pub struct FakeSession {
        /// topic -> partition -> (begin, end)
        pub cluster: BTreeMap<String, BTreeMap<i32, (i64, i64)>>,
        /// Partitions whose offsets are withheld from responses
        pub withheld: BTreeSet<TopicPartition>,
        pub fail_topics: bool,
        pub topics_calls: usize,
        pub partitions_calls: usize,
        pub begin_calls: usize,
        pub end_calls: usize,
    }

    impl FakeSession {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_topic(mut self, topic: &str, partitions: &[(i32, i64, i64)]) -> Self {
            let entry = self.cluster.entry(topic.to_string()).or_default();
            for &(id, begin, end) in partitions {
                entry.insert(id, (begin, end));
            }
            self
        }

        fn lookup(&self, partitions: &[TopicPartition], pick: fn((i64, i64)) -> i64) -> OffsetMap {
            partitions
                .iter()
                .filter(|tp| !self.withheld.contains(*tp))
                .filter_map(|tp| {
                    self.cluster
                        .get(&tp.topic)
                        .and_then(|parts| parts.get(&tp.partition))
                        .map(|&range| (tp.clone(), pick(range)))
                })
                .collect()
        }
    }

    impl BrokerSession for FakeSession {
        fn topics(&mut self) -> Result<BTreeSet<String>, BrokerError> {
            self.topics_calls += 1;
            if self.fail_topics {
                return Err(BrokerError::Connect {
                    server: "fake:9092".to_string(),
                    reason: "metadata request timed out".to_string(),
                });
            }
            Ok(self.cluster.keys().cloned().collect())
        }

        fn partitions_for_topic(&mut self, topic: &str) -> Result<Option<BTreeSet<i32>>, BrokerError> {
            self.partitions_calls += 1;
            Ok(self
                .cluster
                .get(topic)
                .map(|parts| parts.keys().copied().collect()))
        }

        fn beginning_offsets(&mut self, partitions: &[TopicPartition]) -> Result<OffsetMap, BrokerError> {
            self.begin_calls += 1;
            Ok(self.lookup(partitions, |(begin, _)| begin))
        }

        fn end_offsets(&mut self, partitions: &[TopicPartition]) -> Result<OffsetMap, BrokerError> {
            self.end_calls += 1;
            Ok(self.lookup(partitions, |(_, end)| end))
        }
    }
}
