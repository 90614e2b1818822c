//! Topic and partition inspection
//!
//! Resolves topics to partitions and aggregates their offset ranges. Each
//! topic costs exactly two offset round-trips (one for the beginning
//! offsets, one for the end offsets) no matter how many partitions it has.

use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::core::broker::{BrokerError, BrokerSession, OffsetMap, TopicPartition};

/// Errors that abort an inspection
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("at least one topic name is required")]
    NoTopics,

    #[error("broker returned no {which} offset for partition {partition} of topic '{topic}'")]
    MissingOffset {
        topic: String,
        partition: i32,
        which: OffsetKind,
    },

    #[error("invalid offset range {begin}..{end} for partition {partition} of topic '{topic}'")]
    InvalidRange {
        topic: String,
        partition: i32,
        begin: i64,
        end: i64,
    },

    #[error(transparent)]
    Broker(#[from] BrokerError),
}

/// Which side of an offset range a lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetKind {
    Beginning,
    End,
}

impl std::fmt::Display for OffsetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffsetKind::Beginning => write!(f, "beginning"),
            OffsetKind::End => write!(f, "end"),
        }
    }
}

/// Offset range of a single partition
///
/// Always satisfies `0 <= begin <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OffsetRange {
    begin: i64,
    end: i64,
}

impl OffsetRange {
    /// Returns `None` unless `0 <= begin <= end`
    pub fn new(begin: i64, end: i64) -> Option<Self> {
        (0 <= begin && begin <= end).then_some(Self { begin, end })
    }

    pub fn begin(&self) -> i64 {
        self.begin
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of messages currently retained in the partition
    pub fn message_count(&self) -> i64 {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// Outcome for one requested topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TopicOffsets {
    /// Offset range of every partition, keyed by partition id
    Found { partitions: BTreeMap<i32, OffsetRange> },
    /// The broker reported no partitions for this topic
    NoPartitions,
}

/// Offsets of one requested topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicReport {
    pub topic: String,
    #[serde(flatten)]
    pub offsets: TopicOffsets,
}

/// Result of `get_partitions`, in the order the topics were requested
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InspectionResult {
    pub topics: Vec<TopicReport>,
}

impl InspectionResult {
    pub fn get(&self, topic: &str) -> Option<&TopicOffsets> {
        self.topics
            .iter()
            .find(|report| report.topic == topic)
            .map(|report| &report.offsets)
    }
}

/// Topic names returned by `list_topics`, sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicListing {
    pub topics: Vec<String>,
}

impl TopicListing {
    pub fn count(&self) -> usize {
        self.topics.len()
    }
}

impl Serialize for TopicListing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("TopicListing", 2)?;
        state.serialize_field("topics", &self.topics)?;
        state.serialize_field("count", &self.count())?;
        state.end()
    }
}

/// Runs inspection queries against a broker session
pub struct Inspector<S> {
    session: S,
}

impl<S: BrokerSession> Inspector<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// List topics, keeping only names the pattern matches from their start
    pub fn list_topics(&mut self, pattern: Option<&Regex>) -> Result<TopicListing, InspectError> {
        let topics = self.session.topics()?;
        let total = topics.len();

        let topics: Vec<String> = topics
            .into_iter()
            .filter(|name| pattern.map_or(true, |re| matches_from_start(re, name)))
            .collect();

        tracing::debug!(total, matched = topics.len(), "listed topics");
        Ok(TopicListing { topics })
    }

    /// Offset ranges for every partition of each requested topic
    ///
    /// Topics the broker has no partitions for are reported as
    /// [`TopicOffsets::NoPartitions`] and do not fail the batch. A partition
    /// whose offsets cannot be fetched fails the whole call.
    pub fn get_partitions(&mut self, topics: &[String]) -> Result<InspectionResult, InspectError> {
        if topics.is_empty() {
            return Err(InspectError::NoTopics);
        }

        let mut seen = BTreeSet::new();
        let mut result = InspectionResult::default();

        for topic in topics {
            if !seen.insert(topic.as_str()) {
                continue;
            }
            let offsets = self.topic_offsets(topic)?;
            result.topics.push(TopicReport {
                topic: topic.clone(),
                offsets,
            });
        }

        Ok(result)
    }

    fn topic_offsets(&mut self, topic: &str) -> Result<TopicOffsets, InspectError> {
        let ids = match self.session.partitions_for_topic(topic)? {
            Some(ids) if !ids.is_empty() => ids,
            _ => {
                tracing::debug!(topic, "no partitions found");
                return Ok(TopicOffsets::NoPartitions);
            }
        };

        let requested: Vec<TopicPartition> = ids
            .iter()
            .map(|&id| TopicPartition::new(topic, id))
            .collect();

        let begins = self.session.beginning_offsets(&requested)?;
        let ends = self.session.end_offsets(&requested)?;
        tracing::debug!(topic, partitions = requested.len(), "fetched offsets");

        let mut partitions = BTreeMap::new();
        for tp in &requested {
            let begin = offset_for(&begins, tp, OffsetKind::Beginning)?;
            let end = offset_for(&ends, tp, OffsetKind::End)?;
            let range = OffsetRange::new(begin, end).ok_or_else(|| InspectError::InvalidRange {
                topic: tp.topic.clone(),
                partition: tp.partition,
                begin,
                end,
            })?;
            partitions.insert(tp.partition, range);
        }

        Ok(TopicOffsets::Found { partitions })
    }
}

fn offset_for(offsets: &OffsetMap, tp: &TopicPartition, which: OffsetKind) -> Result<i64, InspectError> {
    offsets
        .get(tp)
        .copied()
        .ok_or_else(|| InspectError::MissingOffset {
            topic: tp.topic.clone(),
            partition: tp.partition,
            which,
        })
}

/// True if `re` matches a prefix of `name` (match, not search, semantics)
pub fn matches_from_start(re: &Regex, name: &str) -> bool {
    re.find(name).is_some_and(|m| m.start() == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::broker::fake::FakeSession;

    fn sample_cluster() -> FakeSession {
        FakeSession::new()
            .with_topic("orders", &[(0, 10, 50), (1, 5, 5)])
            .with_topic("orders-dlq", &[(0, 0, 3)])
            .with_topic("payments", &[(0, 0, 100), (1, 7, 90), (2, 12, 12)])
    }

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_offset_range_rejects_inverted_and_negative() {
        assert!(OffsetRange::new(5, 5).is_some());
        assert!(OffsetRange::new(6, 5).is_none());
        assert!(OffsetRange::new(-1, 5).is_none());
        let range = OffsetRange::new(10, 50).unwrap();
        assert_eq!(range.message_count(), 40);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_list_topics_all() {
        let mut inspector = Inspector::new(sample_cluster());
        let listing = inspector.list_topics(None).unwrap();
        assert_eq!(listing.topics, topics(&["orders", "orders-dlq", "payments"]));
        assert_eq!(listing.count(), 3);
        assert_eq!(inspector.session().topics_calls, 1);
    }

    #[test]
    fn test_list_topics_pattern_is_anchored_at_start() {
        let mut inspector = Inspector::new(sample_cluster());

        let re = Regex::new("orders.*").unwrap();
        let listing = inspector.list_topics(Some(&re)).unwrap();
        assert_eq!(listing.topics, topics(&["orders", "orders-dlq"]));
        assert_eq!(listing.count(), 2);

        // "dlq" occurs inside "orders-dlq" but not at the start
        let re = Regex::new("dlq").unwrap();
        let listing = inspector.list_topics(Some(&re)).unwrap();
        assert_eq!(listing.count(), 0);
    }

    #[test]
    fn test_list_topics_empty_cluster() {
        let mut inspector = Inspector::new(FakeSession::new());
        let listing = inspector.list_topics(None).unwrap();
        assert_eq!(listing.count(), 0);
    }

    #[test]
    fn test_list_topics_propagates_broker_failure() {
        let mut session = sample_cluster();
        session.fail_topics = true;
        let mut inspector = Inspector::new(session);
        let err = inspector.list_topics(None).unwrap_err();
        assert!(matches!(err, InspectError::Broker(_)));
    }

    #[test]
    fn test_get_partitions_requires_topics() {
        let mut inspector = Inspector::new(sample_cluster());
        let err = inspector.get_partitions(&[]).unwrap_err();
        assert!(matches!(err, InspectError::NoTopics));
    }

    #[test]
    fn test_get_partitions_three_partitions() {
        let mut inspector = Inspector::new(sample_cluster());
        let result = inspector.get_partitions(&topics(&["payments"])).unwrap();

        match result.get("payments").unwrap() {
            TopicOffsets::Found { partitions } => {
                assert_eq!(partitions.len(), 3);
                assert!(partitions.values().all(|r| r.begin() <= r.end()));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_get_partitions_orders_scenario() {
        let mut inspector = Inspector::new(sample_cluster());
        let result = inspector.get_partitions(&topics(&["orders"])).unwrap();

        let TopicOffsets::Found { partitions } = result.get("orders").unwrap() else {
            panic!("orders should have partitions");
        };
        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[&0], OffsetRange::new(10, 50).unwrap());
        assert_eq!(partitions[&1], OffsetRange::new(5, 5).unwrap());
        assert!(partitions[&1].is_empty());
    }

    #[test]
    fn test_get_partitions_missing_topic_is_soft_failure() {
        let mut inspector = Inspector::new(sample_cluster());
        let result = inspector
            .get_partitions(&topics(&["missing-topic"]))
            .unwrap();
        assert_eq!(result.get("missing-topic"), Some(&TopicOffsets::NoPartitions));
    }

    #[test]
    fn test_get_partitions_keeps_request_order() {
        let mut inspector = Inspector::new(sample_cluster());
        let result = inspector
            .get_partitions(&topics(&["payments", "missing", "orders", "payments"]))
            .unwrap();

        let order: Vec<&str> = result.topics.iter().map(|r| r.topic.as_str()).collect();
        assert_eq!(order, vec!["payments", "missing", "orders"]);
    }

    #[test]
    fn test_get_partitions_batches_offset_queries() {
        let mut inspector = Inspector::new(sample_cluster());
        inspector
            .get_partitions(&topics(&["payments"]))
            .unwrap();

        let session = inspector.into_session();
        assert_eq!(session.partitions_calls, 1);
        assert_eq!(session.begin_calls, 1);
        assert_eq!(session.end_calls, 1);
    }

    #[test]
    fn test_get_partitions_no_offset_queries_for_missing_topic() {
        let mut inspector = Inspector::new(sample_cluster());
        inspector
            .get_partitions(&topics(&["missing"]))
            .unwrap();

        let session = inspector.session();
        assert_eq!(session.begin_calls, 0);
        assert_eq!(session.end_calls, 0);
    }

    #[test]
    fn test_get_partitions_missing_offset_is_hard_error() {
        let mut session = sample_cluster();
        session.withheld.insert(TopicPartition::new("orders", 1));
        let mut inspector = Inspector::new(session);

        let err = inspector
            .get_partitions(&topics(&["payments", "orders"]))
            .unwrap_err();
        match err {
            InspectError::MissingOffset { topic, partition, which } => {
                assert_eq!(topic, "orders");
                assert_eq!(partition, 1);
                assert_eq!(which, OffsetKind::Beginning);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_get_partitions_rejects_inverted_range() {
        let session = FakeSession::new().with_topic("broken", &[(0, 9, 3)]);
        let mut inspector = Inspector::new(session);
        let err = inspector.get_partitions(&topics(&["broken"])).unwrap_err();
        assert!(matches!(err, InspectError::InvalidRange { begin: 9, end: 3, .. }));
    }

    #[test]
    fn test_matches_from_start() {
        let re = Regex::new("pay").unwrap();
        assert!(matches_from_start(&re, "payments"));
        assert!(!matches_from_start(&re, "repay"));
    }
}
