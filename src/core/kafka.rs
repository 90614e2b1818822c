//! Broker session backed by the `kafka` client crate

use kafka::client::{FetchOffset, KafkaClient};
use std::collections::{BTreeSet, HashMap};

use crate::core::broker::{BrokerError, BrokerSession, OffsetMap, TopicPartition};

/// Live connection to a Kafka cluster
pub struct KafkaSession {
    client: KafkaClient,
}

impl KafkaSession {
    /// Connect to the bootstrap server(s) and load the initial metadata
    ///
    /// `server` may hold several comma-separated `host:port` addresses.
    pub fn connect(server: &str, client_id: &str) -> Result<Self, BrokerError> {
        let hosts = split_hosts(server);
        if hosts.is_empty() {
            return Err(BrokerError::NoServer);
        }

        let mut client = KafkaClient::new(hosts);
        client.set_client_id(client_id.to_string());

        tracing::debug!(server, client_id, "loading cluster metadata");
        client.load_metadata_all().map_err(|e| BrokerError::Connect {
            server: server.to_string(),
            reason: e.to_string(),
        })?;
        tracing::info!(server, "connected");

        Ok(Self { client })
    }

    fn known_partitions(&self, topic: &str) -> Option<BTreeSet<i32>> {
        self.client
            .topics()
            .partitions(topic)
            .map(|partitions| partitions.iter().map(|p| p.id()).collect())
    }

    fn fetch(&mut self, partitions: &[TopicPartition], at: FetchOffset) -> Result<OffsetMap, BrokerError> {
        let topics: Vec<&str> = partitions
            .iter()
            .map(|tp| tp.topic.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if topics.is_empty() {
            return Ok(HashMap::new());
        }

        let wanted: BTreeSet<&TopicPartition> = partitions.iter().collect();
        let response = self.client.fetch_offsets(&topics, at)?;

        let mut offsets = HashMap::with_capacity(partitions.len());
        for (topic, partition_offsets) in response {
            for po in partition_offsets {
                let key = TopicPartition::new(topic.as_str(), po.partition);
                if wanted.contains(&key) {
                    offsets.insert(key, po.offset);
                }
            }
        }
        Ok(offsets)
    }
}

impl BrokerSession for KafkaSession {
    fn topics(&mut self) -> Result<BTreeSet<String>, BrokerError> {
        self.client.load_metadata_all()?;
        Ok(self
            .client
            .topics()
            .iter()
            .map(|topic| topic.name().to_string())
            .collect())
    }

    fn partitions_for_topic(&mut self, topic: &str) -> Result<Option<BTreeSet<i32>>, BrokerError> {
        if let Some(partitions) = self.known_partitions(topic) {
            return Ok(Some(partitions));
        }
        // Topic may have been created since the last metadata refresh
        self.client.load_metadata_all()?;
        Ok(self.known_partitions(topic))
    }

    fn beginning_offsets(&mut self, partitions: &[TopicPartition]) -> Result<OffsetMap, BrokerError> {
        self.fetch(partitions, FetchOffset::Earliest)
    }

    fn end_offsets(&mut self, partitions: &[TopicPartition]) -> Result<OffsetMap, BrokerError> {
        self.fetch(partitions, FetchOffset::Latest)
    }
}

/// Split a comma-separated bootstrap list into host entries
pub fn split_hosts(server: &str) -> Vec<String> {
    server
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(String::from)
        .collect()
}
