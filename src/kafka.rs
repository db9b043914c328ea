use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{BaseConsumer, Consumer};
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use rdkafka::metadata::MetadataTopic;
use tracing::debug;

use crate::models::{BrokerId, PartitionId, ReplicaSet, TopicName};
use crate::source::{BrokerMetadataSource, SourceError};

/// Default bound on every metadata request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("no broker addresses given")]
    NoBrokers,

    #[error("failed to create kafka client: {0}")]
    Client(#[from] KafkaError),

    #[error("kafka cluster did not answer: {0}")]
    Unreachable(#[source] SourceError),
}

/// One metadata response's view of a topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSnapshot {
    pub topic: TopicName,

    /// Error the broker attached to this topic, if any
    pub error: Option<String>,

    /// Partition ids with their replica brokers, in broker order
    pub partitions: Vec<(PartitionId, Vec<BrokerId>)>,
}

impl TopicSnapshot {
    pub fn new(topic: impl Into<TopicName>, partitions: Vec<(PartitionId, Vec<BrokerId>)>) -> Self {
        Self {
            topic: topic.into(),
            error: None,
            partitions,
        }
    }

    fn usable(&self) -> Result<&Self, SourceError> {
        match &self.error {
            Some(reason) => Err(SourceError::Topic {
                topic: self.topic.clone(),
                reason: reason.clone(),
            }),
            None => Ok(self),
        }
    }

    fn partition_ids(&self) -> Result<Vec<PartitionId>, SourceError> {
        Ok(self.usable()?.partitions.iter().map(|(id, _)| *id).collect())
    }

    fn replicas(&self, partition: PartitionId) -> Result<ReplicaSet, SourceError> {
        self.usable()?
            .partitions
            .iter()
            .find(|(id, _)| *id == partition)
            .map(|(_, brokers)| ReplicaSet::new(self.topic.clone(), partition, brokers.clone()))
            .ok_or_else(|| SourceError::UnknownPartition {
                topic: self.topic.clone(),
                partition,
            })
    }
}

impl From<&MetadataTopic> for TopicSnapshot {
    fn from(t: &MetadataTopic) -> Self {
        TopicSnapshot {
            topic: t.name().to_owned(),
            error: t.error().map(|err| RDKafkaErrorCode::from(err).to_string()),
            partitions: t
                .partitions()
                .iter()
                .map(|p| (p.id(), p.replicas().to_vec()))
                .collect(),
        }
    }
}

/// Where cluster metadata comes from.
///
/// Every call is one full metadata response; internal topics are included.
pub trait MetadataFetcher {
    fn fetch(&mut self) -> Result<Vec<TopicSnapshot>, SourceError>;
}

/// Fetches metadata through a librdkafka consumer that never subscribes
pub struct RdKafkaFetcher {
    consumer: BaseConsumer,
    timeout: Duration,
}

impl RdKafkaFetcher {
    pub fn new(brokers: &[String], timeout: Duration) -> Result<Self, ConnectionError> {
        let consumer: BaseConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers.join(","))
            .set("allow.auto.create.topics", "false")
            .create()?;

        Ok(Self { consumer, timeout })
    }
}

impl MetadataFetcher for RdKafkaFetcher {
    fn fetch(&mut self) -> Result<Vec<TopicSnapshot>, SourceError> {
        let metadata = self.consumer.fetch_metadata(None, self.timeout)?;
        Ok(metadata.topics().iter().map(TopicSnapshot::from).collect())
    }
}

/// Metadata source backed by a Kafka cluster.
///
/// Listing a topic's partitions always takes a fresh metadata response and
/// keeps that topic's part of it; replica lookups for the topic answer from
/// the kept response. The connection closes when this is dropped.
pub struct KafkaMetadataSource<F = RdKafkaFetcher> {
    fetcher: F,
    snapshot: Option<TopicSnapshot>,
}

impl KafkaMetadataSource<RdKafkaFetcher> {
    /// Connect through the given bootstrap brokers and wait for the cluster to answer
    pub fn connect(brokers: Vec<String>, timeout: Duration) -> Result<Self, ConnectionError> {
        let brokers: Vec<String> = brokers
            .into_iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        if brokers.is_empty() {
            return Err(ConnectionError::NoBrokers);
        }

        debug!(brokers = ?brokers, "connecting to kafka");

        let mut fetcher = RdKafkaFetcher::new(&brokers, timeout)?;
        fetcher.fetch().map_err(ConnectionError::Unreachable)?;

        Ok(Self::with_fetcher(fetcher))
    }
}

impl<F: MetadataFetcher> KafkaMetadataSource<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            snapshot: None,
        }
    }

    /// Fetch fresh metadata and keep the given topic's part of it
    fn refresh(&mut self, topic: &str) -> Result<(), SourceError> {
        self.snapshot = None;

        let found = self
            .fetcher
            .fetch()?
            .into_iter()
            .find(|t| t.topic == topic)
            .ok_or_else(|| SourceError::UnknownTopic(topic.to_string()))?;
        self.snapshot = Some(found);

        Ok(())
    }

    fn snapshot_for(&mut self, topic: &str) -> Result<&TopicSnapshot, SourceError> {
        let stale = self.snapshot.as_ref().map_or(true, |s| s.topic != topic);
        if stale {
            self.refresh(topic)?;
        }
        self.snapshot
            .as_ref()
            .ok_or_else(|| SourceError::UnknownTopic(topic.to_string()))
    }
}

impl<F: MetadataFetcher> BrokerMetadataSource for KafkaMetadataSource<F> {
    fn list_topics(&mut self) -> Result<Vec<TopicName>, SourceError> {
        let topics = self.fetcher.fetch()?;
        Ok(topics.into_iter().map(|t| t.topic).collect())
    }

    fn list_partitions(&mut self, topic: &str) -> Result<Vec<PartitionId>, SourceError> {
        // Always start a topic from a fresh response
        self.refresh(topic)?;
        self.snapshot_for(topic)?.partition_ids()
    }

    fn list_replicas(&mut self, topic: &str, partition: PartitionId) -> Result<ReplicaSet, SourceError> {
        self.snapshot_for(topic)?.replicas(partition)
    }
}
