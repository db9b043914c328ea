use crate::models::{PartitionId, ReplicaSet, TopicName};

/// Read-only view of cluster metadata that the probe runs against.
///
/// Calls are blocking and issued one at a time. Implementations may keep
/// the last metadata response for a topic so that replica lookups answer
/// from the same snapshot the partition list came from.
pub trait BrokerMetadataSource {
    /// All topics known to the cluster
    fn list_topics(&mut self) -> Result<Vec<TopicName>, SourceError>;

    /// Partition ids of a topic, in the order the broker reports them
    fn list_partitions(&mut self, topic: &str) -> Result<Vec<PartitionId>, SourceError>;

    /// Current replica assignment of one partition
    fn list_replicas(&mut self, topic: &str, partition: PartitionId)
        -> Result<ReplicaSet, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Client(#[from] rdkafka::error::KafkaError),

    #[error("unknown topic {0}")]
    UnknownTopic(TopicName),

    #[error("unknown partition {partition} for topic {topic}")]
    UnknownPartition {
        topic: TopicName,
        partition: PartitionId,
    },

    #[error("metadata for topic {topic} reports {reason}")]
    Topic { topic: TopicName, reason: String },
}
