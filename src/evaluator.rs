use tracing::debug;

use crate::models::{ReplicationLevel, TopicName, UnhealthyPartition, Verdict};
use crate::source::BrokerMetadataSource;
use crate::MetadataError;

/// Walks topics then partitions and applies the replication policy.
///
/// The scan is strictly sequential and stops at the first partition that
/// fails the policy or cannot be resolved. Nothing is retried.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    level: ReplicationLevel,
}

impl Evaluator {
    pub fn new(level: ReplicationLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> ReplicationLevel {
        self.level
    }

    /// Evaluate the given topics, in order, against the replication level
    pub fn evaluate(&self, topics: &[TopicName], source: &mut dyn BrokerMetadataSource) -> Verdict {
        match self.scan(topics, source) {
            Ok(None) => Verdict::Healthy,
            Ok(Some(unhealthy)) => Verdict::Unhealthy(unhealthy),
            Err(err) => Verdict::from(err),
        }
    }

    fn scan(
        &self,
        topics: &[TopicName],
        source: &mut dyn BrokerMetadataSource,
    ) -> Result<Option<UnhealthyPartition>, MetadataError> {
        for topic in topics {
            let partitions = source
                .list_partitions(topic)
                .map_err(|err| MetadataError::Partitions {
                    topic: topic.clone(),
                    source: err,
                })?;

            for partition in partitions {
                let replicas = source.list_replicas(topic, partition).map_err(|err| {
                    MetadataError::Replicas {
                        topic: topic.clone(),
                        partition,
                        source: err,
                    }
                })?;

                debug!(
                    topic = %topic,
                    partition,
                    replicas = ?replicas.replicas,
                    "found topic"
                );

                if !self.level.is_satisfied_by(replicas.len()) {
                    return Ok(Some(UnhealthyPartition {
                        topic: topic.clone(),
                        partition,
                        expected: self.level.get(),
                        actual: replicas.len(),
                    }));
                }
            }
        }

        Ok(None)
    }
}
