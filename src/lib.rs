// Kafka Replication Probe Library
// Checks that topic partitions carry the required number of replicas

pub mod config;
pub mod evaluator;
pub mod kafka;
pub mod logging;
pub mod models;
pub mod resolver;
pub mod source;

pub use evaluator::Evaluator;
pub use kafka::{ConnectionError, KafkaMetadataSource, MetadataFetcher, RdKafkaFetcher, TopicSnapshot};
pub use models::{PartitionId, ReplicaSet, ReplicationLevel, TopicName, UnhealthyPartition, Verdict};
pub use source::{BrokerMetadataSource, SourceError};

/// Main entry point for a single probe run
pub struct Probe {
    evaluator: Evaluator,
}

impl Probe {
    pub fn new(level: ReplicationLevel) -> Self {
        Self {
            evaluator: Evaluator::new(level),
        }
    }

    pub fn level(&self) -> ReplicationLevel {
        self.evaluator.level()
    }

    /// Resolve the working set of topics and evaluate their replication
    pub fn run(&self, requested: &[TopicName], source: &mut dyn BrokerMetadataSource) -> Verdict {
        match resolver::resolve(requested, source) {
            Ok(topics) => self.evaluator.evaluate(&topics, source),
            Err(err) => err.into(),
        }
    }
}

/// Failure to resolve cluster metadata, tagged with what was being resolved
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("error listing topics: {0}")]
    Topics(#[source] SourceError),

    #[error("error listing partitions of topic {topic}: {source}")]
    Partitions {
        topic: TopicName,
        #[source]
        source: SourceError,
    },

    #[error("error listing replicas of topic {topic} partition {partition}: {source}")]
    Replicas {
        topic: TopicName,
        partition: PartitionId,
        #[source]
        source: SourceError,
    },
}

impl MetadataError {
    pub fn topic(&self) -> Option<&str> {
        match self {
            MetadataError::Topics(_) => None,
            MetadataError::Partitions { topic, .. } | MetadataError::Replicas { topic, .. } => {
                Some(topic)
            }
        }
    }

    pub fn partition(&self) -> Option<PartitionId> {
        match self {
            MetadataError::Replicas { partition, .. } => Some(*partition),
            _ => None,
        }
    }

    pub fn source_error(&self) -> &SourceError {
        match self {
            MetadataError::Topics(source)
            | MetadataError::Partitions { source, .. }
            | MetadataError::Replicas { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::FakeSource;

    fn topics(names: &[&str]) -> Vec<TopicName> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_all_topics_existence_only() {
        let mut source = FakeSource::new()
            .with_topic("a", &[&[1], &[1, 2]])
            .with_topic("b", &[&[]]);
        let probe = Probe::new(ReplicationLevel::EXISTENCE_ONLY);

        let verdict = probe.run(&topics(&[""]), &mut source);
        assert!(verdict.is_healthy());
        assert!(source.queried_partitions_of("a"));
        assert!(source.queried_partitions_of("b"));
    }

    #[test]
    fn test_topic_list_failure_is_error() {
        let mut source = FakeSource::new().with_topic("a", &[&[1, 2]]).failing_topics();
        let probe = Probe::new(ReplicationLevel::default());

        let verdict = probe.run(&topics(&[""]), &mut source);
        assert!(matches!(verdict, Verdict::Error(MetadataError::Topics(_))));
        assert!(!source.queried_partitions_of("a"));
    }

    #[test]
    fn test_missing_topic_is_tagged() {
        let mut source = FakeSource::new().with_topic("orders", &[&[1, 2]]);
        let probe = Probe::new(ReplicationLevel::default());

        let verdict = probe.run(&topics(&["missing"]), &mut source);
        let err = verdict.error().expect("expected an evaluation error");
        assert_eq!(err.topic(), Some("missing"));
        assert_eq!(err.partition(), None);
        assert!(matches!(err.source_error(), SourceError::UnknownTopic(t) if t == "missing"));
    }

    #[test]
    fn test_metadata_error_display() {
        let err = MetadataError::Replicas {
            topic: "orders".to_string(),
            partition: 3,
            source: SourceError::UnknownPartition {
                topic: "orders".to_string(),
                partition: 3,
            },
        };
        assert_eq!(
            err.to_string(),
            "error listing replicas of topic orders partition 3: unknown partition 3 for topic orders"
        );
        assert_eq!(err.topic(), Some("orders"));
        assert_eq!(err.partition(), Some(3));
    }
}
