use super::{BrokerId, PartitionId, TopicName};

/// Brokers currently holding a replica of one partition.
///
/// The order is whatever the broker reported; nothing here treats the first
/// entry as the leader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaSet {
    pub topic: TopicName,
    pub partition: PartitionId,
    pub replicas: Vec<BrokerId>,
}

impl ReplicaSet {
    pub fn new(topic: impl Into<TopicName>, partition: PartitionId, replicas: Vec<BrokerId>) -> Self {
        Self {
            topic: topic.into(),
            partition,
            replicas,
        }
    }

    /// Current replication factor of the partition
    pub fn len(&self) -> usize {
        self.replicas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_replicas() {
        let set = ReplicaSet::new("orders", 0, vec![3, 1, 2]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(set.replicas, vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_replica_set() {
        let set = ReplicaSet::new("orders", 4, Vec::new());
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
    }
}
