// Type aliases used across models
pub type BrokerId = i32;
pub type TopicName = String;
pub type PartitionId = i32;

// Module declarations
mod replication;
mod topic;
mod verdict;

// Re-exports
pub use replication::ReplicationLevel;
pub use topic::ReplicaSet;
pub use verdict::{UnhealthyPartition, Verdict};
