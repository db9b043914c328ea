use std::fmt;

use super::{PartitionId, TopicName};
use crate::MetadataError;

/// Outcome of one probe run
#[derive(Debug)]
pub enum Verdict {
    /// Every partition of every topic passed
    Healthy,

    /// First partition whose replica count did not match
    Unhealthy(UnhealthyPartition),

    /// Metadata could not be resolved; the run stopped there
    Error(MetadataError),
}

impl Verdict {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Verdict::Healthy)
    }

    pub fn unhealthy_partition(&self) -> Option<&UnhealthyPartition> {
        match self {
            Verdict::Unhealthy(partition) => Some(partition),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&MetadataError> {
        match self {
            Verdict::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MetadataError> for Verdict {
    fn from(err: MetadataError) -> Self {
        Verdict::Error(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhealthyPartition {
    pub topic: TopicName,
    pub partition: PartitionId,
    pub expected: u32,
    pub actual: usize,
}

impl fmt::Display for UnhealthyPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "topic {}:{} is not fully replicated (expected {} replicas, found {})",
            self.topic, self.partition, self.expected, self.actual
        )
    }
}
