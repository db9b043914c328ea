use std::fmt;

/// Required number of replicas per partition.
///
/// Zero switches the check to existence only: a partition passes as long as
/// its replica set can be fetched at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplicationLevel(u32);

impl ReplicationLevel {
    pub const EXISTENCE_ONLY: ReplicationLevel = ReplicationLevel(0);

    pub fn new(level: u32) -> Self {
        Self(level)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn is_existence_only(&self) -> bool {
        self.0 == 0
    }

    /// Check a partition's replica count against this level.
    /// Over-replication fails just like under-replication.
    pub fn is_satisfied_by(&self, actual: usize) -> bool {
        self.is_existence_only() || actual == self.0 as usize
    }
}

impl Default for ReplicationLevel {
    fn default() -> Self {
        Self(2)
    }
}

impl fmt::Display for ReplicationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
