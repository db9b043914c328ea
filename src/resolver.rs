use tracing::debug;

use crate::models::TopicName;
use crate::source::BrokerMetadataSource;
use crate::MetadataError;

/// Check whether the requested list means "no filter".
///
/// Splitting an empty `-topics` value on commas yields a single empty
/// string, and that exact shape is the marker. A user asking for one topic
/// literally named "" is indistinguishable from it.
pub fn is_unfiltered(requested: &[TopicName]) -> bool {
    requested.len() == 1 && requested[0].is_empty()
}

/// Determine the topics to evaluate.
///
/// Without a filter, every topic the cluster reports is returned. Otherwise
/// the request is returned as given; unknown topics surface later, when
/// their partitions are listed.
pub fn resolve(
    requested: &[TopicName],
    source: &mut dyn BrokerMetadataSource,
) -> Result<Vec<TopicName>, MetadataError> {
    let topics = if is_unfiltered(requested) {
        source.list_topics().map_err(MetadataError::Topics)?
    } else {
        requested.to_vec()
    };

    debug!(topics = ?topics, len = topics.len(), "topic list generated");

    Ok(topics)
}
