//! Kafka replication readiness probe.
//!
//! ```bash
//! # every topic must have exactly three replicas per partition
//! kafka-replication-probe -broker kafka-0:9092,kafka-1:9092 -replicaLevel 3
//!
//! # only check that the listed topics' partitions resolve
//! kafka-replication-probe -topics orders,payments -replicaLevel 0
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use kafka_replication_probe::config::ProbeConfig;
use kafka_replication_probe::logging::{self, log_verdict};
use kafka_replication_probe::{KafkaMetadataSource, Probe, Verdict};
use tracing::{debug, error, info, warn};

fn main() -> ExitCode {
    let config = ProbeConfig::load();
    let (level, recognised) = config.parsed_log_level();

    let subscriber = logging::subscriber(level, std::io::stdout);
    tracing::subscriber::with_default(subscriber, || {
        if !recognised {
            warn!(log_level = %config.log_level, fallback = %level, "unknown log level");
        }

        match run(&config) {
            Ok(verdict) => {
                log_verdict(&verdict);
                if verdict.is_healthy() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(err) => {
                error!(err = %format!("{err:#}"), "probe failed");
                ExitCode::FAILURE
            }
        }
    })
}

fn run(config: &ProbeConfig) -> Result<Verdict> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        brokers = %config.broker,
        "starting app"
    );

    let mut source = KafkaMetadataSource::connect(config.brokers(), config.request_timeout())
        .context("failed to start kafka client")?;

    let probe = Probe::new(config.replication_level());
    debug!(replica_level = %probe.level(), topics = %config.topics, "checking replication");
    Ok(probe.run(&config.requested_topics(), &mut source))
}
