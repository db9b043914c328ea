use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;

use crate::kafka::DEFAULT_TIMEOUT;
use crate::logging::LogLevel;
use crate::models::{ReplicationLevel, TopicName};

/// Check that Kafka topic partitions are replicated to the required level.
///
/// Exits 0 when every checked partition matches, non-zero otherwise.
#[derive(Debug, Clone, Parser)]
#[command(name = "kafka-replication-probe")]
#[command(version, about, long_about = None)]
pub struct ProbeConfig {
    /// Comma separated list of brokers in the Kafka cluster, including port.
    #[arg(long, env = "BROKER", default_value = "localhost:9092")]
    pub broker: String,

    /// Comma separated list of topics to check; empty checks every topic.
    #[arg(long, env = "TOPICS", default_value = "")]
    pub topics: String,

    /// Replica count every partition must have; 0 only checks partitions resolve.
    #[arg(long = "replicaLevel", env = "REPLICALEVEL", default_value_t = 2)]
    pub replica_level: u32,

    /// Log level (fatal, error, warn, info, debug).
    #[arg(long = "logLevel", env = "LOGLEVEL", default_value = "warn")]
    pub log_level: String,

    /// Seconds to wait for each broker request.
    #[arg(
        long,
        env = "TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

impl ProbeConfig {
    /// Parse process arguments, accepting single-dash long flags.
    /// Exits the process on invalid arguments.
    pub fn load() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    pub fn brokers(&self) -> Vec<String> {
        split_list(&self.broker)
    }

    /// Topic filter as given; `[""]` means every topic
    pub fn requested_topics(&self) -> Vec<TopicName> {
        split_list(&self.topics)
    }

    pub fn replication_level(&self) -> ReplicationLevel {
        ReplicationLevel::new(self.replica_level)
    }

    /// Parsed log level, and whether the configured value was recognised
    pub fn parsed_log_level(&self) -> (LogLevel, bool) {
        match self.log_level.parse::<LogLevel>() {
            Ok(level) => (level, true),
            Err(_) => (LogLevel::default(), false),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Split a comma separated value without trimming or dropping empty entries
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

/// Rewrite `-flag` and `-flag=value` into their `--` forms.
///
/// Single-letter flags (`-h`, `-V`), negative numbers and everything after
/// a bare `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let mut chars = text.chars();
            let single_dash = chars.next() == Some('-')
                && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.next().is_some_and(|c| c != '=');
            if single_dash {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}
