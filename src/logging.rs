use std::fmt;
use std::str::FromStr;

use tracing::{error, info, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::models::Verdict;

/// Verbosity accepted on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Fatal,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// tracing has no fatal level; fatal output goes out as errors
    pub fn filter(&self) -> LevelFilter {
        match self {
            LogLevel::Fatal | LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a valid log level: {0:?}")]
pub struct ParseLogLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "panic" | "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Build the JSON line logger.
///
/// Nothing is installed globally; callers scope it with
/// `tracing::subscriber::with_default`.
pub fn subscriber<W>(level: LogLevel, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_max_level(level.filter())
        .with_writer(writer)
        .finish()
}

/// Emit the terminal log line for a run
pub fn log_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Healthy => info!("all partitions are replicated"),
        Verdict::Unhealthy(unhealthy) => error!(
            topic = %unhealthy.topic,
            partition = unhealthy.partition,
            expected = unhealthy.expected,
            actual = unhealthy.actual,
            "{}",
            unhealthy
        ),
        Verdict::Error(err) => error!(
            topic = err.topic(),
            partition = err.partition(),
            err = %err.source_error(),
            "{}",
            err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReplicationLevel, TopicName, UnhealthyPartition};
    use crate::source::fake::FakeSource;
    use crate::Probe;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn run_with_level(level: LogLevel) -> Vec<String> {
        let capture = Capture::default();
        let mut source = FakeSource::new().with_topic("orders", &[&[1, 2], &[2, 3]]);
        let requested: Vec<TopicName> = vec!["orders".to_string()];

        tracing::subscriber::with_default(subscriber(level, capture.clone()), || {
            let verdict = Probe::new(ReplicationLevel::new(2)).run(&requested, &mut source);
            log_verdict(&verdict);
        });

        capture.lines()
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!("fatal".parse::<LogLevel>(), Ok(LogLevel::Fatal));
        assert_eq!("panic".parse::<LogLevel>(), Ok(LogLevel::Fatal));
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_fatal_maps_to_error() {
        assert_eq!(LogLevel::Fatal.filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::default().filter(), LevelFilter::WARN);
    }

    #[test]
    fn test_debug_logs_every_partition() {
        let lines = run_with_level(LogLevel::Debug);

        let found: Vec<&String> = lines.iter().filter(|l| l.contains("found topic")).collect();
        assert_eq!(found.len(), 2);
        assert!(found[0].contains(r#""topic":"orders""#));
        assert!(found[0].contains(r#""partition":0"#));
        assert!(lines.iter().any(|l| l.contains("topic list generated")));
        assert!(lines.iter().any(|l| l.contains("all partitions are replicated")));
    }

    #[test]
    fn test_warn_level_is_quiet_on_success() {
        assert!(run_with_level(LogLevel::Warn).is_empty());
    }

    #[test]
    fn test_unhealthy_verdict_line() {
        let capture = Capture::default();
        let verdict = Verdict::Unhealthy(UnhealthyPartition {
            topic: "orders".to_string(),
            partition: 1,
            expected: 3,
            actual: 2,
        });

        tracing::subscriber::with_default(subscriber(LogLevel::Fatal, capture.clone()), || {
            log_verdict(&verdict);
        });

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(r#""level":"ERROR""#));
        assert!(lines[0].contains(r#""expected":3"#));
        assert!(lines[0].contains(r#""actual":2"#));
        assert!(lines[0].contains("not fully replicated"));
    }
}
