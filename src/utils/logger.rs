//! Logging setup
//!
//! Logs go to stderr so that report output on stdout (e.g. `--format json`)
//! stays machine readable.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Verbosity selected by `--verbose`, `PARALLEL_MANAGER_LOG` or config
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Directives for `level`: this crate at `level`, the HTTP stack capped at
/// `warn` unless tracing
fn filter_directive(level: LogLevel) -> String {
    let crate_level = level.to_tracing_level();
    if level == LogLevel::Trace {
        format!("parallel_manager={crate_level},reqwest=debug,hyper_util=debug")
    } else {
        format!("parallel_manager={crate_level},reqwest=warn,hyper_util=warn")
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level` when set. Returns `false` if a subscriber
/// was already installed.
pub fn init_logger(level: LogLevel) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("unknown"), None);
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(
            filter_directive(LogLevel::Debug),
            "parallel_manager=DEBUG,reqwest=warn,hyper_util=warn"
        );
        assert!(filter_directive(LogLevel::Trace).contains("reqwest=debug"));
    }

    #[test]
    fn test_levels_order_by_verbosity() {
        assert!(LogLevel::Trace < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
