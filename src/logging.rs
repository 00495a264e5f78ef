//! Logging infrastructure for ado-pr.
//!
//! Logging is off unless a level is given. When on, events from this crate
//! are written as text or JSON to stderr or appended to a file, through a
//! non-blocking writer whose guard must outlive the program's work.

use std::path::PathBuf;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::ConfigError;

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a log level from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Convert to a filter string for tracing-subscriber.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

impl LogFormat {
    /// Parse a log format from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level (None means logging is disabled).
    pub level: Option<LogLevel>,
    /// Output file path (None means stderr).
    pub file: Option<PathBuf>,
    /// Output format.
    pub format: LogFormat,
}

impl LogConfig {
    /// Builds a config from raw option values, falling back to
    /// `ADO_PR_LOG_LEVEL`, `ADO_PR_LOG_FILE`, and `ADO_PR_LOG_FORMAT`.
    ///
    /// Explicit values take precedence over the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the flag or variable
    /// whose level or format string is not recognized.
    pub fn resolve(
        level: Option<&str>,
        file: Option<PathBuf>,
        format: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let level = match pick(level, "--log-level", "ADO_PR_LOG_LEVEL") {
            Some((field, value)) => Some(
                LogLevel::parse(&value).ok_or(ConfigError::InvalidValue { field, value })?,
            ),
            None => None,
        };
        let format = match pick(format, "--log-format", "ADO_PR_LOG_FORMAT") {
            Some((field, value)) => {
                LogFormat::parse(&value).ok_or(ConfigError::InvalidValue { field, value })?
            }
            None => LogFormat::default(),
        };

        Ok(Self {
            level,
            file: file.or_else(|| std::env::var("ADO_PR_LOG_FILE").ok().map(PathBuf::from)),
            format,
        })
    }
}

/// The explicit value if given, else the environment variable, tagged with
/// where it came from.
fn pick(
    explicit: Option<&str>,
    flag: &'static str,
    env_var: &'static str,
) -> Option<(&'static str, String)> {
    match explicit {
        Some(value) => Some((flag, value.to_string())),
        None => std::env::var(env_var).ok().map(|value| (env_var, value)),
    }
}

/// Guard that must be held to ensure logs are flushed.
///
/// When this guard is dropped, all pending log messages are flushed.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Initialize the logging system.
///
/// Returns `Ok(None)` when logging is disabled. The guard must be held until
/// application exit to ensure logs are flushed.
///
/// # Errors
///
/// Returns the I/O error when the log file cannot be opened.
///
/// # Example
///
/// ```rust,no_run
/// use ado_pr::logging::{LogConfig, LogFormat, LogLevel, init_logging};
/// use std::path::PathBuf;
///
/// let config = LogConfig {
///     level: Some(LogLevel::Debug),
///     file: Some(PathBuf::from("/tmp/ado-pr.log")),
///     format: LogFormat::Json,
/// };
///
/// let _guard = init_logging(&config).expect("log file should open");
/// ```
pub fn init_logging(config: &LogConfig) -> std::io::Result<Option<LogGuard>> {
    let Some(level) = config.level else {
        return Ok(None);
    };

    // Only this crate's events.
    let filter = EnvFilter::new(format!("ado_pr={}", level.as_filter_str()));

    let (writer, guard) = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };
    let to_file = config.file.is_some();

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .with_writer(writer)
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_file(to_file)
                .with_line_number(to_file);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
        LogFormat::Text => {
            let layer = text_layer(writer, to_file);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
    }

    Ok(Some(LogGuard { _guard: guard }))
}

fn text_layer<S>(writer: NonBlocking, to_file: bool) -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_file(to_file)
        .with_line_number(to_file)
        .with_ansi(!to_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::file_serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("ADO_PR_LOG_LEVEL");
            std::env::remove_var("ADO_PR_LOG_FILE");
            std::env::remove_var("ADO_PR_LOG_FORMAT");
        }
    }

    /// # Test: Log Level Parsing
    ///
    /// Verifies that log levels are parsed correctly from strings.
    ///
    /// ## Test Scenario
    /// - Parse valid log level strings (case-insensitive)
    /// - Parse invalid log level strings
    ///
    /// ## Expected Outcome
    /// - Valid strings return the corresponding LogLevel
    /// - Invalid strings return None
    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::parse("TRACE"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("Debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("verbose"), None);
        assert_eq!(LogLevel::Warn.as_filter_str(), "warn");
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("text"), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("yaml"), None);
    }

    /// # Test: Explicit Values Beat Environment
    ///
    /// ## Test Scenario
    /// - Sets all ADO_PR_LOG_* variables
    /// - Resolves with explicit level and format but no file
    ///
    /// ## Expected Outcome
    /// - Explicit level and format win
    /// - File falls back to the environment
    #[test]
    #[file_serial(env_tests)]
    fn test_resolve_precedence() {
        clear_env();
        unsafe {
            std::env::set_var("ADO_PR_LOG_LEVEL", "error");
            std::env::set_var("ADO_PR_LOG_FILE", "/tmp/env.log");
            std::env::set_var("ADO_PR_LOG_FORMAT", "text");
        }

        let config = LogConfig::resolve(Some("debug"), None, Some("json")).unwrap();
        clear_env();

        assert_eq!(config.level, Some(LogLevel::Debug));
        assert_eq!(config.file, Some(PathBuf::from("/tmp/env.log")));
        assert_eq!(config.format, LogFormat::Json);
    }

    /// # Test: Logging Disabled by Default
    ///
    /// ## Test Scenario
    /// - Resolves with nothing set and initializes
    ///
    /// ## Expected Outcome
    /// - No level, text format, and init returns no guard
    #[test]
    #[file_serial(env_tests)]
    fn test_logging_disabled_by_default() {
        clear_env();
        let config = LogConfig::resolve(None, None, None).unwrap();
        assert_eq!(config, LogConfig::default());
        // A disabled config never touches the global subscriber.
        assert!(init_logging(&config).unwrap().is_none());
    }

    /// # Unrecognized Level or Format
    ///
    /// ## Test Scenario
    /// - Resolves an unknown level given as a flag
    /// - Resolves an unknown format coming from the environment
    ///
    /// ## Expected Outcome
    /// - Each yields InvalidValue naming where the value came from
    #[test]
    #[file_serial(env_tests)]
    fn test_resolve_rejects_unknown_values() {
        clear_env();
        let err = LogConfig::resolve(Some("verbose"), None, None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "--log-level", ref value } if value == "verbose"
        ));

        unsafe {
            std::env::set_var("ADO_PR_LOG_FORMAT", "yaml");
        }
        let result = LogConfig::resolve(Some("info"), None, None);
        clear_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "ADO_PR_LOG_FORMAT", ref value }) if value == "yaml"
        ));
    }
}
