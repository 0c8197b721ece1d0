use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Environment variable overriding the whole logging filter.
const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";

#[derive(Error, Debug)]
pub enum LoggingConfigError {
    #[error("invalid logging directive `{directive}`: {err}")]
    InvalidDirective { directive: String, err: String },
}

/// Defines the logging configuration for the application.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub(crate) format: LoggingFormat,
    #[serde(default)]
    pub(crate) level: LogLevel,
}

impl LoggingConfig {
    /// Builds the [EnvFilter] for the stdout layer: logs from this crate at
    /// the configured level, overridable through the `LOG_LEVEL` environment
    /// variable.
    pub(crate) fn filter(&self) -> Result<EnvFilter, LoggingConfigError> {
        let level = self.level.as_level().to_string().to_lowercase();
        let directive = format!("travel_assistant={level}");
        let crate_directive = directive.parse::<Directive>().map_err(|err| {
            LoggingConfigError::InvalidDirective {
                directive: directive.clone(),
                err: err.to_string(),
            }
        })?;

        Ok(EnvFilter::builder()
            .with_default_directive(crate_directive)
            .with_env_var(LOG_LEVEL_ENV_VAR)
            .from_env_lossy())
    }
}

/// Defines the format to be used for logging, including target and timestamp.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct LoggingFormat {
    /// Indicates whether the target of the trace event is included in the
    /// formatted output.
    #[serde(default)]
    pub(crate) target: bool,
    /// Timestamp format the application uses for logging.
    #[serde(default)]
    pub(crate) timestamp: TimestampFormat,
    /// Indicates if ansi colors should be used in stdout logs.
    #[serde(default)]
    pub(crate) ansi_colors: bool,
}

/// Represents a custom time stamp format for logging, based on
/// [chrono strftime](https://docs.rs/chrono/latest/chrono/format/strftime/index.html).
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub(crate) struct TimestampFormat(pub(crate) String);

impl Default for TimestampFormat {
    fn default() -> Self {
        Self("%Y-%m-%dT%H:%M:%S".to_string())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub(crate) struct LogLevel(Level);

impl LogLevel {
    fn as_level(&self) -> Level {
        self.0
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self(Level::INFO)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value_str = String::deserialize(deserializer)?;
        Level::from_str(&value_str)
            .map(LogLevel)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    #[test]
    fn defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel(Level::INFO));
        assert_eq!(config.format.timestamp, TimestampFormat::default());
        assert!(!config.format.target);
    }

    #[test]
    fn level_is_deserialized_from_a_string() {
        let config: LoggingConfig = serde_json::from_value(json!({"level": "debug"})).unwrap();
        assert_eq!(config.level, LogLevel(Level::DEBUG));
    }

    #[test]
    fn invalid_level_is_rejected() {
        let result: Result<LoggingConfig, _> =
            serde_json::from_value(json!({"level": "verbose"}));
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn filter_is_built_from_the_configured_level() {
        unsafe {
            std::env::remove_var(LOG_LEVEL_ENV_VAR);
        }
        let config: LoggingConfig = serde_json::from_value(json!({"level": "warn"})).unwrap();
        let filter = config.filter().unwrap();
        assert!(filter.to_string().contains("travel_assistant=warn"));
    }
}
