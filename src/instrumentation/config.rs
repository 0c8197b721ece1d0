use std::path::Path;

use serde::Deserialize;

use self::logs::LoggingConfig;
use self::otel::{ConfigurationError, OtelConfig};

pub mod logs;
pub mod otel;

/// Represents the configuration for instrumenting the application.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct InstrumentationConfig {
    #[serde(default)]
    pub logs: LoggingConfig,
    pub opentelemetry: Option<OtelConfig>,
}

impl InstrumentationConfig {
    /// Loads the startup configuration: logging defaults plus the
    /// OpenTelemetry export settings taken from the environment and the
    /// token file at `token_path`.
    pub fn from_environment(token_path: &Path) -> Result<Self, ConfigurationError> {
        Ok(Self {
            logs: LoggingConfig::default(),
            opentelemetry: Some(OtelConfig::from_environment(token_path)?),
        })
    }
}
