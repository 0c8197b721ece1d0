use duration_str::deserialize_duration;
use opentelemetry_sdk::trace;
use serde::Deserialize;
use std::{collections::HashMap, path::Path, time::Duration};
use thiserror::Error;
use url::Url;

use crate::defaults::{DEFAULT_OTEL_ENDPOINT, OTEL_ENDPOINT_ENV_VAR};
use crate::secrets_provider::SecretsProvider;
use crate::secrets_provider::file::{FileSecretProvider, FileSecretProviderError};

/// Default timeout for the export HTTP client.
const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default interval for exporting metrics.
const DEFAULT_METRICS_EXPORT_INTERVAL: Duration = Duration::from_secs(60);
/// Default maximum batch size, check [trace::BatchSpanProcessor] for details.
const DEFAULT_BATCH_MAX_SIZE: usize = 512;
/// Default scheduled delay, check [trace::BatchSpanProcessor] for details.
const DEFAULT_BATCH_SCHEDULED_DELAY: Duration = Duration::from_secs(30);

/// Traces suffix for the OpenTelemetry endpoint.
const TRACES_SUFFIX: &str = "/v1/traces";
/// Metrics suffix for the OpenTelemetry endpoint.
const METRICS_SUFFIX: &str = "/v1/metrics";

/// Header carrying the ingest credential on every export request.
const AUTHORIZATION_HEADER: &str = "Authorization";

/// Errors loading the telemetry export configuration. These are fatal:
/// telemetry export cannot proceed without an endpoint and a credential.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid OTLP endpoint '{endpoint}': {err}")]
    InvalidEndpoint {
        endpoint: String,
        err: url::ParseError,
    },
    #[error("could not read the ingest token: {0}")]
    Token(#[from] FileSecretProviderError),
}

/// Represents the OpenTelemetry export configuration.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OtelConfig {
    /// Metrics configuration.
    #[serde(default)]
    pub(crate) metrics: MetricsConfig,
    /// Traces configuration.
    #[serde(default)]
    pub(crate) traces: TracesConfig,
    /// OpenTelemetry HTTP base endpoint to report instrumentation. To send
    /// each instrumentation type, the corresponding suffix is appended,
    /// check [TRACES_SUFFIX] and [METRICS_SUFFIX].
    pub(crate) endpoint: Url,
    /// Headers to include in every request to the OpenTelemetry endpoint.
    #[serde(default)]
    pub(crate) headers: HashMap<String, String>,
    /// Client timeout.
    #[serde(default)]
    pub(crate) client_timeout: ClientTimeout,
}

impl OtelConfig {
    /// Builds the export configuration from the environment, one-shot and
    /// without retries:
    /// - the base endpoint comes from the `OTEL_ENDPOINT` environment
    ///   variable, falling back to [DEFAULT_OTEL_ENDPOINT],
    /// - the ingest token is read from `token_path` and attached as an
    ///   `Api-Token` authorization header.
    pub fn from_environment(token_path: &Path) -> Result<Self, ConfigurationError> {
        let raw_endpoint = std::env::var(OTEL_ENDPOINT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_OTEL_ENDPOINT.to_string());
        let endpoint = Url::parse(&raw_endpoint).map_err(|err| {
            ConfigurationError::InvalidEndpoint {
                endpoint: raw_endpoint.clone(),
                err,
            }
        })?;

        let token = FileSecretProvider::new().get_secret(token_path)?;
        let headers = HashMap::from([(
            AUTHORIZATION_HEADER.to_string(),
            format!("Api-Token {token}"),
        )]);

        Ok(Self {
            metrics: MetricsConfig {
                enabled: true,
                ..Default::default()
            },
            traces: TracesConfig {
                enabled: true,
                ..Default::default()
            },
            endpoint,
            headers,
            client_timeout: ClientTimeout::default(),
        })
    }

    /// Returns the otel endpoint to report traces to.
    pub(crate) fn traces_endpoint(&self) -> String {
        self.target_endpoint(TRACES_SUFFIX)
    }

    /// Returns the otel endpoint to report metrics to.
    pub(crate) fn metrics_endpoint(&self) -> String {
        self.target_endpoint(METRICS_SUFFIX)
    }

    /// Helper to get the endpoint for each data type. The suffix is appended
    /// to the full base endpoint, which may itself carry a path (the
    /// Dynatrace OTLP API lives under `/api/v2/otlp`).
    fn target_endpoint(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.endpoint.as_str().trim_end_matches('/'))
    }
}

/// Defines the configuration settings to report metrics to OpenTelemetry.
#[derive(Debug, Deserialize, Default, PartialEq, Clone)]
pub(crate) struct MetricsConfig {
    /// Indicates if metrics are enabled or not.
    pub(crate) enabled: bool,
    /// Sets up the interval to report metrics. They are reported
    /// periodically according to it.
    #[serde(default)]
    pub(crate) interval: MetricsExportInterval,
}

/// Defines the configuration settings to report traces to OpenTelemetry.
#[derive(Debug, Deserialize, Default, PartialEq, Clone)]
pub(crate) struct TracesConfig {
    /// Indicates if traces are enabled or not.
    pub(crate) enabled: bool,
    /// Traces are reported in batches, this field defines the batch
    /// configuration.
    #[serde(default)]
    pub(crate) batch_config: BatchConfig,
}

/// Type to represent a client timeout. It adds a default implementation to
/// [std::time::Duration].
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientTimeout(#[serde(deserialize_with = "deserialize_duration")] Duration);

impl From<Duration> for ClientTimeout {
    fn from(value: Duration) -> Self {
        Self(value)
    }
}

impl From<ClientTimeout> for Duration {
    fn from(value: ClientTimeout) -> Self {
        value.0
    }
}

impl Default for ClientTimeout {
    fn default() -> Self {
        Self(DEFAULT_CLIENT_TIMEOUT)
    }
}

/// Type to represent the metrics export interval. It adds a default
/// implementation to [std::time::Duration].
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MetricsExportInterval(#[serde(deserialize_with = "deserialize_duration")] Duration);

impl From<Duration> for MetricsExportInterval {
    fn from(value: Duration) -> Self {
        Self(value)
    }
}

impl From<MetricsExportInterval> for Duration {
    fn from(value: MetricsExportInterval) -> Self {
        value.0
    }
}

impl Default for MetricsExportInterval {
    fn default() -> Self {
        Self(DEFAULT_METRICS_EXPORT_INTERVAL)
    }
}

/// Holds the batch configuration to send traces through OpenTelemetry.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub(crate) struct BatchConfig {
    scheduled_delay: Duration,
    max_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            scheduled_delay: DEFAULT_BATCH_SCHEDULED_DELAY,
            max_size: DEFAULT_BATCH_MAX_SIZE,
        }
    }
}

impl From<&BatchConfig> for trace::BatchConfig {
    fn from(value: &BatchConfig) -> Self {
        trace::BatchConfigBuilder::default()
            .with_max_export_batch_size(value.max_size)
            .with_scheduled_delay(value.scheduled_delay)
            .build()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serial_test::serial;
    use std::io::Write;

    impl Default for OtelConfig {
        fn default() -> Self {
            Self::default_with_endpoint("https://fake")
        }
    }
    impl OtelConfig {
        pub(crate) fn default_with_endpoint(endpoint: &str) -> Self {
            Self {
                metrics: Default::default(),
                traces: Default::default(),
                endpoint: endpoint.parse().unwrap(),
                headers: Default::default(),
                client_timeout: Default::default(),
            }
        }
    }

    fn write_token_file(dir: &tempfile::TempDir, token: &str) -> std::path::PathBuf {
        let path = dir.path().join("dynatrace_otel");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{token}").unwrap();
        path
    }

    #[test]
    fn test_endpoints() {
        let config = OtelConfig::default_with_endpoint("https://some.endpoint:4318");
        assert_eq!(
            config.traces_endpoint(),
            "https://some.endpoint:4318/v1/traces".to_string()
        );
        assert_eq!(
            config.metrics_endpoint(),
            "https://some.endpoint:4318/v1/metrics".to_string()
        );
    }

    #[test]
    fn test_endpoints_with_base_path() {
        let config =
            OtelConfig::default_with_endpoint("https://tenant.live.dynatrace.com/api/v2/otlp");
        assert_eq!(
            config.traces_endpoint(),
            "https://tenant.live.dynatrace.com/api/v2/otlp/v1/traces".to_string()
        );
        assert_eq!(
            config.metrics_endpoint(),
            "https://tenant.live.dynatrace.com/api/v2/otlp/v1/metrics".to_string()
        );
    }

    #[test]
    fn test_defaults() {
        let config = OtelConfig::default();
        let default_batch_config = BatchConfig::default();

        assert_eq!(default_batch_config.max_size, DEFAULT_BATCH_MAX_SIZE);
        assert_eq!(
            default_batch_config.scheduled_delay,
            DEFAULT_BATCH_SCHEDULED_DELAY
        );

        assert_eq!(config.traces.batch_config, default_batch_config);
        assert!(!config.traces.enabled);

        assert!(!config.metrics.enabled);
        assert_eq!(
            Duration::from(config.metrics.interval),
            DEFAULT_METRICS_EXPORT_INTERVAL
        );

        assert_eq!(
            Duration::from(config.client_timeout),
            DEFAULT_CLIENT_TIMEOUT
        );
    }

    #[test]
    #[serial]
    fn from_environment_takes_endpoint_and_token() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = write_token_file(&dir, "dt0c01.sample.token");
        unsafe {
            std::env::set_var(OTEL_ENDPOINT_ENV_VAR, "https://tenant.example.com/api/v2/otlp");
        }

        let config = OtelConfig::from_environment(&token_path).unwrap();
        unsafe {
            std::env::remove_var(OTEL_ENDPOINT_ENV_VAR);
        }

        assert_eq!(
            config.endpoint.as_str(),
            "https://tenant.example.com/api/v2/otlp"
        );
        assert_eq!(
            config.headers.get(AUTHORIZATION_HEADER).unwrap(),
            "Api-Token dt0c01.sample.token"
        );
        assert!(config.traces.enabled);
        assert!(config.metrics.enabled);
    }

    #[test]
    #[serial]
    fn from_environment_falls_back_to_the_default_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = write_token_file(&dir, "dt0c01.sample.token");
        unsafe {
            std::env::remove_var(OTEL_ENDPOINT_ENV_VAR);
        }

        let config = OtelConfig::from_environment(&token_path).unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_OTEL_ENDPOINT);
    }

    #[test]
    #[serial]
    fn from_environment_fails_without_a_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("not_there");

        let err = OtelConfig::from_environment(&token_path).unwrap_err();
        assert_matches!(err, ConfigurationError::Token(_));
    }

    #[test]
    #[serial]
    fn from_environment_rejects_an_invalid_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = write_token_file(&dir, "dt0c01.sample.token");
        unsafe {
            std::env::set_var(OTEL_ENDPOINT_ENV_VAR, "not a url");
        }

        let err = OtelConfig::from_environment(&token_path).unwrap_err();
        unsafe {
            std::env::remove_var(OTEL_ENDPOINT_ENV_VAR);
        }
        assert_matches!(err, ConfigurationError::InvalidEndpoint { .. });
    }
}
