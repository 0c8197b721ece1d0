//! Default values and well-known names used across the sample.

pub const ASSISTANT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported as the OpenTelemetry resource.
pub const SERVICE_NAME: &str = "travel-assistant";

/// Environment variable holding the OTLP ingest base endpoint.
pub const OTEL_ENDPOINT_ENV_VAR: &str = "OTEL_ENDPOINT";
/// Endpoint used when [OTEL_ENDPOINT_ENV_VAR] is unset. Points to the sample's
/// Dynatrace tenant, replace it with your tenant or an OTel collector.
pub const DEFAULT_OTEL_ENDPOINT: &str = "https://wkf10640.live.dynatrace.com/api/v2/otlp";

/// Well-known path holding the ingest API token.
pub const OTEL_TOKEN_PATH: &str = "/etc/secrets/dynatrace_otel";

/// Environment variable overriding the model the assistant reports.
pub const MODEL_ID_ENV_VAR: &str = "BEDROCK_MODEL_ID";
/// Model identifier reported when [MODEL_ID_ENV_VAR] is unset.
pub const DEFAULT_MODEL_ID: &str = "eu.anthropic.claude-3-7-sonnet-20250219-v1:0";

/// Session assigned to payloads that don't carry one.
pub const DEFAULT_SESSION_ID: &str = "default_session";
