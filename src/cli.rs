use crate::assistant::AssistantPayload;
use crate::defaults::OTEL_TOKEN_PATH;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not parse the payload: `{0}`")]
    Payload(#[from] serde_json::Error),
}

/// Runs the travel assistant once for the given payload, reporting traces
/// and metrics to the configured OTLP endpoint.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON payload for the assistant, e.g. '{"prompt": "3 days in Lisbon"}'.
    payload: String,

    /// Overrides the default token path `/etc/secrets/dynatrace_otel`.
    #[cfg(debug_assertions)]
    #[arg(long)]
    pub token_path: Option<PathBuf>,
}

/// Represents the data structures created from the CLI.
#[derive(Debug)]
pub struct RunConfig {
    pub payload: AssistantPayload,
    pub token_path: PathBuf,
}

impl Cli {
    /// Parses command line arguments into a [RunConfig].
    pub fn init() -> Result<RunConfig, CliError> {
        Self::parse().try_into_run_config()
    }

    fn try_into_run_config(self) -> Result<RunConfig, CliError> {
        let token_path = self.resolved_token_path();
        let payload = serde_json::from_str(&self.payload)?;
        Ok(RunConfig {
            payload,
            token_path,
        })
    }

    fn resolved_token_path(&self) -> PathBuf {
        #[cfg(debug_assertions)]
        if let Some(path) = &self.token_path {
            return path.clone();
        }
        PathBuf::from(OTEL_TOKEN_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn payload_is_parsed_from_the_positional_argument() {
        let cli = Cli::try_parse_from(["travel-assistant", r#"{"prompt": "hi"}"#]).unwrap();
        let run_config = cli.try_into_run_config().unwrap();
        assert_eq!(run_config.payload.prompt, "hi");
        assert_eq!(run_config.token_path, PathBuf::from(OTEL_TOKEN_PATH));
    }

    #[test]
    fn invalid_payload_is_rejected() {
        let cli = Cli::try_parse_from(["travel-assistant", "not json"]).unwrap();
        let err = cli.try_into_run_config().unwrap_err();
        assert_matches!(err, CliError::Payload(_));
    }

    #[test]
    fn token_path_can_be_overridden() {
        let cli = Cli::try_parse_from([
            "travel-assistant",
            r#"{"prompt": "hi"}"#,
            "--token-path",
            "/tmp/token",
        ])
        .unwrap();
        let run_config = cli.try_into_run_config().unwrap();
        assert_eq!(run_config.token_path, PathBuf::from("/tmp/token"));
    }
}
