//! Demo travel assistant.
//!
//! The agent runtime itself is out of scope for this sample: the handler
//! annotates its span with the configured model, logs the request and
//! acknowledges it. Replacing [TravelAssistant::handle] with a real model
//! invocation turns this into a full agent; the telemetry bootstrap stays
//! the same.

use crate::defaults::{DEFAULT_MODEL_ID, DEFAULT_SESSION_ID, MODEL_ID_ENV_VAR};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

/// Request payload accepted by the assistant.
#[derive(Debug, Deserialize, PartialEq)]
pub struct AssistantPayload {
    pub prompt: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

/// Reply returned to the caller.
#[derive(Debug, Serialize, PartialEq)]
pub struct AssistantReply {
    pub result: String,
    pub status: ReplyStatus,
    pub session_id: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Success,
    Error,
}

/// The assistant answering travel questions.
pub struct TravelAssistant {
    model_id: String,
}

impl TravelAssistant {
    /// Builds the assistant, taking the model identifier override from the
    /// `BEDROCK_MODEL_ID` environment variable.
    pub fn from_environment() -> Self {
        let model_id =
            std::env::var(MODEL_ID_ENV_VAR).unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());
        Self { model_id }
    }

    /// Handles a single payload and produces a reply.
    #[instrument(
        skip_all,
        fields(gen_ai.request.model = %self.model_id, session.id = %payload.session_id)
    )]
    pub fn handle(&self, payload: AssistantPayload) -> AssistantReply {
        info!(
            prompt_chars = payload.prompt.len(),
            "Handling assistant request"
        );

        let result = format!(
            "travel-assistant ({}) acknowledged: {}",
            self.model_id, payload.prompt
        );

        AssistantReply {
            result,
            status: ReplyStatus::Success,
            session_id: payload.session_id,
        }
    }
}
