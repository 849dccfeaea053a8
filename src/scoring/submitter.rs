//! Submitting a scoring request to the gateway.

use super::prompt::build_fit_prompt;
use crate::api::types::ScoreRequest;
use crate::error::BridgeError;
use crate::gateway::{Envelope, Gateway, TaskHandle};

/// Renders requests into envelopes and hands them to the gateway.
#[derive(Debug, Clone)]
pub struct Submitter {
    agent_name: String,
}

impl Submitter {
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
        }
    }

    /// Build a fresh envelope for `request`.
    pub fn envelope(&self, request: &ScoreRequest) -> Envelope {
        Envelope::new(&self.agent_name, build_fit_prompt(request))
    }

    /// Send `request` once and return the acknowledged task.
    pub async fn submit(
        &self,
        gateway: &dyn Gateway,
        request: &ScoreRequest,
    ) -> Result<TaskHandle, BridgeError> {
        let envelope = self.envelope(request);
        tracing::debug!(
            request_id = %envelope.id,
            message_id = %envelope.message_id(),
            agent = %self.agent_name,
            "Submitting scoring request"
        );

        let task = gateway.submit(&envelope).await?;
        tracing::info!(task = %task, request_id = %envelope.id, "Gateway accepted scoring request");
        Ok(task)
    }
}
