//! One scoring session: submit once, then poll until done.

use std::sync::Arc;

use super::extract::ConsolidatedResult;
use super::poller::Poller;
use super::submitter::Submitter;
use crate::api::types::ScoreRequest;
use crate::config::Config;
use crate::error::BridgeError;
use crate::gateway::Gateway;

/// Scores requests through a gateway. Sessions share nothing but the client.
#[derive(Clone)]
pub struct ScoreService {
    gateway: Arc<dyn Gateway>,
    submitter: Submitter,
    poller: Poller,
}

impl ScoreService {
    pub fn new(gateway: Arc<dyn Gateway>, submitter: Submitter, poller: Poller) -> Self {
        Self {
            gateway,
            submitter,
            poller,
        }
    }

    pub fn from_config(gateway: Arc<dyn Gateway>, config: &Config) -> Self {
        Self::new(
            gateway,
            Submitter::new(config.agent_name.clone()),
            Poller::new(config.poll),
        )
    }

    /// Run a full submit/poll session for `request`.
    pub async fn score(&self, request: &ScoreRequest) -> Result<ConsolidatedResult, BridgeError> {
        let task = self.submitter.submit(self.gateway.as_ref(), request).await?;
        self.poller
            .wait_for_result(self.gateway.as_ref(), &task)
            .await
    }
}
