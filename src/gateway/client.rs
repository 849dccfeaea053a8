//! HTTP implementation of [`Gateway`] on top of `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use super::{Acknowledgement, Envelope, EventBatch, Gateway, TaskHandle};
use crate::error::BridgeError;

/// Gateway client sharing one connection pool across requests.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a client for `base_url` where every call is bounded by `request_timeout`.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn send_url(&self) -> String {
        format!("{}/api/v1/message:send", self.base_url)
    }

    fn events_url(&self, task: &TaskHandle) -> String {
        format!(
            "{}/api/v1/tasks/{}/events",
            self.base_url,
            urlencoding::encode(task.as_str())
        )
    }
}

/// Turn an error status into `GatewayRejected`, keeping the body verbatim.
async fn reject_on_error(response: Response) -> Result<Response, BridgeError> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(status = status.as_u16(), "Unreadable gateway error body: {}", e);
                String::new()
            }
        };
        return Err(BridgeError::GatewayRejected {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn submit(&self, envelope: &Envelope) -> Result<TaskHandle, BridgeError> {
        let response = self
            .client
            .post(self.send_url())
            .json(envelope)
            .send()
            .await
            .map_err(BridgeError::GatewayUnreachable)?;
        let response = reject_on_error(response).await?;

        let body = response
            .bytes()
            .await
            .map_err(BridgeError::GatewayUnreachable)?;
        let ack: Acknowledgement = match serde_json::from_slice(&body) {
            Ok(ack) => ack,
            Err(e) => {
                tracing::debug!("Unreadable gateway acknowledgement: {}", e);
                return Err(BridgeError::MalformedAcknowledgement);
            }
        };
        ack.task_handle()
            .ok_or(BridgeError::MalformedAcknowledgement)
    }

    async fn events(&self, task: &TaskHandle) -> Result<EventBatch, BridgeError> {
        let response = self
            .client
            .get(self.events_url(task))
            .send()
            .await
            .map_err(BridgeError::GatewayUnreachable)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(BridgeError::TaskNotFound);
        }
        let response = reject_on_error(response).await?;

        let body = response
            .bytes()
            .await
            .map_err(BridgeError::GatewayUnreachable)?;
        serde_json::from_slice(&body).map_err(|e| BridgeError::MalformedEvents(e.to_string()))
    }
}
