//! Gateway module - talking to the agent-mesh gateway.
//!
//! The gateway speaks a JSON-RPC flavoured protocol:
//! 1. `POST /api/v1/message:send` with an [`Envelope`] returns a task id
//! 2. `GET /api/v1/tasks/{id}/events` returns the full event history so far

mod client;
pub mod envelope;
pub mod events;

use std::fmt;

use async_trait::async_trait;

use crate::error::BridgeError;

pub use client::HttpGateway;
pub use envelope::Envelope;
pub use events::{Acknowledgement, Event, EventBatch, Message, Part, TaskRecord};

/// Opaque task id handed back by the gateway for one submitted envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle(String);

impl TaskHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two gateway operations the bridge relies on.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Submit an envelope and return the acknowledged task.
    async fn submit(&self, envelope: &Envelope) -> Result<TaskHandle, BridgeError>;

    /// Fetch the accumulated event history for `task`.
    async fn events(&self, task: &TaskHandle) -> Result<EventBatch, BridgeError>;
}
