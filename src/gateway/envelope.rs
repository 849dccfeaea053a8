//! Outbound JSON-RPC envelope for the gateway's `message/send` method.

use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

pub const JSONRPC_VERSION: &str = "2.0";
pub const SEND_METHOD: &str = "message/send";

/// Request wrapper posted to the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub jsonrpc: &'static str,
    pub id: String,
    pub method: &'static str,
    pub params: EnvelopeParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeParams {
    pub message: OutboundMessage,
}

/// The user message carried by an envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub kind: &'static str,
    pub message_id: String,
    pub role: Role,
    pub metadata: Value,
    pub parts: Vec<OutboundPart>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutboundPart {
    Text { text: String },
}

impl Envelope {
    /// Wrap `prompt` in a fresh envelope addressed to `agent_name`.
    ///
    /// Both the request id and the message id are newly generated UUIDs.
    pub fn new(agent_name: &str, prompt: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: Uuid::new_v4().to_string(),
            method: SEND_METHOD,
            params: EnvelopeParams {
                message: OutboundMessage {
                    kind: "message",
                    message_id: Uuid::new_v4().to_string(),
                    role: Role::User,
                    metadata: json!({ "agent_name": agent_name }),
                    parts: vec![OutboundPart::Text { text: prompt }],
                },
            },
        }
    }

    pub fn message_id(&self) -> &str {
        &self.params.message.message_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wire_shape() {
        let envelope = Envelope::new("OrchestratorAgent", "hello".to_string());
        let value = serde_json::to_value(&envelope).expect("serialize");

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "message/send");
        assert_eq!(value["id"], envelope.id.as_str());

        let message = &value["params"]["message"];
        assert_eq!(message["kind"], "message");
        assert_eq!(message["role"], "user");
        assert_eq!(message["messageId"], envelope.message_id());
        assert_eq!(message["metadata"]["agent_name"], "OrchestratorAgent");
        assert_eq!(
            message["parts"],
            serde_json::json!([{ "kind": "text", "text": "hello" }])
        );
    }

    #[test]
    fn request_and_message_ids_differ() {
        let envelope = Envelope::new("a", String::new());
        assert_ne!(envelope.id, envelope.message_id());
    }
}
