//! WebSocket message DTOs.
//!
//! Inbound: `{"type": "validation" | "register" | "message", "message": string}`
//!
//! Outbound: `{"type": ..., "success": bool, "message": string | ChatMessage | [ChatMessage]}`

use serde::{Deserialize, Serialize};

/// Message type tag shared by requests and responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Validation,
    Register,
    Message,
}

/// Raw inbound message
///
/// The `type` tag stays a string here so that unknown tags can be told apart
/// from malformed JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InboundMessage {
    pub r#type: String,
    #[serde(default)]
    pub message: String,
}

/// Chat message as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    /// RFC 3339 UTC timestamp, millisecond precision
    pub date: String,
    /// Empty for system messages
    pub author: String,
    pub content: String,
}

/// Outbound payload body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutboundBody {
    Text(String),
    Chat(ChatMessageDto),
    History(Vec<ChatMessageDto>),
}

/// Outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub r#type: MessageType,
    pub success: bool,
    pub message: OutboundBody,
}
