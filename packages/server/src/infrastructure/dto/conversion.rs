//! Conversion logic between DTOs and domain types.

use porch_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ChatMessage, ClientRequest, MessageContent, NameRejection, ProtocolError, ServerEvent,
};
use crate::infrastructure::{dto::websocket as dto, sanitizer::sanitize};

/// Reply body of a failed registration
pub const INVALID_NAME: &str = "INVALID NAME";

/// Reply body of a successful name check
pub const NAME_IS_FREE: &str = "name is free";

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::InboundMessage> for ClientRequest {
    type Error = ProtocolError;

    fn try_from(dto: dto::InboundMessage) -> Result<Self, Self::Error> {
        match dto.r#type.as_str() {
            "validation" => Ok(ClientRequest::Validation(dto.message)),
            "register" => Ok(ClientRequest::Register(dto.message)),
            "message" => Ok(ClientRequest::Message(MessageContent::new(dto.message))),
            _ => Err(ProtocolError::UnknownType(dto.r#type)),
        }
    }
}

/// Parse one inbound text frame into a request, sanitizing its body.
pub fn decode_request(text: &str) -> Result<ClientRequest, ProtocolError> {
    let mut inbound: dto::InboundMessage =
        serde_json::from_str(text).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
    inbound.message = sanitize(&inbound.message);
    ClientRequest::try_from(inbound)
}

// ========================================
// Domain → DTO
// ========================================

impl From<&ChatMessage> for dto::ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            date: timestamp_to_rfc3339(model.timestamp.value()).unwrap_or_default(),
            author: model.author.as_str().to_string(),
            content: model.content.as_str().to_string(),
        }
    }
}

impl From<&ServerEvent> for dto::OutboundMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::NameValidation(result) => Self {
                r#type: dto::MessageType::Validation,
                success: result.is_ok(),
                message: dto::OutboundBody::Text(validation_text(result)),
            },
            ServerEvent::Registration(Ok(history)) => Self {
                r#type: dto::MessageType::Register,
                success: true,
                message: dto::OutboundBody::History(history.iter().map(Into::into).collect()),
            },
            ServerEvent::Registration(Err(_)) => Self {
                r#type: dto::MessageType::Register,
                success: false,
                message: dto::OutboundBody::Text(INVALID_NAME.to_string()),
            },
            ServerEvent::Chat(message) => Self {
                r#type: dto::MessageType::Message,
                success: true,
                message: dto::OutboundBody::Chat(message.into()),
            },
        }
    }
}

fn validation_text(result: &Result<(), NameRejection>) -> String {
    match result {
        Ok(()) => NAME_IS_FREE.to_string(),
        Err(rejection) => rejection.to_string(),
    }
}

/// Serialize an event into the JSON text sent over the wire.
pub fn encode_event(event: &ServerEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::OutboundMessage::from(event))
}
