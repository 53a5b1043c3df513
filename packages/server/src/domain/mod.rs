//! Domain layer
//!
//! チャットリレーのビジネスルールを表現する層。
//! 外部（WebSocket、JSON、tokio のタイマー）には依存せず、
//! 必要なインターフェース（Repository / MessagePusher）はこの層で定義します。

pub mod client_registry;
pub mod entity;
pub mod error;
pub mod event;
pub mod message_cache;
pub mod pusher;
pub mod repository;
pub mod session;
pub mod value_object;

pub use client_registry::ClientRegistry;
pub use entity::{Author, ChatMessage, Client, Registration};
pub use error::{MessagePushError, NameRejection, ProtocolError, RepositoryError};
pub use event::{ClientRequest, DisconnectReason, ServerEvent};
pub use message_cache::MessageCache;
pub use pusher::{MessagePusher, OutboundFrame, PusherChannel};
#[cfg(test)]
pub use pusher::MockMessagePusher;
pub use repository::{Registered, SessionRepository};
pub use session::Session;
pub use value_object::{ConnectionId, DisplayName, MessageContent, Timestamp};
