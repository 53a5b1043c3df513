//! Domain errors

use thiserror::Error;

use super::value_object::ConnectionId;

/// 名前が使えない理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameRejection {
    #[error("name is empty")]
    Empty,
    #[error("name is already registered")]
    Taken,
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Client '{0}' not found")]
    ClientNotFound(ConnectionId),
    #[error("Client '{0}' is already connected")]
    DuplicateClient(ConnectionId),
    #[error("Client '{0}' is already registered")]
    AlreadyRegistered(ConnectionId),
    #[error("Client '{0}' is not registered")]
    NotRegistered(ConnectionId),
    #[error("Name rejected: {0}")]
    NameRejected(#[from] NameRejection),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),
    #[error("Failed to push message: {0}")]
    PushFailed(String),
    #[error("Failed to serialize message: {0}")]
    Serialization(String),
}

/// 受信したメッセージの形式エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Malformed(String),
    #[error("Unknown message type '{0}'")]
    UnknownType(String),
}
