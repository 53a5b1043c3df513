//! UseCase errors

use thiserror::Error;

use crate::domain::{NameRejection, RepositoryError};

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Connection '{0}' is already connected")]
    DuplicateConnection(String),
}

/// 名前登録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("Name rejected: {0}")]
    NameRejected(NameRejection),
    #[error("Client is already registered")]
    AlreadyRegistered,
    #[error("Client not found")]
    ClientNotFound,
}

impl From<RepositoryError> for RegisterError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NameRejected(rejection) => RegisterError::NameRejected(rejection),
            RepositoryError::AlreadyRegistered(_) => RegisterError::AlreadyRegistered,
            RepositoryError::ClientNotFound(_)
            | RepositoryError::DuplicateClient(_)
            | RepositoryError::NotRegistered(_) => RegisterError::ClientNotFound,
        }
    }
}

impl RegisterError {
    /// クライアントへ返す拒否理由
    pub fn rejection(&self) -> NameRejection {
        match self {
            RegisterError::NameRejected(rejection) => *rejection,
            RegisterError::AlreadyRegistered | RegisterError::ClientNotFound => {
                NameRejection::Taken
            }
        }
    }
}

/// メッセージ投稿のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostMessageError {
    #[error("Client is not registered")]
    Unregistered,
    #[error("Client not found")]
    ClientNotFound,
}

impl From<RepositoryError> for PostMessageError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotRegistered(_) => PostMessageError::Unregistered,
            _ => PostMessageError::ClientNotFound,
        }
    }
}
