//! Entities
//!
//! 同一性を持ち、ライフサイクルを通じて状態が変化するオブジェクト。

use super::{
    error::RepositoryError,
    value_object::{ConnectionId, DisplayName, MessageContent, Timestamp},
};

/// クライアントの登録状態
///
/// `Unregistered → Registered(name)` の一方向にのみ遷移する。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Registration {
    #[default]
    Unregistered,
    Registered(DisplayName),
}

/// 接続中のクライアント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ConnectionId,
    pub registration: Registration,
}

impl Client {
    /// 未登録のクライアントを作成
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            registration: Registration::Unregistered,
        }
    }

    /// 登録済みの名前（未登録なら `None`）
    pub fn name(&self) -> Option<&DisplayName> {
        match &self.registration {
            Registration::Registered(name) => Some(name),
            Registration::Unregistered => None,
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self.registration, Registration::Registered(_))
    }

    /// 名前を登録する（一度だけ）
    ///
    /// # Errors
    ///
    /// すでに登録済みの場合は `RepositoryError::AlreadyRegistered`
    pub fn register(&mut self, name: DisplayName) -> Result<(), RepositoryError> {
        if self.is_registered() {
            return Err(RepositoryError::AlreadyRegistered(self.id));
        }
        self.registration = Registration::Registered(name);
        Ok(())
    }
}

/// メッセージの送信者
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Author {
    /// サーバーからのお知らせ（入室・退室・停止など）
    System,
    Participant(DisplayName),
}

impl Author {
    /// ワイヤー上の表現。システムメッセージは空文字列
    pub fn as_str(&self) -> &str {
        match self {
            Author::System => "",
            Author::Participant(name) => name.as_str(),
        }
    }
}

/// チャットメッセージ（不変）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub timestamp: Timestamp,
    pub author: Author,
    pub content: MessageContent,
}

impl ChatMessage {
    /// 参加者が投稿したメッセージを作成
    pub fn new(author: DisplayName, content: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            author: Author::Participant(author),
            content,
        }
    }

    /// システムメッセージを作成
    pub fn system(content: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            author: Author::System,
            content: MessageContent::new(content.into()),
        }
    }
}
