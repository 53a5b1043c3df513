//! Session aggregate: the client registry plus the message cache.

use super::{
    client_registry::ClientRegistry,
    entity::{ChatMessage, Client},
    error::RepositoryError,
    message_cache::MessageCache,
    repository::Registered,
    value_object::{ConnectionId, MessageContent, Timestamp},
};

/// チャットセッション全体の状態
///
/// クライアントの集合とメッセージ履歴をまとめて所有する。複数の値を
/// 同時に更新する操作（登録、投稿）はこの型のメソッドとして実装し、
/// Repository が 1 回のロックで呼び出す。
#[derive(Debug, Clone)]
pub struct Session {
    pub clients: ClientRegistry,
    pub history: MessageCache,
}

impl Session {
    /// `cache_size` 件までの履歴を持つ空のセッション
    pub fn new(cache_size: usize) -> Self {
        Self {
            clients: ClientRegistry::new(),
            history: MessageCache::new(cache_size),
        }
    }

    /// 名前を登録し、入室通知の宛先と履歴を返す
    pub fn register(
        &mut self,
        id: &ConnectionId,
        candidate: &str,
    ) -> Result<Registered, RepositoryError> {
        // 入室通知は登録前から参加していたクライアントにだけ送る
        let others = self.clients.registered_ids();
        let name = self.clients.register(id, candidate)?;
        Ok(Registered {
            name,
            history: self.history.snapshot(),
            others,
        })
    }

    /// 登録済みクライアントのメッセージを履歴に追加し、配信先を返す
    ///
    /// 配信先には送信者自身も含まれる。
    pub fn post(
        &mut self,
        id: &ConnectionId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Result<(ChatMessage, Vec<ConnectionId>), RepositoryError> {
        let client = self
            .clients
            .get(id)
            .ok_or(RepositoryError::ClientNotFound(*id))?;
        let author = client
            .name()
            .cloned()
            .ok_or(RepositoryError::NotRegistered(*id))?;

        let message = ChatMessage::new(author, content, timestamp);
        self.history.append(message.clone());
        Ok((message, self.clients.registered_ids()))
    }

    /// クライアントを削除し、削除したクライアントを返す（冪等）
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Client> {
        self.clients.remove(id)
    }
}
