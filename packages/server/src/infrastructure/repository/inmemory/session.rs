//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! `Session` 集約を 1 つの Mutex で保護し、全ての操作を直列化します。
//! プロセスを再起動すると状態は失われます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, Client, ConnectionId, MessageContent, NameRejection, Registered,
    RepositoryError, Session, SessionRepository, Timestamp,
};

/// インメモリ Session Repository 実装
pub struct InMemorySessionRepository {
    /// Session ドメインモデル
    session: Arc<Mutex<Session>>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new(session: Arc<Mutex<Session>>) -> Self {
        Self { session }
    }

    /// `cache_size` 件までの履歴を持つ空のセッションで作成
    pub fn with_cache_size(cache_size: usize) -> Self {
        Self::new(Arc::new(Mutex::new(Session::new(cache_size))))
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn add_client(&self, id: ConnectionId) -> Result<(), RepositoryError> {
        let mut session = self.session.lock().await;
        session.clients.insert(id)
    }

    async fn remove_client(&self, id: &ConnectionId) -> Option<Client> {
        let mut session = self.session.lock().await;
        session.remove(id)
    }

    async fn is_name_free(&self, candidate: &str) -> Result<(), NameRejection> {
        let session = self.session.lock().await;
        session.clients.is_name_free(candidate)
    }

    async fn register(
        &self,
        id: &ConnectionId,
        candidate: &str,
    ) -> Result<Registered, RepositoryError> {
        let mut session = self.session.lock().await;
        session.register(id, candidate)
    }

    async fn post_message(
        &self,
        id: &ConnectionId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Result<(ChatMessage, Vec<ConnectionId>), RepositoryError> {
        let mut session = self.session.lock().await;
        session.post(id, content, timestamp)
    }

    async fn registered_client_ids(&self) -> Vec<ConnectionId> {
        let session = self.session.lock().await;
        session.clients.registered_ids()
    }

    async fn message_history(&self) -> Vec<ChatMessage> {
        let session = self.session.lock().await;
        session.history.snapshot()
    }

    async fn count_clients(&self) -> usize {
        let session = self.session.lock().await;
        session.clients.len()
    }
}
