//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ChatMessage, Client, ConnectionId, DisplayName, MessageContent, NameRejection,
    RepositoryError, Timestamp,
};

/// 名前登録の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    /// 登録された名前（空白除去済み）
    pub name: DisplayName,
    /// 登録時点のメッセージ履歴
    pub history: Vec<ChatMessage>,
    /// 登録前から参加していたクライアント（入室通知の宛先）
    pub others: Vec<ConnectionId>,
}

/// Session Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// 各メソッドは 1 つのクリティカルセクションとして実行されなければならない。
/// 特に `register` の「チェックしてから登録」と `post_message` の
/// 「履歴に追加して配信先を決める」は途中に他の操作が割り込まないこと。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 未登録のクライアントを追加
    async fn add_client(&self, id: ConnectionId) -> Result<(), RepositoryError>;

    /// クライアントを削除（冪等。存在しなければ `None`）
    async fn remove_client(&self, id: &ConnectionId) -> Option<Client>;

    /// 候補の名前が使えるか
    async fn is_name_free(&self, candidate: &str) -> Result<(), NameRejection>;

    /// 名前のチェックと登録を不可分に行う
    async fn register(
        &self,
        id: &ConnectionId,
        candidate: &str,
    ) -> Result<Registered, RepositoryError>;

    /// 登録済みクライアントのメッセージを履歴に追加し、配信先を返す
    async fn post_message(
        &self,
        id: &ConnectionId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Result<(ChatMessage, Vec<ConnectionId>), RepositoryError>;

    /// 登録済みクライアントの ID 一覧
    async fn registered_client_ids(&self) -> Vec<ConnectionId>;

    /// メッセージ履歴のスナップショット
    async fn message_history(&self) -> Vec<ChatMessage>;

    /// 接続中のクライアント数（未登録を含む）
    async fn count_clients(&self) -> usize;
}
