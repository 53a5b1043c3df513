//! UseCase: クライアント接続処理
//!
//! 接続ごとに ID を払い出し、未登録のクライアントとして Session に追加し、
//! 送信チャンネルを MessagePusher に登録します。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, SessionRepository};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// クライアント接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのフレーム送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 払い出した接続 ID
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(&self, sender: PusherChannel) -> Result<ConnectionId, ConnectError> {
        let id = ConnectionId::generate();

        self.repository
            .add_client(id)
            .await
            .map_err(|_| ConnectError::DuplicateConnection(id.to_string()))?;
        self.message_pusher.register_client(id, sender).await;

        Ok(id)
    }
}
