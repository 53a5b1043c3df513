//! UseCase: メッセージ投稿処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PostMessageUseCase::execute() メソッド
//! - 履歴への追加と、送信者を含む全ての登録済みクライアントへのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：投稿とブロードキャスト
//! - 異常系：未登録クライアントからの投稿（何も起きない）
//! - エッジケース：履歴の容量超過（古いものから削除される）

use std::sync::Arc;

use porch_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessageContent, MessagePusher, ServerEvent, SessionRepository,
    Timestamp,
};

use super::error::PostMessageError;

/// メッセージ投稿のユースケース
pub struct PostMessageUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl PostMessageUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// メッセージ投稿を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者の接続 ID
    /// * `content` - サニタイズ済みのメッセージ内容
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 履歴に追加され、ブロードキャストされたメッセージ
    /// * `Err(PostMessageError)` - 未登録のクライアントなど（何も送信されない）
    pub async fn execute(
        &self,
        from: &ConnectionId,
        content: MessageContent,
    ) -> Result<ChatMessage, PostMessageError> {
        let timestamp = Timestamp::new(self.clock.now_millis());

        // 1. Repository 経由で履歴に追加し、配信先を取得
        let (message, targets) = self
            .repository
            .post_message(from, content, timestamp)
            .await?;

        // 2. MessagePusher を使ってブロードキャスト（送信者を含む）
        let event = ServerEvent::Chat(message.clone());
        if let Err(e) = self.message_pusher.broadcast(targets, &event).await {
            tracing::warn!("Failed to broadcast message from '{}': {}", from, e);
        }

        Ok(message)
    }
}
