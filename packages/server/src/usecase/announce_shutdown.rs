//! UseCase: サーバー停止の告知
//!
//! 停止を始める前に、登録済みの全クライアントへシステムメッセージを送ります。
//! 接続そのものは各接続のタスクが `DisconnectReason::ServerShutdown` で閉じます。

use std::sync::Arc;

use porch_shared::time::Clock;

use crate::domain::{ChatMessage, MessagePusher, ServerEvent, SessionRepository, Timestamp};

/// 停止を知らせるシステムメッセージ
pub const SHUTDOWN_NOTICE: &str = "server is stopping...";

/// サーバー停止告知のユースケース
pub struct AnnounceShutdownUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl AnnounceShutdownUseCase {
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

    /// 停止の告知を実行し、告知したクライアント数を返す
    pub async fn execute(&self) -> usize {
        let targets = self.repository.registered_client_ids().await;
        let count = targets.len();

        let notice = ChatMessage::system(SHUTDOWN_NOTICE, Timestamp::new(self.clock.now_millis()));
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &ServerEvent::Chat(notice))
            .await
        {
            tracing::warn!("Failed to broadcast shutdown notice: {}", e);
        }

        count
    }
}
