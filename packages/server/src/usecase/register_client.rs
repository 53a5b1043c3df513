//! UseCase: 名前登録処理
//!
//! ## 何をしているか
//! - 名前のチェックと登録を Repository で不可分に実行
//! - 成功時: 既存の参加者へ入室を通知し、本人へ履歴を返信
//! - 失敗時: 本人へ "INVALID NAME" を返信（状態は変更しない）

use std::sync::Arc;

use porch_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, DisplayName, MessagePusher, ServerEvent, SessionRepository,
    Timestamp,
};

use super::error::RegisterError;

/// 名前登録のユースケース
pub struct RegisterClientUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl RegisterClientUseCase {
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

    /// 名前登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(DisplayName)` - 登録された名前（空白除去済み）
    /// * `Err(RegisterError)` - 登録失敗（要求元には失敗を返信済み）
    pub async fn execute(
        &self,
        client_id: &ConnectionId,
        candidate: &str,
    ) -> Result<DisplayName, RegisterError> {
        let registered = match self.repository.register(client_id, candidate).await {
            Ok(registered) => registered,
            Err(e) => {
                let error = RegisterError::from(e);
                let reply = ServerEvent::Registration(Err(error.rejection()));
                if let Err(e) = self.message_pusher.push_to(client_id, &reply).await {
                    tracing::warn!("Failed to reply registration to '{}': {}", client_id, e);
                }
                return Err(error);
            }
        };

        // 1. 既存の参加者へ入室を通知
        let joined = ChatMessage::system(
            format!("{} came here!", registered.name),
            Timestamp::new(self.clock.now_millis()),
        );
        if let Err(e) = self
            .message_pusher
            .broadcast(registered.others, &ServerEvent::Chat(joined))
            .await
        {
            tracing::warn!("Failed to broadcast join of '{}': {}", registered.name, e);
        }

        // 2. 本人へ履歴を返信
        let reply = ServerEvent::Registration(Ok(registered.history));
        if let Err(e) = self.message_pusher.push_to(client_id, &reply).await {
            tracing::warn!("Failed to reply registration to '{}': {}", client_id, e);
        }

        Ok(registered.name)
    }
}
