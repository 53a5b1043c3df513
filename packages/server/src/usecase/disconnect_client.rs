//! UseCase: クライアント切断処理
//!
//! ## 何をしているか
//! - サーバー側から閉じる理由（アイドルタイムアウト・停止）なら close frame を送る
//! - Session からクライアントを削除（冪等。2 回目以降は何もしない）
//! - 登録済みだったクライアントなら、理由に応じたお知らせを残りの参加者へ送る
//! - 送信チャンネルを MessagePusher から登録解除
//!
//! 削除は 1 回しか成功しないので、close とエラーとタイムアウトが競合しても
//! お知らせが重複することはありません。

use std::sync::Arc;

use porch_shared::time::Clock;

use crate::domain::{
    ChatMessage, Client, ConnectionId, DisconnectReason, MessagePusher, ServerEvent,
    SessionRepository, Timestamp,
};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl DisconnectClientUseCase {
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

    /// クライアント切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(Client)` - 削除したクライアント
    /// * `None` - すでに削除済み（何もしていない）
    pub async fn execute(&self, client_id: &ConnectionId, reason: DisconnectReason) -> Option<Client> {
        let Some(client) = self.repository.remove_client(client_id).await else {
            tracing::debug!("Client '{}' already disconnected", client_id);
            return None;
        };

        // 1. close frame を送る（送信チャンネルを外す前に積む）
        if let Some((code, text)) = reason.close_frame() {
            if let Err(e) = self.message_pusher.close(client_id, code, text).await {
                tracing::warn!("Failed to close connection '{}': {}", client_id, e);
            }
        }

        // 2. 残りの参加者へお知らせ
        if let Some(announcement) = client.name().and_then(|name| reason.announcement(name)) {
            let targets = self.repository.registered_client_ids().await;
            let event = ServerEvent::Chat(ChatMessage::system(
                announcement,
                Timestamp::new(self.clock.now_millis()),
            ));
            if let Err(e) = self.message_pusher.broadcast(targets, &event).await {
                tracing::warn!("Failed to broadcast departure of '{}': {}", client_id, e);
            }
        }

        // 3. MessagePusher から登録解除
        self.message_pusher.unregister_client(client_id).await;

        Some(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, MockMessagePusher};
    use crate::usecase::test_support::{
        connect, connect_registered, create_test_message_pusher, create_test_repository, drain,
    };
    use mockall::predicate::eq;
    use porch_shared::time::FixedClock;

    fn create_usecase(
        repository: Arc<dyn SessionRepository>,
        pusher: Arc<dyn MessagePusher>,
    ) -> DisconnectClientUseCase {
        DisconnectClientUseCase::new(repository, pusher, Arc::new(FixedClock::new(0)))
    }

    #[tokio::test]
    async fn test_disconnect_registered_client_announces_departure() {
        // テスト項目: 登録済みクライアントが切断すると、残りの参加者に "<name> left." が届く
        // given (前提条件):
        let repository = create_test_repository(10);
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository.clone(), pusher.clone());
        let (alice, mut alice_rx) = connect_registered(&repository, &pusher, "alice").await;
        let (_bob, mut bob_rx) = connect_registered(&repository, &pusher, "bob").await;

        // when (操作):
        let removed = usecase.execute(&alice, DisconnectReason::ClientClosed).await;

        // then (期待する結果):
        assert_eq!(removed.map(|c| c.id), Some(alice));
        let received = drain(&mut bob_rx);
        assert_eq!(received.len(), 1);
        assert_eq!(received[0]["message"]["author"], "");
        assert_eq!(received[0]["message"]["content"], "alice left.");
        // 本人には何も届かず、送信チャンネルは閉じている
        assert!(drain(&mut alice_rx).is_empty());
        assert!(alice_rx.recv().await.is_none());
        assert_eq!(repository.count_clients().await, 1);
    }

    #[tokio::test]
    async fn test_idle_timeout_closes_and_announces_inactivity() {
        // テスト項目: アイドルタイムアウトでは close(1001, "timeout") が送られ、専用のお知らせが届く
        // given (前提条件):
        let repository = create_test_repository(10);
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository.clone(), pusher.clone());
        let (alice, mut alice_rx) = connect_registered(&repository, &pusher, "alice").await;
        let (_bob, mut bob_rx) = connect_registered(&repository, &pusher, "bob").await;

        // when (操作):
        usecase.execute(&alice, DisconnectReason::IdleTimeout).await;

        // then (期待する結果):
        assert_eq!(
            drain(&mut alice_rx),
            vec![serde_json::json!({"close": 1001, "reason": "timeout"})]
        );
        let received = drain(&mut bob_rx);
        assert_eq!(
            received[0]["message"]["content"],
            "alice disconnected due to inactivity."
        );
    }

    #[tokio::test]
    async fn test_disconnect_unregistered_client_is_silent() {
        // テスト項目: 未登録クライアントの切断は誰にも通知されない
        // given (前提条件):
        let repository = create_test_repository(10);
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository.clone(), pusher.clone());
        let (_alice, mut alice_rx) = connect_registered(&repository, &pusher, "alice").await;
        let (pending, _pending_rx) = connect(&repository, &pusher).await;

        // when (操作):
        let removed = usecase.execute(&pending, DisconnectReason::ClientClosed).await;

        // then (期待する結果):
        assert!(removed.is_some());
        assert!(drain(&mut alice_rx).is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_twice_announces_once() {
        // テスト項目: タイムアウトとエラーが競合しても、お知らせは 1 回だけ
        // given (前提条件):
        let repository = create_test_repository(10);
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository.clone(), pusher.clone());
        let (alice, _alice_rx) = connect_registered(&repository, &pusher, "alice").await;
        let (_bob, mut bob_rx) = connect_registered(&repository, &pusher, "bob").await;

        // when (操作):
        let first = usecase.execute(&alice, DisconnectReason::IdleTimeout).await;
        let second = usecase.execute(&alice, DisconnectReason::TransportError).await;

        // then (期待する結果):
        assert!(first.is_some());
        assert!(second.is_none());
        let received = drain(&mut bob_rx);
        assert_eq!(received.len(), 1);
        assert_eq!(
            received[0]["message"]["content"],
            "alice disconnected due to inactivity."
        );
    }

    #[tokio::test]
    async fn test_disconnect_keeps_history() {
        // テスト項目: 切断しても投稿済みのメッセージは履歴に残る
        // given (前提条件):
        let repository = create_test_repository(10);
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository.clone(), pusher.clone());
        let (alice, _alice_rx) = connect_registered(&repository, &pusher, "alice").await;
        repository
            .post_message(&alice, MessageContent::from("bye"), Timestamp::new(1))
            .await
            .unwrap();

        // when (操作):
        usecase.execute(&alice, DisconnectReason::ClientClosed).await;

        // then (期待する結果):
        assert_eq!(repository.message_history().await.len(), 1);
        assert_eq!(repository.is_name_free("alice").await, Ok(()));
    }

    #[tokio::test]
    async fn test_server_shutdown_closes_without_announcement() {
        // テスト項目: サーバー停止による切断では close のみ送られ、ブロードキャストされない
        // given (前提条件):
        let repository = create_test_repository(10);
        let (alice, _alice_rx) =
            connect_registered(&repository, &create_test_message_pusher(), "alice").await;
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_close()
            .with(eq(alice), eq(1001u16), eq("server shutdown"))
            .times(1)
            .returning(|_, _, _| Ok(()));
        pusher.expect_broadcast().times(0);
        pusher
            .expect_unregister_client()
            .with(eq(alice))
            .times(1)
            .return_const(());
        let usecase = create_usecase(repository.clone(), Arc::new(pusher));

        // when (操作):
        let removed = usecase.execute(&alice, DisconnectReason::ServerShutdown).await;

        // then (期待する結果):
        assert!(removed.is_some());
        assert_eq!(repository.count_clients().await, 0);
    }

    #[tokio::test]
    async fn test_already_removed_client_touches_nothing() {
        // テスト項目: すでに削除済みのクライアントでは MessagePusher を一切呼ばない
        // given (前提条件):
        let repository = create_test_repository(10);
        let mut pusher = MockMessagePusher::new();
        pusher.expect_close().times(0);
        pusher.expect_broadcast().times(0);
        pusher.expect_unregister_client().times(0);
        let usecase = create_usecase(repository, Arc::new(pusher));

        // when (操作):
        let removed = usecase
            .execute(&ConnectionId::generate(), DisconnectReason::IdleTimeout)
            .await;

        // then (期待する結果):
        assert!(removed.is_none());
    }
}
