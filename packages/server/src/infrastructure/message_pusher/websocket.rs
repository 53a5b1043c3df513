//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender<OutboundFrame>` を管理
//! - イベントを JSON に変換してクライアントへ送信（push_to, broadcast）
//! - close frame の送信（close）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、フレームを積むだけで
//! 実際の書き込みは接続ごとの送信タスクが行います。送信は呼び出し元をブロックしません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, OutboundFrame, PusherChannel, ServerEvent},
    infrastructure::dto::conversion::encode_event,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    fn encode(event: &ServerEvent) -> Result<String, MessagePushError> {
        encode_event(event).map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(client_id, sender);
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(client_id).is_some() {
            tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
        }
    }

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(client_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(client_id.to_string()))?;
        sender
            .send(OutboundFrame::Text(content))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to client '{}'", client_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(OutboundFrame::Text(content.clone())) {
                    tracing::warn!("Failed to push message to client '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted message to client '{}'", target);
                }
            } else {
                tracing::warn!("Client '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }

    async fn close(
        &self,
        client_id: &ConnectionId,
        code: u16,
        reason: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(client_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(client_id.to_string()))?;
        sender
            .send(OutboundFrame::Close {
                code,
                reason: reason.to_string(),
            })
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Queued close ({}, {}) for client '{}'", code, reason, client_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatMessage, Timestamp};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定のクライアントへの送信
    // - broadcast: 複数クライアントへの送信（一部失敗を許容）
    // - close: close frame の送信
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功ケースと失敗ケース（クライアントが存在しない）
    // 2. broadcast の成功ケース（複数クライアント）
    // 3. broadcast の部分失敗ケース（存在しない、または受信側が閉じている）
    // 4. close frame が積まれること
    // ========================================

    fn system_event(content: &str) -> ServerEvent {
        ServerEvent::Chat(ChatMessage::system(content, Timestamp::new(0)))
    }

    fn text_of(frame: Option<OutboundFrame>) -> serde_json::Value {
        match frame {
            Some(OutboundFrame::Text(text)) => serde_json::from_str(&text).unwrap(),
            other => panic!("expected text frame, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のクライアントにイベントを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        pusher.register_client(alice, tx).await;

        // when (操作):
        let result = pusher.push_to(&alice, &system_event("Hello")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let received = text_of(rx.recv().await);
        assert_eq!(received["message"]["content"], "Hello");
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();

        // when (操作):
        let result = pusher
            .push_to(&ConnectionId::generate(), &system_event("Hello"))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数のクライアントにイベントをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        pusher.register_client(alice, tx1).await;
        pusher.register_client(bob, tx2).await;

        // when (操作):
        let result = pusher
            .broadcast(vec![alice, bob], &system_event("Broadcast message"))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(text_of(rx1.recv().await)["message"]["content"], "Broadcast message");
        assert_eq!(text_of(rx2.recv().await)["message"]["content"], "Broadcast message");
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: 宛先の一部が存在しない・閉じていても他の宛先には届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        let closed = ConnectionId::generate();
        let nonexistent = ConnectionId::generate();
        pusher.register_client(closed, tx2).await;
        pusher.register_client(alice, tx1).await;
        drop(rx2);

        // when (操作):
        let result = pusher
            .broadcast(vec![closed, nonexistent, alice], &system_event("Broadcast message"))
            .await;

        // then (期待する結果):
        assert!(result.is_ok()); // ブロードキャストは部分失敗を許容
        assert_eq!(text_of(rx1.recv().await)["message"]["content"], "Broadcast message");
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();

        // when (操作):
        let result = pusher.broadcast(vec![], &system_event("Message")).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_close_queues_close_frame() {
        // テスト項目: close で close frame が送信チャンネルに積まれる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        pusher.register_client(alice, tx).await;

        // when (操作):
        let result = pusher.close(&alice, 1001, "timeout").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            rx.recv().await,
            Some(OutboundFrame::Close {
                code: 1001,
                reason: "timeout".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_unregister_closes_channel() {
        // テスト項目: 登録解除すると送信チャンネルが閉じる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        pusher.register_client(alice, tx).await;

        // when (操作):
        pusher.unregister_client(&alice).await;

        // then (期待する結果):
        assert_eq!(rx.recv().await, None);
    }
}
