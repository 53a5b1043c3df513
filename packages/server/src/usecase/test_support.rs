//! Shared fixtures for use case tests.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessagePusher, OutboundFrame, SessionRepository},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
    },
};

pub(crate) fn create_test_repository(cache_size: usize) -> Arc<InMemorySessionRepository> {
    Arc::new(InMemorySessionRepository::with_cache_size(cache_size))
}

pub(crate) fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::default())
}

/// 接続を 1 つ作り、その接続に届くフレームの受信側を返す
pub(crate) async fn connect(
    repository: &InMemorySessionRepository,
    pusher: &WebSocketMessagePusher,
) -> (ConnectionId, mpsc::UnboundedReceiver<OutboundFrame>) {
    let id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    repository.add_client(id).await.unwrap();
    pusher.register_client(id, tx).await;
    (id, rx)
}

/// 接続して名前を登録する（入室通知などは送らない）
pub(crate) async fn connect_registered(
    repository: &InMemorySessionRepository,
    pusher: &WebSocketMessagePusher,
    name: &str,
) -> (ConnectionId, mpsc::UnboundedReceiver<OutboundFrame>) {
    let (id, rx) = connect(repository, pusher).await;
    repository.register(&id, name).await.unwrap();
    (id, rx)
}

/// 受信済みのフレームを全て JSON として取り出す
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<OutboundFrame>) -> Vec<serde_json::Value> {
    let mut received = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        match frame {
            OutboundFrame::Text(text) => received.push(serde_json::from_str(&text).unwrap()),
            OutboundFrame::Close { code, reason } => {
                received.push(serde_json::json!({"close": code, "reason": reason}))
            }
        }
    }
    received
}
