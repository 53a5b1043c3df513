//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）のインターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, ServerEvent};

/// 接続ごとの送信タスクへ渡すフレーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    Text(String),
    Close { code: u16, reason: String },
}

/// 接続ごとの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<OutboundFrame>;

/// MessagePusher trait
///
/// ブロードキャストでは一部の宛先への送信失敗を許容し、残りの宛先には
/// 必ず送信を試みる。再送はしない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 送信チャンネルを登録
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel);

    /// 送信チャンネルを登録解除（送信タスクは残りのフレームを送って終了する）
    async fn unregister_client(&self, client_id: &ConnectionId);

    /// 特定のクライアントにイベントを送信
    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントにイベントを送信
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 特定のクライアントの接続を閉じる
    async fn close(
        &self,
        client_id: &ConnectionId,
        code: u16,
        reason: &str,
    ) -> Result<(), MessagePushError>;
}
