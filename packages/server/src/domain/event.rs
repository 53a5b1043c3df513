//! Events crossing the session boundary.

use super::{
    entity::ChatMessage,
    error::NameRejection,
    value_object::{DisplayName, MessageContent},
};

/// クライアントからの要求
///
/// ワイヤー上の `type` タグを閉じた列挙型に変換したもの。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    /// 名前が使えるかの問い合わせ
    Validation(String),
    /// 名前の登録
    Register(String),
    /// チャットメッセージの投稿
    Message(MessageContent),
}

/// クライアントへ送るイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// 名前チェックの結果（要求したクライアントのみ）
    NameValidation(Result<(), NameRejection>),
    /// 名前登録の結果。成功時は直近のメッセージ履歴を含む（要求したクライアントのみ）
    Registration(Result<Vec<ChatMessage>, NameRejection>),
    /// チャットメッセージ（参加者またはシステム）
    Chat(ChatMessage),
}

/// WebSocket close code "going away"
pub const CLOSE_GOING_AWAY: u16 = 1001;

/// 切断の理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    /// クライアントが接続を閉じた
    ClientClosed,
    /// 送受信でエラーが発生した
    TransportError,
    /// 一定時間操作がなかった
    IdleTimeout,
    /// サーバーが停止する
    ServerShutdown,
}

impl DisconnectReason {
    /// サーバー側から接続を閉じる場合の close code と理由
    pub fn close_frame(&self) -> Option<(u16, &'static str)> {
        match self {
            DisconnectReason::IdleTimeout => Some((CLOSE_GOING_AWAY, "timeout")),
            DisconnectReason::ServerShutdown => Some((CLOSE_GOING_AWAY, "server shutdown")),
            DisconnectReason::ClientClosed | DisconnectReason::TransportError => None,
        }
    }

    /// 登録済みクライアントが切断した際に残りの参加者へ流すお知らせ
    pub fn announcement(&self, name: &DisplayName) -> Option<String> {
        match self {
            DisconnectReason::ClientClosed | DisconnectReason::TransportError => {
                Some(format!("{} left.", name))
            }
            DisconnectReason::IdleTimeout => {
                Some(format!("{} disconnected due to inactivity.", name))
            }
            DisconnectReason::ServerShutdown => None,
        }
    }
}
