//! Server state shared by the handlers.

use std::{sync::Arc, time::Duration};

use tokio::sync::{mpsc, watch};

use crate::usecase::SessionManager;

/// Shared application state
pub struct AppState {
    /// Session Manager（受信イベントの振り分け）
    pub session_manager: Arc<SessionManager>,
    /// 接続ごとのアイドルタイムアウト
    pub idle_time: Duration,
    /// `true` になったら全ての接続を閉じる
    pub shutdown: watch::Receiver<bool>,
    /// 全ての接続が終わったことを検知するためのガード（送信はしない）
    pub drain_guard: mpsc::Sender<()>,
}
