//! Session Manager
//!
//! 接続から届いたイベントを各ユースケースへ振り分けるオーケストレーター。
//! Session の状態（クライアントの集合と履歴）は Repository が所有し、
//! この型は起動時に組み立てられて UI 層へ渡されます。

use std::sync::Arc;

use porch_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    Client, ClientRequest, ConnectionId, DisconnectReason, MessagePusher, PusherChannel,
    SessionRepository,
};

use super::{
    AnnounceShutdownUseCase, ConnectClientUseCase, ConnectError, DisconnectClientUseCase,
    PostMessageError, PostMessageUseCase, RegisterClientUseCase, ValidateNameUseCase,
};

/// 受信イベントの振り分けとクライアントのライフサイクル管理
///
/// 状態の変更と送信キューへの積み込みは `sequencer` を握ったまま行うため、
/// どのクライアントから見てもイベントはキャッシュと同じ順序で届きます。
pub struct SessionManager {
    sequencer: Mutex<()>,
    repository: Arc<dyn SessionRepository>,
    connect_client: ConnectClientUseCase,
    validate_name: ValidateNameUseCase,
    register_client: RegisterClientUseCase,
    post_message: PostMessageUseCase,
    disconnect_client: DisconnectClientUseCase,
    announce_shutdown: AnnounceShutdownUseCase,
}

impl SessionManager {
    /// 依存を受け取り、各ユースケースを組み立てる
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sequencer: Mutex::new(()),
            connect_client: ConnectClientUseCase::new(repository.clone(), message_pusher.clone()),
            validate_name: ValidateNameUseCase::new(repository.clone(), message_pusher.clone()),
            register_client: RegisterClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            post_message: PostMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            disconnect_client: DisconnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            announce_shutdown: AnnounceShutdownUseCase::new(
                repository.clone(),
                message_pusher,
                clock,
            ),
            repository,
        }
    }

    /// 新しい接続を受け付ける
    pub async fn connect(&self, sender: PusherChannel) -> Result<ConnectionId, ConnectError> {
        let _order = self.sequencer.lock().await;
        let id = self.connect_client.execute(sender).await?;
        tracing::info!("Client '{}' connected", id);
        Ok(id)
    }

    /// クライアントからのリクエストを処理する
    pub async fn handle_request(&self, client_id: &ConnectionId, request: ClientRequest) {
        let _order = self.sequencer.lock().await;
        match request {
            ClientRequest::Validation(candidate) => {
                tracing::info!("Validate name '{}' for '{}'", candidate, client_id);
                if let Err(rejection) = self.validate_name.execute(client_id, &candidate).await {
                    tracing::debug!("Name '{}' is not free: {}", candidate, rejection);
                }
            }
            ClientRequest::Register(candidate) => {
                match self.register_client.execute(client_id, &candidate).await {
                    Ok(name) => tracing::info!("Client '{}' registered as '{}'", client_id, name),
                    Err(e) => tracing::info!(
                        "Client '{}' failed to register '{}': {}",
                        client_id,
                        candidate,
                        e
                    ),
                }
            }
            ClientRequest::Message(content) => {
                match self.post_message.execute(client_id, content).await {
                    Ok(message) => {
                        tracing::info!("Post chat message from '{}'", message.author.as_str())
                    }
                    Err(PostMessageError::Unregistered) => {
                        tracing::error!("Unregistered client '{}' tries to send message", client_id)
                    }
                    Err(e) => tracing::warn!("Dropped message from '{}': {}", client_id, e),
                }
            }
        }
    }

    /// 接続を終了する（冪等）
    pub async fn disconnect(
        &self,
        client_id: &ConnectionId,
        reason: DisconnectReason,
    ) -> Option<Client> {
        let _order = self.sequencer.lock().await;
        let removed = self.disconnect_client.execute(client_id, reason).await;
        if removed.is_some() {
            tracing::info!("Client '{}' disconnected ({:?})", client_id, reason);
        }
        removed
    }

    /// 停止を告知する
    pub async fn announce_shutdown(&self) -> usize {
        let _order = self.sequencer.lock().await;
        let notified = self.announce_shutdown.execute().await;
        tracing::info!("Shutdown announced to {} client(s)", notified);
        notified
    }

    /// 接続中のクライアント数（未登録を含む）
    pub async fn client_count(&self) -> usize {
        self.repository.count_clients().await
    }
}
