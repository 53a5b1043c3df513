//! UseCase layer
//!
//! クライアントのライフサイクル（接続・名前チェック・登録・投稿・切断）と
//! サーバー停止の告知を、ユースケースごとに実装します。
//! `SessionManager` は受信したリクエストを各ユースケースへ振り分けます。

pub mod announce_shutdown;
pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod post_message;
pub mod register_client;
pub mod session_manager;
pub mod validate_name;

#[cfg(test)]
pub(crate) mod test_support;

pub use announce_shutdown::AnnounceShutdownUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, PostMessageError, RegisterError};
pub use post_message::PostMessageUseCase;
pub use register_client::RegisterClientUseCase;
pub use session_manager::SessionManager;
pub use validate_name::ValidateNameUseCase;
