//! UseCase: 名前チェック
//!
//! 候補の名前が使えるかを調べ、結果を要求したクライアントにだけ返します。
//! 状態は変更しません。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, NameRejection, ServerEvent, SessionRepository};

/// 名前チェックのユースケース
pub struct ValidateNameUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ValidateNameUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 名前チェックを実行し、要求元に `validation` を返信する
    pub async fn execute(
        &self,
        client_id: &ConnectionId,
        candidate: &str,
    ) -> Result<(), NameRejection> {
        let result = self.repository.is_name_free(candidate).await;

        let reply = ServerEvent::NameValidation(result);
        if let Err(e) = self.message_pusher.push_to(client_id, &reply).await {
            tracing::warn!("Failed to reply validation to '{}': {}", client_id, e);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{
        connect, connect_registered, create_test_message_pusher, create_test_repository, drain,
    };

    #[tokio::test]
    async fn test_validate_free_name() {
        // テスト項目: 使える名前なら success: true が本人にだけ返る
        // given (前提条件):
        let repository = create_test_repository(10);
        let pusher = create_test_message_pusher();
        let usecase = ValidateNameUseCase::new(repository.clone(), pusher.clone());
        let (_alice, mut alice_rx) = connect_registered(&repository, &pusher, "alice").await;
        let (bob, mut bob_rx) = connect(&repository, &pusher).await;

        // when (操作):
        let result = usecase.execute(&bob, "bob").await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        let replies = drain(&mut bob_rx);
        assert_eq!(
            replies,
            vec![serde_json::json!({"type": "validation", "success": true, "message": "name is free"})]
        );
        assert!(drain(&mut alice_rx).is_empty());
    }

    #[tokio::test]
    async fn test_validate_taken_and_blank_names() {
        // テスト項目: 使用中・空白のみの名前は success: false で、状態は変わらない
        // given (前提条件):
        let repository = create_test_repository(10);
        let pusher = create_test_message_pusher();
        let usecase = ValidateNameUseCase::new(repository.clone(), pusher.clone());
        connect_registered(&repository, &pusher, "Alice").await;
        let (bob, mut bob_rx) = connect(&repository, &pusher).await;

        // when (操作):
        let taken = usecase.execute(&bob, " ALICE ").await;
        let blank = usecase.execute(&bob, "   ").await;

        // then (期待する結果):
        assert_eq!(taken, Err(NameRejection::Taken));
        assert_eq!(blank, Err(NameRejection::Empty));
        let replies = drain(&mut bob_rx);
        assert_eq!(replies[0]["success"], false);
        assert_eq!(replies[0]["message"], "name is already registered");
        assert_eq!(replies[1]["message"], "name is empty");
        assert_eq!(repository.registered_client_ids().await.len(), 1);
    }
}
