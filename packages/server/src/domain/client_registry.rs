//! Registry of connected clients and the display-name validator.

use std::collections::HashMap;

use super::{
    entity::Client,
    error::{NameRejection, RepositoryError},
    value_object::{ConnectionId, DisplayName},
};

/// 接続中のクライアントの集合
///
/// 不変条件:
/// - 1 つの接続につきクライアントは高々 1 つ
/// - 登録済みクライアントの名前は、空白除去 + 大文字小文字無視で一意
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: HashMap<ConnectionId, Client>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未登録のクライアントを追加
    ///
    /// # Errors
    ///
    /// 同じ接続がすでに存在する場合は `RepositoryError::DuplicateClient`
    pub fn insert(&mut self, id: ConnectionId) -> Result<(), RepositoryError> {
        if self.clients.contains_key(&id) {
            return Err(RepositoryError::DuplicateClient(id));
        }
        self.clients.insert(id, Client::new(id));
        Ok(())
    }

    /// クライアントを削除。存在しなければ何もせず `None`
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Client> {
        self.clients.remove(id)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Client> {
        self.clients.get(id)
    }

    /// 候補の名前が使えるか
    ///
    /// 空白除去後に空なら `Empty`、登録済みの誰かと衝突すれば `Taken`。
    pub fn is_name_free(&self, candidate: &str) -> Result<(), NameRejection> {
        if candidate.trim().is_empty() {
            return Err(NameRejection::Empty);
        }
        let taken = self
            .clients
            .values()
            .filter_map(Client::name)
            .any(|name| name.collides_with(candidate));
        if taken {
            return Err(NameRejection::Taken);
        }
        Ok(())
    }

    /// 名前のチェックと登録を一度に行う
    ///
    /// チェックと代入の間に他の登録が割り込まないよう、呼び出し側は
    /// このメソッド全体を 1 つのクリティカルセクションで実行すること。
    pub fn register(
        &mut self,
        id: &ConnectionId,
        candidate: &str,
    ) -> Result<DisplayName, RepositoryError> {
        match self.clients.get(id) {
            None => return Err(RepositoryError::ClientNotFound(*id)),
            Some(client) if client.is_registered() => {
                return Err(RepositoryError::AlreadyRegistered(*id));
            }
            Some(_) => {}
        }
        self.is_name_free(candidate)?;

        let name = DisplayName::parse(candidate)?;
        let client = self
            .clients
            .get_mut(id)
            .ok_or(RepositoryError::ClientNotFound(*id))?;
        client.register(name.clone())?;
        Ok(name)
    }

    /// 登録済みクライアントの ID 一覧
    pub fn registered_ids(&self) -> Vec<ConnectionId> {
        self.clients
            .values()
            .filter(|client| client.is_registered())
            .map(|client| client.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
