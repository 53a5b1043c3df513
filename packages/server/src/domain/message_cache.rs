//! Bounded message history.

use std::collections::VecDeque;

use super::entity::ChatMessage;

/// 直近のチャットメッセージを保持するキャッシュ
///
/// 挿入順を保ち、容量を超えた分は古いものから捨てる。
/// 新しく登録したクライアントへの履歴の送信に使う。
#[derive(Debug, Clone)]
pub struct MessageCache {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl MessageCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// メッセージを末尾に追加し、容量を超えた分だけ先頭から削除する
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    /// 保持しているメッセージのコピー（古い順）
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
