//! Value objects
//!
//! 不変で、値そのものが同一性を表すオブジェクト。

use std::fmt;

use uuid::Uuid;

use super::error::NameRejection;

/// 接続の識別子
///
/// クライアントの同一性は名前ではなく接続で決まる。名前を登録する前の
/// クライアントも、この ID で区別される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID をランダムに生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 登録済みの表示名
///
/// 前後の空白を取り除いた、空でない文字列。比較は大文字小文字を区別しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// 候補の文字列から表示名を作成
    ///
    /// # Errors
    ///
    /// 空白を除いた結果が空の場合は `NameRejection::Empty`
    pub fn parse(candidate: &str) -> Result<Self, NameRejection> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(NameRejection::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 表示名を文字列として取得
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 一意性チェックに使う比較キー
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }

    /// 候補の文字列と同じ名前とみなされるか（空白除去 + 大文字小文字無視）
    pub fn collides_with(&self, candidate: &str) -> bool {
        self.key() == candidate.trim().to_lowercase()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// チャットメッセージの本文
///
/// サニタイズ済みの文字列を受け取る前提。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(content: String) -> Self {
        Self(content)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for MessageContent {
    fn from(content: &str) -> Self {
        Self(content.to_string())
    }
}

/// Unix タイムスタンプ（UTC, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_trimmed() {
        // テスト項目: 表示名は前後の空白が取り除かれて保存される
        // given (前提条件):
        let candidate = "  Alice \t";

        // when (操作):
        let name = DisplayName::parse(candidate).unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_display_name_rejects_blank() {
        // テスト項目: 空文字列や空白のみの名前は拒否される
        // given (前提条件):
        let candidates = ["", "   ", "\n\t"];

        // when (操作):
        let results: Vec<_> = candidates.iter().map(|c| DisplayName::parse(c)).collect();

        // then (期待する結果):
        for result in results {
            assert_eq!(result, Err(NameRejection::Empty));
        }
    }

    #[test]
    fn test_display_name_collision_ignores_case_and_whitespace() {
        // テスト項目: 大文字小文字と前後の空白の違いは同じ名前とみなされる
        // given (前提条件):
        let name = DisplayName::parse("Alice").unwrap();

        // when (操作) / then (期待する結果):
        assert!(name.collides_with("alice"));
        assert!(name.collides_with(" ALICE "));
        assert!(!name.collides_with("Alicia"));
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される接続 ID は毎回異なる
        // given (前提条件) / when (操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
