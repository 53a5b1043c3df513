//! Data Transfer Objects
//!
//! WebSocket 上の JSON 表現と、ドメインモデルとの変換。

pub mod conversion;
pub mod websocket;
