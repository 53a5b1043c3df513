//! Infrastructure layer
//!
//! ドメイン層が定義するインターフェースの具体的な実装と、
//! ワイヤーフォーマット（DTO）・入力のサニタイズを提供します。

pub mod dto;
pub mod message_pusher;
pub mod repository;
pub mod sanitizer;
