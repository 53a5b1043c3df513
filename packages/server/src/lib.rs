//! WebSocket chat relay library.
//!
//! Clients connect over WebSocket, claim a display name, receive the recent
//! message history and exchange chat messages with every other registered
//! participant.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
