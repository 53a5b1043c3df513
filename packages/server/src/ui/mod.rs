//! WebSocket chat relay server (UI layer).

mod handler;
mod idle;
mod server;
mod signal;
pub mod state;

pub use server::Server;
