//! Utilities shared by the Porch packages: logging setup and clock abstraction.

pub mod logger;
pub mod time;
