//! WebSocket chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin porch-server
//! cargo run --bin porch-server -- --config porch.json --port 3000
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use porch_server::{
    config::{ConfigError, ServerConfig},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository},
    ui::Server,
    usecase::SessionManager,
};
use porch_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "porch-server")]
#[command(about = "WebSocket chat relay with name registration and history", long_about = None)]
struct Args {
    /// Path to a JSON configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Host address to bind the server to (overrides the config file)
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port number to bind the server to (overrides the config file)
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Number of chat messages kept for backfill (overrides the config file)
    #[arg(long)]
    cache_size: Option<usize>,

    /// Idle timeout per connection in milliseconds (overrides the config file)
    #[arg(long)]
    idle_time_ms: Option<u64>,

    /// Append logs to this file as well as stdout (overrides the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn load_config(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(cache_size) = self.cache_size {
            config.cache_size = cache_size;
        }
        if let Some(idle_time_ms) = self.idle_time_ms {
            config.idle_time_ms = idle_time_ms;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
        config.validate()
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let loaded = args.load_config();

    // Initialize tracing
    let log_file = loaded.as_ref().ok().and_then(|config| config.log_file.clone());
    setup_logger(
        &[env!("CARGO_CRATE_NAME"), "tower_http"],
        "debug",
        log_file.as_deref(),
    );

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Loaded configuration: {:?}", config);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. SessionManager
    // 4. Server

    // 1. Create Repository (in-memory session with bounded history)
    let repository = Arc::new(InMemorySessionRepository::with_cache_size(
        config.cache_size,
    ));
    tracing::info!("Session created (cache size: {})", config.cache_size);

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create SessionManager
    let session_manager = Arc::new(SessionManager::new(
        repository,
        message_pusher,
        Arc::new(SystemClock),
    ));

    // 4. Create and run the server
    let server = Server::new(session_manager, config.idle_time(), config.shutdown_grace());
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
