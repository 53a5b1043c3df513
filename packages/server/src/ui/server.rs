//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tokio::{
    net::TcpListener,
    sync::{mpsc, watch},
};
use tower_http::trace::TraceLayer;

use crate::usecase::SessionManager;

use super::{
    handler::{health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(session_manager, config.idle_time(), config.shutdown_grace());
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// Session Manager（受信イベントの振り分け）
    session_manager: Arc<SessionManager>,
    /// 接続ごとのアイドルタイムアウト
    idle_time: Duration,
    /// 停止時に接続の終了を待つ上限
    shutdown_grace: Duration,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        session_manager: Arc<SessionManager>,
        idle_time: Duration,
        shutdown_grace: Duration,
    ) -> Self {
        Self {
            session_manager,
            idle_time,
            shutdown_grace,
        }
    }

    /// Run the WebSocket chat relay until SIGINT or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> std::io::Result<()> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `signal` resolves.
    ///
    /// Shutdown sequence: announce to registered clients, stop accepting
    /// connections, close every WebSocket session, then return once all of
    /// them have finished or the grace period has elapsed.
    pub async fn serve<F>(self, listener: TcpListener, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (drain_guard, mut drained) = mpsc::channel::<()>(1);

        let app_state = Arc::new(AppState {
            session_manager: self.session_manager.clone(),
            idle_time: self.idle_time,
            shutdown: shutdown_rx.clone(),
            drain_guard,
        });

        // Define handlers
        let app = Router::new()
            .route("/ws", get(websocket_handler))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        tracing::info!(
            "WebSocket chat relay listening on {}",
            listener.local_addr()?
        );

        let session_manager = self.session_manager;
        let graceful = async move {
            signal.await;
            tracing::info!("Stop server");
            session_manager.announce_shutdown().await;
            let _ = shutdown_tx.send(true);
        };

        let server = axum::serve(listener, app).with_graceful_shutdown(graceful);
        let finished = async move {
            server.await?;
            // Upgraded WebSocket sessions outlive the HTTP server
            let _ = drained.recv().await;
            Ok::<(), std::io::Error>(())
        };

        let grace = self.shutdown_grace;
        tokio::select! {
            result = finished => result?,
            () = grace_elapsed(shutdown_rx, grace) => {
                tracing::warn!("Shutdown grace period of {:?} elapsed, forcing exit", grace);
            }
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Resolves `grace` after the shutdown flag is raised.
async fn grace_elapsed(mut stopping: watch::Receiver<bool>, grace: Duration) {
    if stopping.wait_for(|stopping| *stopping).await.is_err() {
        // Sender gone without raising the flag: the server already finished
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(grace).await;
}
