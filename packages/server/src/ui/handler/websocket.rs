//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{DisconnectReason, OutboundFrame},
    infrastructure::dto::conversion::decode_request,
    ui::{idle::IdleTimer, state::AppState},
};

/// How long a finished connection may take to flush its queued frames
const FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and writes them to the WebSocket.
///
/// The task ends after writing a close frame, when the channel is closed (the
/// client was unregistered from the pusher), or when the socket write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundFrame>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match frame {
                OutboundFrame::Text(text) => {
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                OutboundFrame::Close { code, reason } => {
                    let close = Message::Close(Some(CloseFrame {
                        code,
                        reason: reason.into(),
                    }));
                    if let Err(e) = sender.send(close).await {
                        tracing::debug!("Failed to send close frame: {}", e);
                    }
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this client to receive frames
    let (tx, rx) = mpsc::unbounded_channel();
    let client_id = match state.session_manager.connect(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return;
        }
    };

    let mut send_task = pusher_loop(rx, sender);
    let mut send_task_done = false;
    let mut idle = IdleTimer::new(state.idle_time);
    let mut shutdown = state.shutdown.clone();

    let reason = loop {
        tokio::select! {
            frame = receiver.next() => {
                let msg = match frame {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error on '{}': {}", client_id, e);
                        break DisconnectReason::TransportError;
                    }
                    None => break DisconnectReason::ClientClosed,
                };

                // Any inbound frame counts as activity
                idle.reset();

                match msg {
                    Message::Text(text) => {
                        tracing::debug!("Received text from '{}': {}", client_id, text.as_str());
                        match decode_request(text.as_str()) {
                            Ok(request) => {
                                state
                                    .session_manager
                                    .handle_request(&client_id, request)
                                    .await;
                            }
                            Err(e) => {
                                tracing::warn!("Dropped message from '{}': {}", client_id, e);
                            }
                        }
                    }
                    Message::Close(_) => {
                        tracing::info!("Client '{}' requested close", client_id);
                        break DisconnectReason::ClientClosed;
                    }
                    Message::Ping(_) | Message::Pong(_) | Message::Binary(_) => {
                        // Ping/pong is handled automatically by the WebSocket protocol
                    }
                }
            }
            () = idle.expired() => {
                tracing::debug!("Idle kick '{}' after {:?}", client_id, idle.period());
                break DisconnectReason::IdleTimeout;
            }
            () = async {
                // The guard returned by `wait_for` must not outlive this block
                let _ = shutdown.wait_for(|stopping| *stopping).await;
            } => {
                break DisconnectReason::ServerShutdown;
            }
            _ = &mut send_task => {
                send_task_done = true;
                break DisconnectReason::TransportError;
            }
        }
    };

    // Queues the close frame if any, announces the departure and drops the
    // pusher channel so that the send task drains and exits.
    state.session_manager.disconnect(&client_id, reason).await;

    if !send_task_done
        && tokio::time::timeout(FLUSH_TIMEOUT, &mut send_task)
            .await
            .is_err()
    {
        tracing::warn!("Send task of '{}' did not finish in time, aborting", client_id);
        send_task.abort();
    }
}
