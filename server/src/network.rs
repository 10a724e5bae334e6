//! Server network layer: TCP accept loop, WebSocket upgrade, and the
//! per-connection reader and writer tasks.

use crate::error::ServerError;
use crate::session::SessionController;
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// Accepts WebSocket clients and hands their events to the session controller
pub struct Server {
    listener: TcpListener,
    controller: Arc<SessionController>,
}

impl Server {
    pub async fn bind(addr: &str) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        Ok(Server {
            listener,
            controller: Arc::new(SessionController::new()),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Shared handle to the session state, usable after `run` takes the server.
    pub fn controller(&self) -> Arc<SessionController> {
        Arc::clone(&self.controller)
    }

    /// Accepts connections until the task is dropped.
    pub async fn run(self) -> Result<(), ServerError> {
        info!("Server started successfully");

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let controller = Arc::clone(&self.controller);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, addr, controller).await {
                            warn!("Connection from {} ended with error: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }
        }
    }
}

/// Drives one client from handshake to cleanup.
///
/// Outbound envelopes go through an unbounded queue drained by a dedicated
/// writer task, so the reader never waits on this client's socket and no
/// other connection ever waits on it either.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    controller: Arc<SessionController>,
) -> Result<(), ServerError> {
    let ws_stream = accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let player = match controller.on_connect(tx).await {
        Ok(player) => player,
        Err(e) => {
            let _ = ws_sender.send(Message::Close(None)).await;
            return Err(e.into());
        }
    };
    info!("Client {} connected from {}", player.id, addr);

    let writer_id = player.id.clone();
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Err(e) = ws_sender.send(message).await {
                debug!("Failed to write to {}: {}", writer_id, e);
                break;
            }
        }
        let _ = ws_sender.close().await;
    });

    while let Some(frame) = ws_receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => controller.on_message(&player.id, text.as_str()).await,
            Ok(Message::Binary(_)) => {
                warn!("Dropping binary frame from {}", player.id);
            }
            Ok(Message::Close(_)) => {
                debug!("Client {} requested close", player.id);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                controller.on_transport_error(&player.id, &e);
                break;
            }
        }
    }

    controller.on_disconnect(&player.id).await;
    info!("Client {} disconnected", player.id);
    Ok(())
}
