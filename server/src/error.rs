use shared::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("player id {0} is already registered")]
    DuplicateId(String),
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("websocket handshake failed: {0}")]
    Handshake(#[from] tokio_tungstenite::tungstenite::Error),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
