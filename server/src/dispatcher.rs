//! Fan-out of server envelopes to open connections.
//!
//! Each open connection is represented by the sending half of its unbounded
//! outbound queue; a writer task on the other end drains the queue into the
//! socket. Queueing never waits on the peer, so a stalled client only grows
//! its own queue and never delays delivery to anyone else.

use log::{debug, error};
use shared::{encode, ProtocolError, ServerMessage};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

pub type Outbound = mpsc::UnboundedSender<Message>;

#[derive(Debug, Default)]
pub struct Dispatcher {
    /// Outbound queues indexed by the owning player's id
    connections: HashMap<String, Outbound>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    pub fn register(&mut self, player_id: &str, sender: Outbound) {
        self.connections.insert(player_id.to_string(), sender);
    }

    /// Forgets a connection. Unknown ids are ignored.
    pub fn unregister(&mut self, player_id: &str) -> bool {
        self.connections.remove(player_id).is_some()
    }

    /// Queues a message for a single connection.
    ///
    /// Returns `Ok(false)` if the connection is unknown or already closed.
    /// A message that cannot be serialized is returned as an error.
    pub fn send_to(
        &self,
        player_id: &str,
        message: &ServerMessage,
    ) -> Result<bool, ProtocolError> {
        let Some(sender) = self.connections.get(player_id) else {
            debug!("Skipping send to unknown connection {}", player_id);
            return Ok(false);
        };

        let text = encode(message)?;
        Ok(Self::deliver(player_id, sender, text))
    }

    /// Queues a message for every open connection except `exclude`.
    ///
    /// The message is serialized once. Returns how many connections it was
    /// queued for; a closed connection is skipped and does not stop the rest.
    pub fn broadcast(&self, message: &ServerMessage, exclude: Option<&str>) -> usize {
        let text = match encode(message) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to serialize broadcast: {}", e);
                return 0;
            }
        };

        let targets: Vec<(&String, &Outbound)> = self
            .connections
            .iter()
            .filter(|(id, _)| Some(id.as_str()) != exclude)
            .collect();

        let mut delivered = 0;
        for (id, sender) in targets {
            if Self::deliver(id, sender, text.clone()) {
                delivered += 1;
            }
        }
        delivered
    }

    fn deliver(player_id: &str, sender: &Outbound, text: String) -> bool {
        if sender.is_closed() {
            debug!("Connection {} is closed, skipping send", player_id);
            return false;
        }

        if sender.send(Message::text(text)).is_err() {
            debug!("Connection {} closed mid-send", player_id);
            return false;
        }
        true
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.connections.contains_key(player_id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
