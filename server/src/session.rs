//! Connection lifecycle: what happens on connect, on each inbound frame, and
//! on disconnect.
//!
//! The controller owns the player registry and the dispatcher. Every event
//! takes the registry lock before the dispatcher lock and keeps both for the
//! whole event, so a registry change and the envelopes describing it reach
//! every queue before any other event can observe or broadcast the registry.
//! Queueing never blocks, so the locks are only held for in-memory work.

use crate::dispatcher::{Dispatcher, Outbound};
use crate::registry::PlayerRegistry;
use crate::utils;
use log::{debug, error, info, warn};
use shared::{
    decode_client, resolve_movement, ClientMessage, Player, ProtocolError, ServerMessage,
    PLAYER_SIZE, WORLD_SIZE,
};
use std::collections::HashMap;
use std::fmt::Display;
use tokio::sync::RwLock;

pub struct SessionController {
    registry: RwLock<PlayerRegistry>,
    dispatcher: RwLock<Dispatcher>,
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(PlayerRegistry::new()),
            dispatcher: RwLock::new(Dispatcher::new()),
        }
    }

    /// Registers a new connection and greets it.
    ///
    /// The new connection receives `init` followed by `currentPlayers`; every
    /// other connection receives `playerJoined`. If the greeting cannot be
    /// serialized the player is removed again and the error is returned so the
    /// transport can close the socket.
    pub async fn on_connect(&self, sender: Outbound) -> Result<Player, ProtocolError> {
        let mut registry = self.registry.write().await;
        let mut dispatcher = self.dispatcher.write().await;

        let id = registry.allocate_id();
        let player = Player::new(id.clone(), utils::display_name(&id), utils::generate_color());

        if let Err(e) = registry.insert(player.clone()) {
            error!("Player id allocation is broken: {}", e);
            panic!("{}", e);
        }

        dispatcher.register(&id, sender);
        let greeting = dispatcher
            .send_to(
                &id,
                &ServerMessage::Init {
                    player_id: id.clone(),
                    player_state: player.clone(),
                    world_size: WORLD_SIZE,
                    player_size: PLAYER_SIZE,
                },
            )
            .and_then(|_| {
                dispatcher.send_to(
                    &id,
                    &ServerMessage::CurrentPlayers {
                        players: registry.snapshot(),
                    },
                )
            });

        if let Err(e) = greeting {
            error!("Failed to serialize greeting for {}: {}", id, e);
            dispatcher.unregister(&id);
            registry.remove(&id);
            return Err(e);
        }

        dispatcher.broadcast(
            &ServerMessage::PlayerJoined {
                player: player.clone(),
            },
            Some(&id),
        );

        info!(
            "Player {} ({}) joined, {} connected",
            player.id,
            player.name,
            registry.len()
        );
        Ok(player)
    }

    /// Handles one inbound text frame from `player_id`.
    ///
    /// Nothing is ever sent back as an error: bad frames are logged and
    /// dropped, and frames from a player that is already gone are ignored.
    pub async fn on_message(&self, player_id: &str, text: &str) {
        match decode_client(text) {
            Ok(ClientMessage::Movement { direction }) => {
                self.handle_movement(player_id, &direction).await
            }
            Ok(ClientMessage::Chat { message }) => self.handle_chat(player_id, message).await,
            Err(ProtocolError::UnknownType(kind)) => {
                warn!("Unrecognized message type {:?} from {}", kind, player_id);
            }
            Err(e) => {
                warn!("Dropping malformed message from {}: {}", player_id, e);
            }
        }
    }

    async fn handle_movement(&self, player_id: &str, direction: &str) {
        let mut registry = self.registry.write().await;
        let dispatcher = self.dispatcher.read().await;

        let Some((x, y)) = registry.get(player_id).map(Player::position) else {
            debug!("Ignoring movement from departed player {}", player_id);
            return;
        };

        let (new_x, new_y) = resolve_movement(x, y, direction);
        if new_x == x && new_y == y {
            return;
        }

        registry.update_position(player_id, new_x, new_y);
        dispatcher.broadcast(
            &ServerMessage::PlayerMoved {
                player_id: player_id.to_string(),
                x: new_x,
                y: new_y,
            },
            None,
        );
    }

    async fn handle_chat(&self, player_id: &str, message: String) {
        let registry = self.registry.read().await;
        let dispatcher = self.dispatcher.read().await;

        let Some(sender) = registry.get(player_id) else {
            debug!("Ignoring chat from departed player {}", player_id);
            return;
        };

        dispatcher.broadcast(
            &ServerMessage::Chat {
                sender: sender.name.clone(),
                message,
            },
            None,
        );
    }

    /// Removes a player and tells everyone who is left. Repeated calls for
    /// the same player do nothing.
    pub async fn on_disconnect(&self, player_id: &str) {
        let mut registry = self.registry.write().await;
        let mut dispatcher = self.dispatcher.write().await;

        let removed = registry.remove(player_id);
        dispatcher.unregister(player_id);

        if removed.is_none() {
            return;
        }

        dispatcher.broadcast(
            &ServerMessage::PlayerLeft {
                player_id: player_id.to_string(),
            },
            None,
        );
        info!("Player {} left, {} connected", player_id, registry.len());
    }

    /// Transport errors stay local to their connection; the close path
    /// performs the cleanup.
    pub fn on_transport_error(&self, player_id: &str, err: &dyn Display) {
        warn!("Transport error on connection {}: {}", player_id, err);
    }

    pub async fn snapshot(&self) -> HashMap<String, Player> {
        self.registry.read().await.snapshot()
    }

    pub async fn player_count(&self) -> usize {
        self.registry.read().await.len()
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}
