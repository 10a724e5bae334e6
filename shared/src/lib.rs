//! Types and rules shared by the server and its clients: world constants,
//! the player record, the wire protocol, and movement resolution.

use serde::{Deserialize, Serialize};

pub mod movement;
pub mod protocol;

pub use movement::{resolve_movement, Direction};
pub use protocol::{
    decode_client, decode_server, encode, ClientMessage, ProtocolError, ServerMessage,
};

pub const WORLD_SIZE: f32 = 800.0;
pub const PLAYER_SIZE: f32 = 32.0;
pub const MOVEMENT_SPEED: f32 = 10.0;

/// Largest coordinate a player may occupy on either axis.
pub const MAX_COORD: f32 = WORLD_SIZE - PLAYER_SIZE;

/// Spawn coordinate on both axes: the world center adjusted for player size.
pub const SPAWN_COORD: f32 = WORLD_SIZE / 2.0 - PLAYER_SIZE / 2.0;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Player {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub color: String,
    pub name: String,
}

impl Player {
    /// Creates a player at the spawn point.
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x: SPAWN_COORD,
            y: SPAWN_COORD,
            color: color.into(),
            name: name.into(),
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn in_bounds(&self) -> bool {
        (0.0..=MAX_COORD).contains(&self.x) && (0.0..=MAX_COORD).contains(&self.y)
    }
}
