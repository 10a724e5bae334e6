//! Authoritative table of connected players.
//!
//! The registry owns player ids: they are handed out from a monotonic counter
//! that starts at 1 and never rewinds, so an id is never reused while the
//! process lives. All reads used for broadcasting go through [`PlayerRegistry::snapshot`],
//! which returns an owned copy.

use crate::error::RegistryError;
use crate::utils;
use log::info;
use shared::Player;
use std::collections::HashMap;

#[derive(Debug)]
pub struct PlayerRegistry {
    players: HashMap<String, Player>,
    next_sequence: u64,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
            next_sequence: 1,
        }
    }

    /// Reserves the next player id.
    pub fn allocate_id(&mut self) -> String {
        let id = utils::player_id(self.next_sequence);
        self.next_sequence += 1;
        id
    }

    /// Adds a player, refusing to overwrite an existing entry.
    pub fn insert(&mut self, player: Player) -> Result<(), RegistryError> {
        if self.players.contains_key(&player.id) {
            return Err(RegistryError::DuplicateId(player.id));
        }

        info!(
            "Added player {} at ({}, {})",
            player.id, player.x, player.y
        );
        self.players.insert(player.id.clone(), player);
        Ok(())
    }

    /// Removes a player. Calling this for an unknown id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Player> {
        let removed = self.players.remove(id);
        if removed.is_some() {
            info!("Removed player {}", id);
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    /// Moves a player in place. Returns false when the player is gone.
    pub fn update_position(&mut self, id: &str, x: f32, y: f32) -> bool {
        match self.players.get_mut(id) {
            Some(player) => {
                player.x = x;
                player.y = y;
                true
            }
            None => false,
        }
    }

    /// Point-in-time copy of every entry.
    pub fn snapshot(&self) -> HashMap<String, Player> {
        self.players.clone()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
