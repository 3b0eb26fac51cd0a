//! In-memory player storage

use indexmap::IndexMap;
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// In-memory player store, keeping players in the order they were created
#[derive(Debug, Clone, Default)]
pub struct MemoryPlayerStore {
    players: IndexMap<Uuid, Player>,
}

impl MemoryPlayerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all players
    pub fn clear(&mut self) {
        self.players.clear();
    }
}

impl PlayerStore for MemoryPlayerStore {
    fn get_or_create(&mut self, player_id: Uuid) -> &mut Player {
        self.players
            .entry(player_id)
            .or_insert_with(|| Player::new(player_id))
    }

    fn get(&self, player_id: &Uuid) -> Option<&Player> {
        self.players.get(player_id)
    }

    fn get_mut(&mut self, player_id: &Uuid) -> Option<&mut Player> {
        self.players.get_mut(player_id)
    }

    fn players(&self) -> Vec<&Player> {
        self.players.values().collect()
    }

    fn len(&self) -> usize {
        self.players.len()
    }
}
