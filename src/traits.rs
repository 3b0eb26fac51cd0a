//! Storage abstraction for player accounts

use uuid::Uuid;

use crate::types::*;

/// Storage for the players touched during a run
///
/// The ledger builder and the reconciliation engine only talk to players
/// through this trait, so the in-memory store can be swapped for another
/// backend without touching settlement logic.
pub trait PlayerStore {
    /// Get a player, creating it with a zero balance if it does not exist
    fn get_or_create(&mut self, player_id: Uuid) -> &mut Player;

    /// Get a player by ID
    fn get(&self, player_id: &Uuid) -> Option<&Player>;

    /// Get a mutable player by ID
    fn get_mut(&mut self, player_id: &Uuid) -> Option<&mut Player>;

    /// All players, in no guaranteed order
    fn players(&self) -> Vec<&Player>;

    /// Number of players
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a mutable player by ID, returning an error if not found
    fn get_required_mut(&mut self, player_id: &Uuid) -> SettlementResult<&mut Player> {
        self.get_mut(player_id)
            .ok_or(SettlementError::UnknownPlayer(*player_id))
    }
}
