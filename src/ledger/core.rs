//! The ledger produced from the player log

use indexmap::IndexMap;
use std::collections::HashMap;
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;
use crate::utils::memory_storage::MemoryPlayerStore;

/// Actions held back from settlement, at most one per player
///
/// Recording a second action for a player replaces the first but keeps the
/// player's original position in iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingActions {
    actions: IndexMap<Uuid, PendingAction>,
}

impl PendingActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action for a player, returning the one it replaced
    pub fn record(&mut self, player_id: Uuid, action: PendingAction) -> Option<PendingAction> {
        self.actions.insert(player_id, action)
    }

    pub fn get(&self, player_id: &Uuid) -> Option<&PendingAction> {
        self.actions.get(player_id)
    }

    pub fn contains(&self, player_id: &Uuid) -> bool {
        self.actions.contains_key(player_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &PendingAction)> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Group settleable bets by the match they reference.
    ///
    /// Within each match the bets keep this table's iteration order, so
    /// walking the index visits bets in the same order as a full scan would.
    pub fn bets_by_match(&self) -> HashMap<Uuid, Vec<(Uuid, &BetSlip)>> {
        let mut index: HashMap<Uuid, Vec<(Uuid, &BetSlip)>> = HashMap::new();
        for (player_id, action) in &self.actions {
            if let Some(slip) = action.bet_for(player_id) {
                index
                    .entry(slip.match_id)
                    .or_default()
                    .push((*player_id, slip));
            }
        }
        index
    }
}

/// Player balances plus the actions held for review
#[derive(Debug, Clone, Default)]
pub struct Ledger<S: PlayerStore = MemoryPlayerStore> {
    players: S,
    pending: PendingActions,
}

impl<S: PlayerStore> Ledger<S> {
    /// Create an empty ledger over the given player store
    pub fn new(players: S) -> Self {
        Self {
            players,
            pending: PendingActions::new(),
        }
    }

    pub fn players(&self) -> &S {
        &self.players
    }

    pub fn pending(&self) -> &PendingActions {
        &self.pending
    }

    /// Mutable players alongside the read-only pending table
    pub fn split_mut(&mut self) -> (&mut S, &PendingActions) {
        (&mut self.players, &self.pending)
    }

    pub(crate) fn pending_mut(&mut self) -> &mut PendingActions {
        &mut self.pending
    }

    pub(crate) fn players_mut(&mut self) -> &mut S {
        &mut self.players
    }

    /// Whether a player is under review
    pub fn is_flagged(&self, player_id: &Uuid) -> bool {
        self.pending.contains(player_id)
    }
}
