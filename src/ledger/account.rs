//! Builds player balances and the review table from the player log

use std::io::BufRead;
use tracing::{debug, info};

use crate::ledger::{Ledger, PlayerAction};
use crate::traits::*;
use crate::types::*;
use crate::utils::memory_storage::MemoryPlayerStore;
use crate::utils::validation::RecordContext;

/// Applies player log lines, in file order, to a ledger
pub struct LedgerBuilder<S: PlayerStore = MemoryPlayerStore> {
    ledger: Ledger<S>,
    origin: String,
    lines_read: usize,
}

impl LedgerBuilder<MemoryPlayerStore> {
    /// Create a builder backed by in-memory storage
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_store(MemoryPlayerStore::new(), origin)
    }
}

impl<S: PlayerStore> LedgerBuilder<S> {
    /// Create a builder over a custom player store
    pub fn with_store(store: S, origin: impl Into<String>) -> Self {
        Self {
            ledger: Ledger::new(store),
            origin: origin.into(),
            lines_read: 0,
        }
    }

    /// Parse and apply the next line of the log
    pub fn apply_line(&mut self, line: &str) -> SettlementResult<()> {
        self.lines_read += 1;
        let ctx = RecordContext::new(&self.origin, self.lines_read);
        let action = PlayerAction::parse(line, &ctx)?;
        self.apply(action, line);
        Ok(())
    }

    /// Apply an already parsed action; `raw` is kept verbatim if the action is held
    pub fn apply(&mut self, action: PlayerAction, raw: &str) {
        match action {
            PlayerAction::Deposit { player_id, amount } => {
                self.ledger
                    .players_mut()
                    .get_or_create(player_id)
                    .deposit(amount);
            }
            PlayerAction::Bet { player_id, slip } => {
                debug!(%player_id, match_id = %slip.match_id, stake = slip.stake, "bet held for settlement");
                self.ledger
                    .pending_mut()
                    .record(player_id, PendingAction::bet(raw, slip));
            }
            PlayerAction::Withdraw { player_id, amount } => {
                let player = self.ledger.players_mut().get_or_create(player_id);
                if player.withdraw(amount) {
                    debug!(%player_id, amount, "withdrawal held for review");
                    self.ledger
                        .pending_mut()
                        .record(player_id, PendingAction::withdraw(raw, amount));
                } else {
                    debug!(%player_id, amount, "withdrawal dropped: insufficient balance");
                }
            }
            PlayerAction::Unrecognized { player_id, label } => {
                debug!(%player_id, %label, "ignoring unrecognized action");
            }
        }
    }

    /// Apply every line from a reader
    pub fn read_all<R: BufRead>(&mut self, reader: R) -> SettlementResult<()> {
        for line in reader.lines() {
            let line = line.map_err(|source| SettlementError::Io {
                path: self.origin.clone().into(),
                source,
            })?;
            self.apply_line(&line)?;
        }
        Ok(())
    }

    /// Finish building and hand over the ledger
    pub fn finish(self) -> Ledger<S> {
        info!(
            origin = %self.origin,
            lines = self.lines_read,
            players = self.ledger.players().len(),
            pending = self.ledger.pending().len(),
            "player ledger built"
        );
        self.ledger
    }
}
