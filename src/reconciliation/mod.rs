//! Reconciliation of held bets against match results
//!
//! Each match in the catalog settles every held bet that references it. A win
//! credits the stake to the player and adds `stake * rate_a` to the casino
//! delta; a loss debits the stake and adds `stake * rate_b`. The rate follows
//! the outcome, not the side the player picked.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::MatchCatalog;
use crate::ledger::Ledger;
use crate::traits::*;
use crate::types::*;

/// Totals produced by a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub bets_settled: u64,
    pub wins: u64,
    pub losses: u64,
    pub casino_delta: i64,
}

/// Add a payout to the running casino delta.
///
/// The delta is widened to `f64` for the addition and truncated back toward
/// zero, saturating at the `i64` bounds.
pub fn accumulate_delta(delta: i64, payout: f64) -> i64 {
    (delta as f64 + payout) as i64
}

pub struct ReconciliationEngine;

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Settle held bets against the catalog, updating player balances.
    ///
    /// Held withdrawals and bets on unknown matches are left untouched. A bet
    /// whose player has no account fails the run.
    pub fn settle<S: PlayerStore>(
        &self,
        ledger: &mut Ledger<S>,
        catalog: &MatchCatalog,
    ) -> SettlementResult<SettlementSummary> {
        let (players, pending) = ledger.split_mut();
        let bets = pending.bets_by_match();
        let mut summary = SettlementSummary::default();

        for game in catalog.iter() {
            let Some(entries) = bets.get(&game.id) else {
                continue;
            };

            for (player_id, slip) in entries {
                let won = slip.side == game.result;
                players.get_required_mut(player_id)?.settle_bet(slip.stake, won);

                let rate = if won { game.rate_a } else { game.rate_b };
                summary.casino_delta = accumulate_delta(summary.casino_delta, slip.stake as f64 * rate);
                summary.bets_settled += 1;
                if won {
                    summary.wins += 1;
                } else {
                    summary.losses += 1;
                }
                debug!(%player_id, match_id = %game.id, stake = slip.stake, won, "bet settled");
            }
        }

        info!(
            settled = summary.bets_settled,
            wins = summary.wins,
            losses = summary.losses,
            casino_delta = summary.casino_delta,
            "reconciliation complete"
        );
        Ok(summary)
    }
}
