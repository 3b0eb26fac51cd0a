//! Core types and data structures for the settlement run

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Decimal places used when reporting a player's win rate
pub const WIN_RATE_SCALE: i64 = 2;

/// A win ratio, always rendered with two decimal places
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WinRate(BigDecimal);

impl WinRate {
    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl fmt::Display for WinRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // BigDecimal drops the scale of zero unless a precision is given
        write!(f, "{:.2}", self.0)
    }
}

/// A player account tracked for the duration of a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: Uuid,
    /// Balance in minor currency units
    balance: i64,
    bets_placed: u32,
    bets_won: u32,
}

impl Player {
    /// Create a player with a zero balance and no bets
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            balance: 0,
            bets_placed: 0,
            bets_won: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn bets_placed(&self) -> u32 {
        self.bets_placed
    }

    pub fn bets_won(&self) -> u32 {
        self.bets_won
    }

    /// Add funds to the balance. Amounts are not bounded.
    pub fn deposit(&mut self, amount: i64) {
        self.balance = self.balance.wrapping_add(amount);
    }

    /// Remove funds if the balance covers them.
    ///
    /// Returns `false` and leaves the balance untouched when it does not.
    pub fn withdraw(&mut self, amount: i64) -> bool {
        if self.balance >= amount {
            self.balance = self.balance.wrapping_sub(amount);
            true
        } else {
            false
        }
    }

    /// Apply the outcome of a settled bet
    pub fn settle_bet(&mut self, stake: i64, won: bool) {
        self.bets_placed += 1;
        if won {
            self.bets_won += 1;
            self.balance = self.balance.wrapping_add(stake);
        } else {
            self.balance = self.balance.wrapping_sub(stake);
        }
    }

    /// Bets won over bets placed, rounded half-up to two decimal places.
    ///
    /// A player who never bet has a win rate of `0.00`.
    pub fn win_rate(&self) -> WinRate {
        if self.bets_placed == 0 {
            return WinRate(BigDecimal::from(0).with_scale(WIN_RATE_SCALE));
        }
        WinRate(
            (BigDecimal::from(self.bets_won) / BigDecimal::from(self.bets_placed))
                .with_scale_round(WIN_RATE_SCALE, RoundingMode::HalfUp),
        )
    }
}

/// A finished match and the payout rates quoted for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub rate_a: f64,
    pub rate_b: f64,
    /// Label of the winning side, compared verbatim against a bet's side
    pub result: String,
}

impl Match {
    pub fn new(id: Uuid, rate_a: f64, rate_b: f64, result: String) -> Self {
        Self {
            id,
            rate_a,
            rate_b,
            result,
        }
    }
}

/// Action labels recognised in the player log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Deposit,
    Bet,
    Withdraw,
}

impl ActionKind {
    /// Map a raw action label to its kind. Labels are case sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "DEPOSIT" => Some(ActionKind::Deposit),
            "BET" => Some(ActionKind::Bet),
            "WITHDRAW" => Some(ActionKind::Withdraw),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Deposit => "DEPOSIT",
            ActionKind::Bet => "BET",
            ActionKind::Withdraw => "WITHDRAW",
        }
    }
}

/// The wager carried by a BET line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetSlip {
    pub match_id: Uuid,
    /// Stake in minor currency units
    pub stake: i64,
    pub side: String,
}

/// What a held-back action was
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingKind {
    /// A bet waiting for its match result
    Bet(BetSlip),
    /// A successful withdrawal held for manual review
    Withdraw { amount: i64 },
}

/// An action held back from normal settlement, kept with its original line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    /// The line exactly as it appeared in the player log
    pub raw: String,
    pub kind: PendingKind,
}

impl PendingAction {
    pub fn bet(raw: impl Into<String>, slip: BetSlip) -> Self {
        Self {
            raw: raw.into(),
            kind: PendingKind::Bet(slip),
        }
    }

    pub fn withdraw(raw: impl Into<String>, amount: i64) -> Self {
        Self {
            raw: raw.into(),
            kind: PendingKind::Withdraw { amount },
        }
    }

    /// The bet slip to settle for `player_id`, if this action is one.
    ///
    /// The raw line must begin with the canonical `<id>,BET,` prefix; a bet
    /// written with an upper case id never settles and stays under review.
    pub fn bet_for(&self, player_id: &Uuid) -> Option<&BetSlip> {
        match &self.kind {
            PendingKind::Bet(slip) => {
                let prefix = format!("{player_id},{},", ActionKind::Bet.label());
                self.raw.starts_with(&prefix).then_some(slip)
            }
            PendingKind::Withdraw { .. } => None,
        }
    }
}

/// Errors that can occur during a settlement run
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    #[error("Cannot open input {}: {source}", .path.display())]
    MissingInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed record in {origin} at line {line}: {reason}")]
    MalformedRecord {
        origin: String,
        line: usize,
        reason: String,
    },
    #[error("Unknown player in settlement: {0}")]
    UnknownPlayer(Uuid),
}

/// Result type for settlement operations
pub type SettlementResult<T> = Result<T, SettlementError>;
