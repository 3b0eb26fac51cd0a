//! # Betting Settlement
//!
//! Batch settlement of player bets against match results.
//!
//! A run reads two comma-separated logs, one with player account actions and
//! one with finished matches, and produces a single report.
//!
//! ## Stages
//!
//! - **Ledger**: deposits and withdrawals update player balances; bets and
//!   successful withdrawals are held for review, one per player
//! - **Catalog**: match results with their payout rates
//! - **Reconciliation**: held bets are settled against their match and the
//!   casino delta is accumulated
//! - **Report**: settled players with balance and win rate, flagged players
//!   with the action that held them, then the casino delta
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use betting_settlement::{BettingProcessor, ProcessorConfig};
//!
//! let report = BettingProcessor::new(ProcessorConfig::default()).run()?;
//! println!("casino delta: {}", report.casino_delta);
//! # Ok::<(), betting_settlement::SettlementError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod ledger;
pub mod processor;
pub mod reconciliation;
pub mod report;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use catalog::*;
pub use config::*;
pub use ledger::*;
pub use processor::*;
pub use reconciliation::*;
pub use report::*;
pub use traits::*;
pub use types::*;
