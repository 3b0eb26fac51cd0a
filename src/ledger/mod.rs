//! Ledger module containing player accounts and held actions

pub mod account;
pub mod core;
pub mod transaction;

pub use account::*;
pub use self::core::*;
pub use transaction::*;
