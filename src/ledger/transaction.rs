//! Player action records and their parsing

use uuid::Uuid;

use crate::types::*;
use crate::utils::validation::*;

/// One parsed line of the player log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// `playerId,DEPOSIT,<ignored>,amount`
    Deposit { player_id: Uuid, amount: i64 },
    /// `playerId,BET,matchId,amount,side`
    Bet { player_id: Uuid, slip: BetSlip },
    /// `playerId,WITHDRAW,<ignored>,amount?`
    Withdraw { player_id: Uuid, amount: i64 },
    /// Any action label the ledger does not handle
    Unrecognized { player_id: Uuid, label: String },
}

impl PlayerAction {
    /// Parse a single player log line
    pub fn parse(line: &str, ctx: &RecordContext<'_>) -> SettlementResult<Self> {
        let fields = split_fields(line);
        let player_id = parse_identifier(require_field(&fields, 0, "player id", ctx)?, "player id", ctx)?;
        let label = require_field(&fields, 1, "action", ctx)?;

        let action = match ActionKind::from_label(label) {
            Some(ActionKind::Deposit) => {
                let amount = parse_amount(require_field(&fields, 3, "amount", ctx)?, "amount", ctx)?;
                PlayerAction::Deposit { player_id, amount }
            }
            Some(ActionKind::Bet) => {
                let match_id =
                    parse_identifier(require_field(&fields, 2, "match id", ctx)?, "match id", ctx)?;
                let stake = parse_amount(require_field(&fields, 3, "stake", ctx)?, "stake", ctx)?;
                let side = require_field(&fields, 4, "side", ctx)?.to_string();
                PlayerAction::Bet {
                    player_id,
                    slip: BetSlip {
                        match_id,
                        stake,
                        side,
                    },
                }
            }
            Some(ActionKind::Withdraw) => {
                // amount is optional and defaults to zero
                let amount = match fields.get(3) {
                    Some(value) => parse_amount(value, "amount", ctx)?,
                    None => 0,
                };
                PlayerAction::Withdraw { player_id, amount }
            }
            None => PlayerAction::Unrecognized {
                player_id,
                label: label.to_string(),
            },
        };

        Ok(action)
    }

    pub fn player_id(&self) -> Uuid {
        match self {
            PlayerAction::Deposit { player_id, .. }
            | PlayerAction::Bet { player_id, .. }
            | PlayerAction::Withdraw { player_id, .. }
            | PlayerAction::Unrecognized { player_id, .. } => *player_id,
        }
    }

    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            PlayerAction::Deposit { .. } => Some(ActionKind::Deposit),
            PlayerAction::Bet { .. } => Some(ActionKind::Bet),
            PlayerAction::Withdraw { .. } => Some(ActionKind::Withdraw),
            PlayerAction::Unrecognized { .. } => None,
        }
    }
}
