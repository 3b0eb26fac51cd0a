//! Settlement report assembly and output

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

use crate::ledger::Ledger;
use crate::traits::*;
use crate::types::*;

/// A player whose activity settled without review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledEntry {
    pub player_id: Uuid,
    pub balance: i64,
    pub win_rate: WinRate,
}

/// A player held for review, with the action that flagged them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedEntry {
    pub player_id: Uuid,
    pub action: String,
}

/// Final output of a settlement run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Players without a held action, ascending by ID
    pub settled: Vec<SettledEntry>,
    /// Players with a held action, ascending by ID
    pub flagged: Vec<FlaggedEntry>,
    pub casino_delta: i64,
}

impl SettlementReport {
    /// Partition the ledger's players into settled and flagged groups
    pub fn build<S: PlayerStore>(ledger: &Ledger<S>, casino_delta: i64) -> Self {
        let mut settled: Vec<SettledEntry> = ledger
            .players()
            .players()
            .into_iter()
            .filter(|player| !ledger.is_flagged(&player.id()))
            .map(|player| SettledEntry {
                player_id: player.id(),
                balance: player.balance(),
                win_rate: player.win_rate(),
            })
            .collect();
        settled.sort_by_key(|entry| entry.player_id);

        let mut flagged: Vec<FlaggedEntry> = ledger
            .pending()
            .iter()
            .map(|(player_id, action)| FlaggedEntry {
                player_id: *player_id,
                action: action.raw.clone(),
            })
            .collect();
        flagged.sort_by_key(|entry| entry.player_id);

        Self {
            settled,
            flagged,
            casino_delta,
        }
    }

    /// Write the report text.
    ///
    /// Each group is followed by a blank line only when it has entries; the
    /// casino delta is always the last line.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for entry in &self.settled {
            writeln!(writer, "{} {} {}", entry.player_id, entry.balance, entry.win_rate)?;
        }
        if !self.settled.is_empty() {
            writeln!(writer)?;
        }

        for entry in &self.flagged {
            writeln!(writer, "{} {}", entry.player_id, entry.action)?;
        }
        if !self.flagged.is_empty() {
            writeln!(writer)?;
        }

        writeln!(writer, "{}", self.casino_delta)?;
        writer.flush()
    }

    /// Render the report to a string
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)
            .expect("writing a report into memory cannot fail");
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Write the report to a file, replacing any previous contents
    pub fn write_file(&self, path: &Path) -> SettlementResult<()> {
        let io_error = |source: io::Error| SettlementError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_error)?;
        self.write_to(BufWriter::new(file)).map_err(io_error)
    }
}
