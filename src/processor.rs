//! Batch runner wiring the settlement stages together

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{error, info};

use crate::catalog::MatchCatalog;
use crate::config::ProcessorConfig;
use crate::ledger::{Ledger, LedgerBuilder};
use crate::reconciliation::ReconciliationEngine;
use crate::report::SettlementReport;
use crate::types::*;

/// Runs one settlement pass: ledger, catalog, reconciliation, report
pub struct BettingProcessor {
    config: ProcessorConfig,
    engine: ReconciliationEngine,
}

impl BettingProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            engine: ReconciliationEngine::new(),
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Run the batch and write the report.
    ///
    /// An input that cannot be opened is logged and treated as empty. Any
    /// other failure stops the run before the report is written.
    pub fn run(&self) -> SettlementResult<SettlementReport> {
        let mut ledger = self.load_ledger()?;
        let catalog = self.load_catalog()?;

        let summary = self.engine.settle(&mut ledger, &catalog)?;
        let report = SettlementReport::build(&ledger, summary.casino_delta);

        report.write_file(&self.config.output)?;
        info!(
            output = %self.config.output.display(),
            settled = report.settled.len(),
            flagged = report.flagged.len(),
            casino_delta = report.casino_delta,
            "settlement report written"
        );
        Ok(report)
    }

    fn load_ledger(&self) -> SettlementResult<Ledger> {
        let path = &self.config.player_data;
        let mut builder = LedgerBuilder::new(path.display().to_string());
        if let Some(reader) = open_input(path) {
            builder.read_all(reader)?;
        }
        Ok(builder.finish())
    }

    fn load_catalog(&self) -> SettlementResult<MatchCatalog> {
        let path = &self.config.match_data;
        match open_input(path) {
            Some(reader) => MatchCatalog::load(reader, &path.display().to_string()),
            None => Ok(MatchCatalog::new()),
        }
    }
}

/// Open an input log, logging and skipping it if it cannot be opened
fn open_input(path: &Path) -> Option<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Some(BufReader::new(file)),
        Err(source) => {
            let err = SettlementError::MissingInput {
                path: path.to_path_buf(),
                source,
            };
            error!(error = %err, "continuing without input");
            None
        }
    }
}
