//! File locations for a settlement run

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default name of the player action log
pub const PLAYER_DATA_FILE: &str = "player_data.txt";
/// Default name of the match results log
pub const MATCH_DATA_FILE: &str = "match_data.txt";
/// Default name of the settlement report
pub const RESULT_FILE: &str = "result.txt";

/// Where a run reads its logs and writes its report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub player_data: PathBuf,
    pub match_data: PathBuf,
    pub output: PathBuf,
}

impl Default for ProcessorConfig {
    /// The fixed file names, relative to the working directory
    fn default() -> Self {
        Self {
            player_data: PathBuf::from(PLAYER_DATA_FILE),
            match_data: PathBuf::from(MATCH_DATA_FILE),
            output: PathBuf::from(RESULT_FILE),
        }
    }
}

impl ProcessorConfig {
    /// The fixed file names, resolved under `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            player_data: dir.join(PLAYER_DATA_FILE),
            match_data: dir.join(MATCH_DATA_FILE),
            output: dir.join(RESULT_FILE),
        }
    }
}
