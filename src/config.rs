use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::search::SearchConfig;

/// Depths outside this range are rejected; deeper searches are impractical
/// without a transposition table.
pub const DEPTH_RANGE: std::ops::RangeInclusive<u8> = 1..=12;

pub const DEFAULT_SEED: u64 = 0x00C0_FFEE;

/// Engine settings as read from a JSON file. Every field is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub depth: u8,
    pub pruning: bool,
    pub parallel: bool,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            depth: search.max_depth,
            pruning: search.pruning,
            parallel: search.parallel,
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if !DEPTH_RANGE.contains(&self.depth) {
            return Err(EngineError::Config(format!(
                "depth {} out of range {}..={}",
                self.depth,
                DEPTH_RANGE.start(),
                DEPTH_RANGE.end()
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.depth,
            pruning: self.pruning,
            parallel: self.parallel,
        }
    }
}

/// Load and validate an [`EngineConfig`] from a JSON file.
pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> EngineResult<EngineConfig> {
    let data = fs::read_to_string(path.as_ref())
        .map_err(|e| EngineError::Config(format!("failed to read {}: {e}", path.as_ref().display())))?;
    let cfg: EngineConfig =
        serde_json::from_str(&data).map_err(|e| EngineError::Config(format!("failed to parse JSON: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
