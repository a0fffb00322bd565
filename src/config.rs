//! Engine configuration

use crate::error::{GomokuError, Result};

/// Deepest search the engine accepts.
pub const MAX_SEARCH_DEPTH: u8 = 12;

/// Search parameters.
///
/// ```
/// use gobang::config::EngineConfig;
///
/// let config = EngineConfig { max_depth: 4, ..EngineConfig::default() };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Full search depth in plies
    pub max_depth: u8,
    /// Candidates visited at the root are `branch_base + 1`; one fewer per ply below
    pub branch_base: usize,
    /// Transposition table size in megabytes
    pub tt_size_mb: usize,
    /// Probe and fill the transposition table
    pub use_transposition: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            branch_base: 8,
            tt_size_mb: 16,
            use_transposition: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(GomokuError::InvalidConfig("search depth must be at least 1".into()));
        }
        if self.max_depth > MAX_SEARCH_DEPTH {
            return Err(GomokuError::InvalidConfig(format!(
                "search depth {} exceeds the maximum of {MAX_SEARCH_DEPTH}",
                self.max_depth
            )));
        }
        if self.tt_size_mb == 0 {
            return Err(GomokuError::InvalidConfig(
                "transposition table size must be at least 1 MB".into(),
            ));
        }
        Ok(())
    }
}
