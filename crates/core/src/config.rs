//! Engine configuration: input timing and lock delay.
//!
//! Gravity is not configurable; it always follows the level curve in
//! [`crate::scoring::get_drop_interval_ms`].

use thiserror::Error;

use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS, LOCK_DELAY_MS, SOFT_DROP_INTERVAL_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("soft drop interval must be at least 1ms")]
    ZeroSoftDropInterval,
}

/// Timing knobs for held inputs and locking, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Delay before a held direction starts repeating.
    pub das_ms: u32,
    /// Interval between repeats; 0 shifts to the wall at once.
    pub arr_ms: u32,
    /// Interval between soft-drop steps.
    pub soft_drop_interval_ms: u32,
    /// Time a grounded piece waits before locking.
    pub lock_delay_ms: u32,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.soft_drop_interval_ms == 0 {
            return Err(ConfigError::ZeroSoftDropInterval);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            soft_drop_interval_ms: SOFT_DROP_INTERVAL_MS,
            lock_delay_ms: LOCK_DELAY_MS,
        }
    }
}
