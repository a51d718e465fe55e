//! Request-scoped loader tuning

use std::time::Duration;

use crate::{env_or, ConfigError, ConfigResult};

/// Default upper bound on keys sent to the store in one batch
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Tuning for the per-request batch loaders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Extra time a scheduled flush waits before draining pending keys.
    /// Zero means the flush only yields once to the scheduler.
    pub batch_delay: Duration,

    /// Maximum number of keys passed to a single bulk fetch
    pub max_batch_size: usize,
}

impl LoaderConfig {
    /// Load loader configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        let delay_ms: u64 = env_or("LOADER_BATCH_DELAY_MS", 0)?;
        let max_batch_size: usize = env_or("LOADER_MAX_BATCH_SIZE", DEFAULT_MAX_BATCH_SIZE)?;

        if max_batch_size == 0 {
            return Err(ConfigError::OutOfRange {
                var: "LOADER_MAX_BATCH_SIZE",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            batch_delay: Duration::from_millis(delay_ms),
            max_batch_size,
        })
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_delay: Duration::ZERO,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_loader_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.batch_delay, Duration::ZERO);
        assert_eq!(config.max_batch_size, 1000);
    }
}
