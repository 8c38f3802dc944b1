/*!
 * Simulator Configuration
 * Address-space dimensions and initial strategy, loadable from the environment
 */

use crate::core::limits::{DEFAULT_PAGE_SIZE, DEFAULT_TOTAL_MEMORY};
use crate::core::types::Size;
use crate::memory::Strategy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub const ENV_TOTAL_MEMORY: &str = "MEMSIM_TOTAL_MEMORY";
pub const ENV_PAGE_SIZE: &str = "MEMSIM_PAGE_SIZE";
pub const ENV_STRATEGY: &str = "MEMSIM_STRATEGY";

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be positive")]
    Zero(&'static str),
}

/// Address space configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub total_memory: Size,
    pub page_size: Size,
    pub strategy: Strategy,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            total_memory: DEFAULT_TOTAL_MEMORY,
            page_size: DEFAULT_PAGE_SIZE,
            strategy: Strategy::FirstFit,
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from `MEMSIM_*` variables, defaulting unset ones
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            total_memory: read_var(ENV_TOTAL_MEMORY)?.unwrap_or(defaults.total_memory),
            page_size: read_var(ENV_PAGE_SIZE)?.unwrap_or(defaults.page_size),
            strategy: read_var(ENV_STRATEGY)?.unwrap_or(defaults.strategy),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_memory == 0 {
            return Err(ConfigError::Zero("total_memory"));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Zero("page_size"));
        }
        Ok(())
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

fn read_var<T>(var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                var,
                reason: e.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
