//! Pacing configuration.
//!
//! All knobs are plain numeric options with serde defaults, so a config file
//! may specify any subset and the rest fall back to the built-in values.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Length of the rolling hour window.
pub const HOUR_WINDOW: Duration = Duration::from_secs(3600);

/// Error returned when a configuration is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `hour_limit` must be greater than zero
    #[error("hour_limit must be greater than 0")]
    ZeroHourLimit,
    /// `day_limit` must be greater than zero
    #[error("day_limit must be greater than 0")]
    ZeroDayLimit,
}

/// Configuration for the action pacer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacerConfig {
    /// Maximum actions per rolling hour window (default: 20)
    #[serde(default = "default_hour_limit")]
    pub hour_limit: u32,

    /// Maximum actions per run day; reaching it stops the run (default: 150)
    #[serde(default = "default_day_limit")]
    pub day_limit: u32,

    /// Fixed delay between consecutive actions in seconds (default: 5)
    #[serde(default = "default_action_delay_secs")]
    pub action_delay_secs: u64,

    /// Days a freshly followed identity is exempt from unfollowing (default: 3)
    #[serde(default = "default_protection_period_days")]
    pub protection_period_days: u64,

    /// Settle time between collector pages in seconds (default: 2)
    #[serde(default = "default_collect_settle_secs")]
    pub collect_settle_secs: u64,

    /// Consecutive no-growth pages before collection stops (default: 3)
    #[serde(default = "default_stall_threshold")]
    pub stall_threshold: u32,
}

fn default_hour_limit() -> u32 {
    20
}

fn default_day_limit() -> u32 {
    150
}

fn default_action_delay_secs() -> u64 {
    5
}

fn default_protection_period_days() -> u64 {
    3
}

fn default_collect_settle_secs() -> u64 {
    2
}

fn default_stall_threshold() -> u32 {
    3
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            hour_limit: default_hour_limit(),
            day_limit: default_day_limit(),
            action_delay_secs: default_action_delay_secs(),
            protection_period_days: default_protection_period_days(),
            collect_settle_secs: default_collect_settle_secs(),
            stall_threshold: default_stall_threshold(),
        }
    }
}

impl PacerConfig {
    /// Check the configuration for values that would wedge the scheduler.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hour_limit == 0 {
            return Err(ConfigError::ZeroHourLimit);
        }
        if self.day_limit == 0 {
            return Err(ConfigError::ZeroDayLimit);
        }
        Ok(())
    }

    /// Delay between consecutive actions.
    pub fn action_delay(&self) -> Duration {
        Duration::from_secs(self.action_delay_secs)
    }

    /// Protection period for freshly followed identities.
    pub fn protection_period(&self) -> Duration {
        Duration::from_secs(self.protection_period_days * 24 * 60 * 60)
    }

    /// Settle time between collector pages.
    pub fn collect_settle(&self) -> Duration {
        Duration::from_secs(self.collect_settle_secs)
    }
}
