use crate::pipeline::{ConfirmPolicy, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Serializable counterpart of [`RetryPolicy`], second-granularity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub delay_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_secs: 30,
        }
    }
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_secs(self.delay_secs))
    }
}

/// Serializable counterpart of [`ConfirmPolicy`], second-granularity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfirmSettings {
    pub max_wait_secs: u64,
    pub poll_secs: u64,
}

impl Default for ConfirmSettings {
    fn default() -> Self {
        Self {
            max_wait_secs: 300,
            poll_secs: 5,
        }
    }
}

impl ConfirmSettings {
    pub const fn new(max_wait_secs: u64, poll_secs: u64) -> Self {
        Self {
            max_wait_secs,
            poll_secs,
        }
    }

    pub fn policy(&self) -> ConfirmPolicy {
        ConfirmPolicy {
            max_wait: Duration::from_secs(self.max_wait_secs),
            poll_interval: Duration::from_secs(self.poll_secs),
        }
    }
}
