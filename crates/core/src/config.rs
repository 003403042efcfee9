// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller timing configuration
//!
//! Values can be overridden with environment variables in milliseconds.

use std::time::Duration;

/// Interval between two status requests for the same task
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// How long the exhaustion message stays before the control re-enables
pub const DEFAULT_EXHAUSTED_CLEAR_DELAY: Duration = Duration::from_millis(3000);

pub const POLL_INTERVAL_ENV: &str = "MG_POLL_INTERVAL_MS";
pub const EXHAUSTED_CLEAR_ENV: &str = "MG_EXHAUSTED_CLEAR_MS";

/// Read a millisecond duration from the environment
pub fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub poll_interval: Duration,
    pub exhausted_clear_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            exhausted_clear_delay: DEFAULT_EXHAUSTED_CLEAR_DELAY,
        }
    }
}

impl ControllerConfig {
    /// Defaults, overridden by `MG_POLL_INTERVAL_MS` / `MG_EXHAUSTED_CLEAR_MS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            poll_interval: parse_duration_ms(POLL_INTERVAL_ENV)
                .filter(|d| !d.is_zero())
                .unwrap_or(defaults.poll_interval),
            exhausted_clear_delay: parse_duration_ms(EXHAUSTED_CLEAR_ENV)
                .unwrap_or(defaults.exhausted_clear_delay),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_exhausted_clear_delay(mut self, delay: Duration) -> Self {
        self.exhausted_clear_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_executor_contract() {
        let config = ControllerConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.exhausted_clear_delay, Duration::from_millis(3000));
    }

    #[test]
    fn unset_variable_parses_to_none() {
        assert_eq!(parse_duration_ms("MG_TEST_SURELY_UNSET_VARIABLE"), None);
    }

    #[test]
    fn builders_override_fields() {
        let config = ControllerConfig::default()
            .with_poll_interval(Duration::from_millis(10))
            .with_exhausted_clear_delay(Duration::from_millis(20));
        assert_eq!(config.poll_interval, Duration::from_millis(10));
        assert_eq!(config.exhausted_clear_delay, Duration::from_millis(20));
    }
}
