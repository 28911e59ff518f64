//! Harness configuration, read from a `config::Config`
use anyhow::{bail, Result};
use config::Config;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_CHAN_BUF: i64 = 10;
const DEFAULT_TICK_PERIOD_US: i64 = 100;
const DEFAULT_PAYLOAD_LEN: i64 = 1;

/// Capacity of the completion queue in the two-channel variants
pub const COMPLETION_BUF: usize = 1;

/// Tunables shared by every variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Capacity of the data queue
    pub chan_buf: usize,

    /// Period of the ticker in the multiplexed variants
    pub tick_period: Duration,

    /// Number of integers in each payload
    pub payload_len: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            chan_buf: DEFAULT_CHAN_BUF as usize,
            tick_period: Duration::from_micros(DEFAULT_TICK_PERIOD_US as u64),
            payload_len: DEFAULT_PAYLOAD_LEN as usize,
        }
    }
}

impl HarnessConfig {
    /// Read from the given (sub-)config, defaulting missing keys
    pub fn from_config(config: &Config) -> Result<Self> {
        let chan_buf = config.get_int("chan-buf").unwrap_or(DEFAULT_CHAN_BUF);
        let tick_period_us = config.get_int("tick-period-us").unwrap_or(DEFAULT_TICK_PERIOD_US);
        let payload_len = config.get_int("payload-len").unwrap_or(DEFAULT_PAYLOAD_LEN);

        if chan_buf < 1 {
            bail!("chan-buf must be at least 1, got {chan_buf}");
        }
        if tick_period_us < 1 {
            bail!("tick-period-us must be at least 1, got {tick_period_us}");
        }
        if payload_len < 1 {
            bail!("payload-len must be at least 1, got {payload_len}");
        }

        Ok(Self {
            chan_buf: chan_buf as usize,
            tick_period: Duration::from_micros(tick_period_us as u64),
            payload_len: payload_len as usize,
        })
    }
}

/// Extract a sub-config as a new Config object
/// Defaults to an empty Config if the path does not exist.
pub fn get_sub_config(config: &Config, path: &str) -> Config {
    match config.get_table(path) {
        Ok(sub_table) => config_from_value(sub_table),
        Err(_) => Config::default(),
    }
}

/// Get a new config from a value map
pub fn config_from_value(map: HashMap<String, config::Value>) -> Config {
    let mut builder = Config::builder();
    for (key, value) in map.into_iter() {
        builder = match builder.set_override(key, value) {
            Ok(builder) => builder,
            Err(_) => return Config::default(),
        };
    }
    builder.build().unwrap_or_default()
}
