//! Runner settings from the top level of the configuration
use anyhow::Result;
use chanbench_harness::Variant;
use config::Config;
use std::path::PathBuf;

const DEFAULT_COUNT: i64 = 1_000_000;
const DEFAULT_REPEAT: i64 = 3;

#[derive(Debug)]
pub struct Settings {
    /// Messages per run
    pub count: u64,

    /// Runs per variant; the best is reported
    pub repeat: u32,

    /// Variants to run, in order
    pub variants: Vec<Variant>,

    /// Optional JSON report path
    pub output: Option<PathBuf>,
}

impl Settings {
    pub fn from_config(config: &Config) -> Result<Self> {
        let count = config.get_int("count").unwrap_or(DEFAULT_COUNT).max(0) as u64;
        let repeat = config.get_int("repeat").unwrap_or(DEFAULT_REPEAT).max(1) as u32;

        let variants = match config.get_array("variants") {
            Ok(names) => names
                .into_iter()
                .map(|name| name.into_string()?.parse::<Variant>())
                .collect::<Result<Vec<_>>>()?,
            Err(_) => Variant::all().to_vec(),
        };

        let output = config.get_string("output").ok().map(PathBuf::from);

        Ok(Self { count, repeat, variants, output })
    }
}
