//! 'main' for the chanbench runner

use anyhow::Result;
use chanbench_harness::config::get_sub_config;
use chanbench_harness::HarnessConfig;
use config::{Config, Environment, File};
use tracing::info;

mod results;
use results::{measure, summarise, write_report};

mod settings;
use settings::Settings;

/// Standard main
#[tokio::main]
pub async fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::fmt::init();

    info!("chanbench - channel envelope benchmarks");

    // Read the config
    let config = Config::builder()
        .add_source(File::with_name("chanbench").required(false))
        .add_source(
            Environment::with_prefix("CHANBENCH")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("variants"),
        )
        .build()?;

    let settings = Settings::from_config(&config)?;
    let harness = HarnessConfig::from_config(&get_sub_config(&config, "harness"))?;

    info!(" - {} messages per run, best of {}", settings.count, settings.repeat);
    info!(
        " - queue capacity {}, tick period {:?}, payload length {}",
        harness.chan_buf, harness.tick_period, harness.payload_len
    );

    let mut results = Vec::with_capacity(settings.variants.len());
    for variant in &settings.variants {
        let result = measure(*variant, settings.count, settings.repeat, &harness).await?;
        result.log();
        results.push(result);
    }

    summarise(&mut results);

    if let Some(output) = &settings.output {
        write_report(output, &results).await?;
    }

    // Bye!
    info!("Exiting");
    Ok(())
}
