//! The benchmark variants: envelope shape crossed with ticker presence
use crate::config::{HarnessConfig, COMPLETION_BUF};
use crate::consumer::{consume, consume_split, consume_split_with_ticks, consume_with_ticks};
use crate::envelope::Envelope;
use crate::messages::{ChanMeta2Msg, ChanMetaMsg, ChanMsg, Payload};
use crate::producer::{produce, produce_split};
use crate::report::RunReport;
use crate::ticker::Ticker;
use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Chan1,
    Chan1a,
    Chan2,
    Chan2a,
    Chan3,
    Chan3a,
    Chan4,
    Chan4a,
}

impl Variant {
    const ALL: [Variant; 8] = [
        Variant::Chan1,
        Variant::Chan1a,
        Variant::Chan2,
        Variant::Chan2a,
        Variant::Chan3,
        Variant::Chan3a,
        Variant::Chan4,
        Variant::Chan4a,
    ];

    pub fn all() -> &'static [Variant] {
        &Self::ALL
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Chan1 => "chan1",
            Variant::Chan1a => "chan1a",
            Variant::Chan2 => "chan2",
            Variant::Chan2a => "chan2a",
            Variant::Chan3 => "chan3",
            Variant::Chan3a => "chan3a",
            Variant::Chan4 => "chan4",
            Variant::Chan4a => "chan4a",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Variant::Chan1 => "single channel, error as a plain field",
            Variant::Chan1a => "single channel, error as a plain field, plus ticker",
            Variant::Chan2 => "separate data and completion channels",
            Variant::Chan2a => "separate data and completion channels, plus ticker",
            Variant::Chan3 => "single channel, error in embedded metadata",
            Variant::Chan3a => "single channel, error in embedded metadata, plus ticker",
            Variant::Chan4 => "single channel, error in optional boxed metadata",
            Variant::Chan4a => "single channel, error in optional boxed metadata, plus ticker",
        }
    }

    /// Whether a ticker is multiplexed with the data queue
    pub fn has_ticker(&self) -> bool {
        matches!(
            self,
            Variant::Chan1a | Variant::Chan2a | Variant::Chan3a | Variant::Chan4a
        )
    }

    /// One full run: spawn the consumer, send `count` messages from this
    /// task, close, and wait for the consumer to finish
    pub async fn run(&self, count: u64, config: &HarnessConfig) -> Result<RunReport> {
        debug!("Running {} with {count} messages", self.name());

        let ticked = self.has_ticker();
        let report = match self {
            Variant::Chan1 | Variant::Chan1a => run_single::<ChanMsg>(count, config, ticked).await?,
            Variant::Chan2 | Variant::Chan2a => run_split(count, config, ticked).await?,
            Variant::Chan3 | Variant::Chan3a => run_single::<ChanMetaMsg>(count, config, ticked).await?,
            Variant::Chan4 | Variant::Chan4a => run_single::<ChanMeta2Msg>(count, config, ticked).await?,
        };

        debug!("{} done: {} messages, {} ticks", self.name(), report.messages, report.ticks);
        Ok(report)
    }
}

async fn run_single<E: Envelope>(count: u64, config: &HarnessConfig, ticked: bool) -> Result<RunReport> {
    let (sender, receiver) = mpsc::channel::<E>(config.chan_buf);

    let (ticker, consumer) = if ticked {
        let (ticker, ticks) = Ticker::start(config.tick_period);
        (Some(ticker), tokio::spawn(consume_with_ticks(receiver, ticks)))
    } else {
        (None, tokio::spawn(consume(receiver)))
    };

    produce(sender, count, config.payload_len).await?;
    let report = consumer.await?;

    if let Some(ticker) = ticker {
        ticker.stop();
    }
    Ok(report)
}

async fn run_split(count: u64, config: &HarnessConfig, ticked: bool) -> Result<RunReport> {
    let (data_tx, data_rx) = mpsc::channel::<Payload>(config.chan_buf);
    let (done_tx, done_rx) = mpsc::channel::<anyhow::Error>(COMPLETION_BUF);

    let (ticker, consumer) = if ticked {
        let (ticker, ticks) = Ticker::start(config.tick_period);
        (Some(ticker), tokio::spawn(consume_split_with_ticks(data_rx, done_rx, ticks)))
    } else {
        (None, tokio::spawn(consume_split(data_rx, done_rx)))
    };

    produce_split(data_tx, done_tx, count, config.payload_len).await?;
    let report = consumer.await?;

    if let Some(ticker) = ticker {
        ticker.stop();
    }
    Ok(report)
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| anyhow!("Unknown variant '{s}'"))
    }
}

// -- Tests --
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tracing::Level;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    fn fast_ticks() -> HarnessConfig {
        init_tracing();
        HarnessConfig {
            tick_period: Duration::from_micros(1),
            ..HarnessConfig::default()
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for variant in Variant::all() {
            assert_eq!(variant.name().parse::<Variant>().unwrap(), *variant);
        }
        assert_eq!("CHAN2A".parse::<Variant>().unwrap(), Variant::Chan2a);
        assert!("chan5".parse::<Variant>().is_err());
    }

    #[test]
    fn half_the_variants_have_a_ticker() {
        let ticked = Variant::all().iter().filter(|v| v.has_ticker()).count();
        assert_eq!(ticked, 4);
        assert!(Variant::Chan2a.has_ticker());
        assert!(!Variant::Chan2.has_ticker());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn every_variant_processes_exactly_count_messages() {
        let config = fast_ticks();
        for variant in Variant::all() {
            let report = variant.run(1000, &config).await.unwrap();
            assert_eq!(report.messages, 1000, "{variant}");
            assert_eq!(report.sum, 0, "{variant}");
            assert!(!report.stopped_on_error, "{variant}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn zero_count_run_is_empty() {
        init_tracing();
        let config = HarnessConfig::default();
        for variant in Variant::all() {
            let report = variant.run(0, &config).await.unwrap();
            assert_eq!(report.messages, 0, "{variant}");
            assert_eq!(report.sum, 0, "{variant}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn ticked_variants_match_their_plain_counterparts() {
        let config = HarnessConfig {
            payload_len: 5,
            ..fast_ticks()
        };
        let pairs = [
            (Variant::Chan1, Variant::Chan1a),
            (Variant::Chan2, Variant::Chan2a),
            (Variant::Chan3, Variant::Chan3a),
            (Variant::Chan4, Variant::Chan4a),
        ];

        for (plain, ticked) in pairs {
            let plain_report = plain.run(20_000, &config).await.unwrap();
            let ticked_report = ticked.run(20_000, &config).await.unwrap();
            assert_eq!(plain_report.sum, ticked_report.sum, "{plain} vs {ticked}");
            assert_eq!(plain_report.sum, RunReport::expected_sum(20_000, 5));
            assert_eq!(plain_report.ticks, 0);
            assert!(ticked_report.ticks > 0, "{ticked} saw no ticks");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn runs_are_independent() {
        let config = HarnessConfig {
            payload_len: 2,
            ..HarnessConfig::default()
        };
        let (a, b) = tokio::join!(Variant::Chan1.run(300, &config), Variant::Chan3.run(200, &config));
        assert_eq!(a.unwrap().sum, 300);
        assert_eq!(b.unwrap().sum, 200);
    }
}
