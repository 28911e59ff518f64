//! Timing results per variant
use anyhow::Result;
use chanbench_harness::{HarnessConfig, RunReport, Variant};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct BenchResult {
    pub variant: String,
    pub description: String,
    pub count: u64,
    pub best_ns: u128,
    pub ns_per_op: f64,
    pub rate: u64,
    pub report: RunReport,
}

impl BenchResult {
    pub fn new(variant: Variant, count: u64, best: Duration, report: RunReport) -> Self {
        let elapsed = best.as_secs_f64();
        let fcount = count as f64;
        let ns_per_op = if count > 0 { elapsed / fcount * 1e9 } else { 0.0 };
        let rate = if elapsed > 0.0 { (fcount / elapsed).round() as u64 } else { 0 };

        Self {
            variant: variant.name().to_string(),
            description: variant.description().to_string(),
            count,
            best_ns: best.as_nanos(),
            ns_per_op,
            rate,
            report,
        }
    }

    pub fn log(&self) {
        info!("{} ({})", self.variant, self.description);
        info!(" - best time: {:.3}s for {} messages", self.best_ns as f64 / 1e9, self.count);
        info!(" - {:.0} ns/op, {}/sec", self.ns_per_op, self.rate);
        info!(" - {} ticks, accumulator {}", self.report.ticks, self.report.sum);
    }
}

/// Run a variant `repeat` times and keep the fastest
pub async fn measure(variant: Variant, count: u64, repeat: u32, config: &HarnessConfig) -> Result<BenchResult> {
    let mut best = Duration::MAX;
    let mut last = RunReport::default();

    for _ in 0..repeat {
        let start = Instant::now();
        last = variant.run(count, config).await?;
        best = best.min(start.elapsed());
    }

    Ok(BenchResult::new(variant, count, best, last))
}

/// Sort fastest first and log each relative to the fastest
pub fn summarise(results: &mut [BenchResult]) {
    results.sort_by(|a, b| a.ns_per_op.total_cmp(&b.ns_per_op));

    let Some(fastest) = results.first().map(|r| r.ns_per_op) else {
        return;
    };

    info!("Summary, fastest first:");
    for result in results.iter() {
        let relative = if fastest > 0.0 { result.ns_per_op / fastest } else { 1.0 };
        info!(" {:<8} {:>10.0} ns/op  x{:.2}", result.variant, result.ns_per_op, relative);
    }
}

pub async fn write_report(path: &Path, results: &[BenchResult]) -> Result<()> {
    let serialized = serde_json::to_vec_pretty(results)?;
    fs::write(path, serialized).await?;
    info!("Report written to {}", path.display());
    Ok(())
}
