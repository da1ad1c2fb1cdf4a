//! Load-distribution metrics.

use hdrhistogram::Histogram;
use serde::Serialize;

/// Summary of how delivery load spreads across nodes.
///
/// Fed with one value per node per run (that node's delivered-message
/// count), so a batch over a membership of `n` with `r` runs summarizes
/// `n * r` samples. A flat distribution means the broadcast shares load
/// fairly; a long tail points at hot nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadDistribution {
    /// Median deliveries per node.
    pub p50: u64,
    /// 90th percentile deliveries per node.
    pub p90: u64,
    /// 99th percentile deliveries per node.
    pub p99: u64,
    /// The heaviest-loaded node's delivery count.
    pub max: u64,
    /// Mean deliveries per node.
    pub mean: f64,
}

impl LoadDistribution {
    /// Summarize per-node delivery counts.
    pub fn from_counts(counts: impl IntoIterator<Item = u64>) -> Self {
        let mut histogram = Histogram::<u64>::new(3).expect("3 significant digits is valid");
        for count in counts {
            histogram.saturating_record(count);
        }
        Self {
            p50: histogram.value_at_quantile(0.50),
            p90: histogram.value_at_quantile(0.90),
            p99: histogram.value_at_quantile(0.99),
            max: histogram.max(),
            mean: histogram.mean(),
        }
    }
}
