//! Monte-Carlo evaluation over repeated simulation runs.

use crate::config::{OriginSelection, SimulatorConfig};
use crate::metrics::LoadDistribution;
use indexmap::IndexMap;
use raintree_simulation::SimulationRunner;
use raintree_types::{Coefficients, NodeAddress, ParameterError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Runs a batch of simulations and averages the counters.
///
/// Runs execute sequentially; each one owns a fresh collector and queue, so
/// nothing leaks between runs. With a fixed originator every run is
/// identical and the averages collapse to the single-run values; with the
/// randomized originator the batch is still reproducible per seed.
pub struct Evaluator {
    config: SimulatorConfig,
}

impl Evaluator {
    /// Validate the configuration and build an evaluator.
    pub fn new(config: SimulatorConfig) -> Result<Self, ParameterError> {
        if config.membership.is_empty() {
            return Err(ParameterError::EmptyMembership);
        }
        if config.num_runs == 0 {
            return Err(ParameterError::NoRuns);
        }
        if let OriginSelection::Fixed(origin) = &config.origin {
            if !config.membership.contains(origin) {
                return Err(ParameterError::UnknownOriginator(origin.clone()));
            }
        }
        Ok(Self { config })
    }

    /// Run the batch and aggregate the results.
    pub fn evaluate(&self) -> Result<EvaluationReport, ParameterError> {
        let cfg = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);

        let mut total_messages: u64 = 0;
        let mut depth_acc: BTreeMap<u32, u64> = BTreeMap::new();
        let mut received_acc: IndexMap<NodeAddress, u64> =
            cfg.membership.iter().cloned().map(|addr| (addr, 0)).collect();
        let mut load_samples: Vec<u64> = Vec::new();

        for run in 0..cfg.num_runs {
            let originator = match &cfg.origin {
                OriginSelection::Fixed(addr) => addr.clone(),
                OriginSelection::Random => {
                    let idx = rng.gen_range(0..cfg.membership.len());
                    cfg.membership
                        .get(idx)
                        .expect("index drawn within bounds")
                        .clone()
                }
            };

            let outcome = SimulationRunner::new(
                cfg.membership.clone(),
                originator,
                cfg.coefficients,
            )?
            .with_full_propagation(cfg.full_propagation)
            .run();

            total_messages += outcome.stats.messages_sent();
            for (depth, count) in outcome.stats.depth_completion() {
                *depth_acc.entry(*depth).or_insert(0) += count;
            }
            for (addr, count) in outcome.stats.msgs_received_by() {
                if let Some(acc) = received_acc.get_mut(addr) {
                    *acc += count;
                }
                load_samples.push(*count);
            }

            debug!(run, messages = outcome.stats.messages_sent(), "run drained");
        }

        let divisor = f64::from(cfg.num_runs);
        let avg_depth_completion = depth_acc
            .into_iter()
            .map(|(depth, count)| (depth, round3(count as f64 / divisor)))
            .collect();

        let mut avg_msgs_received: Vec<(NodeAddress, f64)> = received_acc
            .into_iter()
            .map(|(addr, count)| (addr, round3(count as f64 / divisor)))
            .collect();
        // Descending by average; the stable sort keeps membership order for
        // ties, so reports replay byte-identically.
        avg_msgs_received.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(EvaluationReport {
            num_nodes: cfg.membership.len(),
            num_runs: cfg.num_runs,
            coefficients: cfg.coefficients,
            avg_messages_sent: total_messages as f64 / divisor,
            avg_depth_completion,
            avg_msgs_received,
            load: LoadDistribution::from_counts(load_samples),
        })
    }
}

/// Aggregated results of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// Membership size.
    pub num_nodes: usize,
    /// Number of runs aggregated.
    pub num_runs: u32,
    /// The coefficients the batch ran with.
    pub coefficients: Coefficients,
    /// Average messages sent per run.
    pub avg_messages_sent: f64,
    /// Average completion count per depth, rounded to 3 decimals.
    pub avg_depth_completion: BTreeMap<u32, f64>,
    /// Average deliveries per node, rounded to 3 decimals, sorted
    /// descending by value.
    pub avg_msgs_received: Vec<(NodeAddress, f64)>,
    /// Distribution of per-node delivery load across all runs.
    pub load: LoadDistribution,
}

impl EvaluationReport {
    /// Print a human-readable summary.
    pub fn print_summary(&self) {
        println!("\n=== RainTree Evaluation ===");
        println!("Nodes: {}   Runs: {}", self.num_nodes, self.num_runs);
        println!(
            "Coefficients: t1={:.3} t2={:.3} shrink={:.3}",
            self.coefficients.t1(),
            self.coefficients.t2(),
            self.coefficients.shrink()
        );
        println!("Avg messages sent: {:.3}", self.avg_messages_sent);

        println!("Depth completion (avg per depth):");
        for (depth, avg) in &self.avg_depth_completion {
            println!("  depth {depth}: {avg:.3}");
        }

        println!("Messages received (avg, descending):");
        for (addr, avg) in self.avg_msgs_received.iter().take(10) {
            println!("  {addr}: {avg:.3}");
        }
        if self.avg_msgs_received.len() > 10 {
            println!("  ... and {} more nodes", self.avg_msgs_received.len() - 10);
        }

        println!(
            "Delivery load: p50={} p90={} p99={} max={} mean={:.3}",
            self.load.p50, self.load.p90, self.load.p99, self.load.max, self.load.mean
        );
    }
}

/// Round to 3 decimal places, the precision the reports are pinned at.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
