//! RainTree simulator CLI.
//!
//! Evaluate message cost, depth, and load fairness of a RainTree broadcast
//! for a given membership size and coefficient set.
//!
//! # Example
//!
//! ```bash
//! # Single deterministic run over 27 nodes with the thirds coefficients
//! raintree-sim --nodes 27 --print-tree
//!
//! # Average 100 runs with a fresh seeded originator per run
//! raintree-sim --nodes 81 --runs 100 --random-origin --seed 42
//!
//! # Regenerate the expected-call fixtures for the network test suite
//! raintree-sim --nodes 9 --expected-calls expected_calls_9.txt
//! ```

use clap::Parser;
use raintree_simulation::SimulationRunner;
use raintree_simulator::{
    render_tree, write_expected_calls, Evaluator, OriginSelection, SimulatorConfig,
};
use raintree_types::{AddressBook, Coefficients, NodeAddress, ParameterError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// RainTree broadcast simulator.
///
/// Single-threaded and fully deterministic: identical arguments (and seed,
/// when the originator is randomized) reproduce identical reports.
#[derive(Parser, Debug)]
#[command(name = "raintree-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of nodes in the membership set (addresses val_1 .. val_n)
    #[arg(short = 'n', long, default_value = "27")]
    nodes: usize,

    /// Number of runs to average
    #[arg(short = 'r', long, default_value = "1")]
    runs: u32,

    /// First fan-out target coefficient, in (0, 1)
    #[arg(long, default_value_t = 1.0 / 3.0)]
    t1: f64,

    /// Second fan-out target coefficient, in (0, 1)
    #[arg(long, default_value_t = 2.0 / 3.0)]
    t2: f64,

    /// Address-book shrink coefficient, in (0, 1)
    #[arg(long, default_value_t = 2.0 / 3.0)]
    shrink: f64,

    /// Originating node address. Defaults to the first member.
    #[arg(long)]
    origin: Option<String>,

    /// Draw a fresh originator per run instead of a fixed one
    #[arg(long)]
    random_origin: bool,

    /// Seed for the randomized-originator mode
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Render the propagation tree of a single run
    #[arg(long)]
    print_tree: bool,

    /// Propagate past the theoretical depth bound (complete trees)
    #[arg(long)]
    full_propagation: bool,

    /// Write a single run's expected-call table to this file
    #[arg(long, value_name = "PATH")]
    expected_calls: Option<PathBuf>,

    /// Write the evaluation report as JSON to this file
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,raintree_simulator=info")),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let coefficients = Coefficients::new(args.t1, args.t2, args.shrink)?;
    let membership = AddressBook::numbered(args.nodes);
    let origin = match &args.origin {
        Some(addr) => NodeAddress::from(addr.as_str()),
        None => membership
            .get(0)
            .cloned()
            .ok_or(ParameterError::EmptyMembership)?,
    };

    info!(
        nodes = args.nodes,
        runs = args.runs,
        seed = args.seed,
        random_origin = args.random_origin,
        "starting evaluation"
    );

    let mut config = SimulatorConfig::new(membership.clone(), coefficients)
        .with_num_runs(args.runs)
        .with_origin(OriginSelection::Fixed(origin.clone()))
        .with_seed(args.seed)
        .with_full_propagation(args.full_propagation);
    if args.random_origin {
        config = config.with_random_origin();
    }

    let report = Evaluator::new(config)?.evaluate()?;
    report.print_summary();

    if args.print_tree || args.expected_calls.is_some() {
        let outcome = SimulationRunner::new(membership.clone(), origin, coefficients)?
            .with_full_propagation(args.full_propagation)
            .run();

        if args.print_tree {
            println!("\n{}", render_tree(&outcome.tree));
        }
        if let Some(path) = &args.expected_calls {
            write_expected_calls(path, &membership, &outcome.stats)?;
            info!(path = %path.display(), "expected-call table written");
        }
    }

    if let Some(path) = &args.json {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}
