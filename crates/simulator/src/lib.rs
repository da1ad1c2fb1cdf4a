//! RainTree batch simulator.
//!
//! Builds on `raintree-simulation` to answer the tuning questions a single
//! run cannot: how many messages a broadcast costs on average, how deep the
//! tree runs, and how evenly the delivery load spreads across the
//! membership.
//!
//! - **Monte-Carlo evaluation**: repeated runs with a fixed or seeded
//!   per-run originator, averaged per node and per depth.
//! - **Load distribution**: percentile summary of per-node deliveries.
//! - **Tree rendering**: ASCII view of one run's propagation tree.
//! - **Fixture generation**: literal expected-call tables for the network
//!   test suite.
//!
//! # Example
//!
//! ```ignore
//! use raintree_simulator::{Evaluator, SimulatorConfig};
//! use raintree_types::{AddressBook, Coefficients};
//!
//! let config = SimulatorConfig::new(AddressBook::numbered(27), Coefficients::ternary())
//!     .with_num_runs(100)
//!     .with_random_origin()
//!     .with_seed(42);
//!
//! let report = Evaluator::new(config)?.evaluate()?;
//! report.print_summary();
//! ```

pub mod config;
pub mod evaluate;
pub mod fixtures;
pub mod metrics;
pub mod render;

pub use config::{OriginSelection, SimulatorConfig};
pub use evaluate::{EvaluationReport, Evaluator};
pub use fixtures::{expected_call_table, write_expected_calls};
pub use metrics::LoadDistribution;
pub use render::render_tree;
