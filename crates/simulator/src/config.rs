//! Configuration types for the batch simulator.

use raintree_types::{AddressBook, Coefficients, NodeAddress};

/// How the evaluator picks each run's originator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginSelection {
    /// Every run starts from the same node.
    Fixed(NodeAddress),
    /// Each run draws an originator from the membership with the seeded
    /// RNG, so batches stay reproducible per seed.
    Random,
}

/// Configuration for a batch of simulation runs.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// The full membership every run must reach.
    pub membership: AddressBook,

    /// Tuning coefficients, identical across runs.
    pub coefficients: Coefficients,

    /// Number of runs to aggregate.
    pub num_runs: u32,

    /// Originator policy.
    pub origin: OriginSelection,

    /// Seed for the randomized-originator mode. Ignored for fixed origins.
    pub seed: u64,

    /// Propagate past the ternary depth bound (rendering aid).
    pub full_propagation: bool,
}

impl SimulatorConfig {
    /// Create a configuration with a single run from the first member.
    pub fn new(membership: AddressBook, coefficients: Coefficients) -> Self {
        let origin = match membership.get(0) {
            Some(first) => OriginSelection::Fixed(first.clone()),
            None => OriginSelection::Random,
        };
        Self {
            membership,
            coefficients,
            num_runs: 1,
            origin,
            seed: 12345,
            full_propagation: false,
        }
    }

    /// Set the number of runs to aggregate.
    pub fn with_num_runs(mut self, num_runs: u32) -> Self {
        self.num_runs = num_runs;
        self
    }

    /// Set the originator policy.
    pub fn with_origin(mut self, origin: OriginSelection) -> Self {
        self.origin = origin;
        self
    }

    /// Draw a fresh originator per run.
    pub fn with_random_origin(self) -> Self {
        self.with_origin(OriginSelection::Random)
    }

    /// Set the seed for the randomized-originator mode.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Propagate past the ternary depth bound.
    pub fn with_full_propagation(mut self, on: bool) -> Self {
        self.full_propagation = on;
        self
    }
}
