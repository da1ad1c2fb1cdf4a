//! Breadth-first simulation driver.

use crate::collector::StatisticsCollector;
use crate::engine::DisseminationEngine;
use crate::task::PropagationTask;
use crate::tree::PropagationTree;
use raintree_types::{AddressBook, Coefficients, NodeAddress, ParameterError};
use std::collections::VecDeque;
use tracing::debug;

/// Drives one propagation run to completion.
///
/// The runner seeds the queue with the originator's task over the full
/// membership and pops strictly FIFO until the queue drains. Queue order is
/// the only scheduling in a run, so identical parameters replay
/// identically. Draining always terminates: demotions strictly shrink a
/// node's view and sends strictly increase depth, which the early
/// termination bounds once coverage is complete.
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    membership: AddressBook,
    originator: NodeAddress,
    coefficients: Coefficients,
    full_propagation: bool,
}

impl SimulationRunner {
    /// Validate parameters and build a runner.
    pub fn new(
        membership: AddressBook,
        originator: NodeAddress,
        coefficients: Coefficients,
    ) -> Result<Self, ParameterError> {
        if membership.is_empty() {
            return Err(ParameterError::EmptyMembership);
        }
        if !membership.contains(&originator) {
            return Err(ParameterError::UnknownOriginator(originator));
        }
        Ok(Self {
            membership,
            originator,
            coefficients,
            full_propagation: false,
        })
    }

    /// Keep propagating past the ternary depth bound once coverage is
    /// complete, so rendered trees show the full structure.
    pub fn with_full_propagation(mut self, on: bool) -> Self {
        self.full_propagation = on;
        self
    }

    /// The membership this runner covers.
    pub fn membership(&self) -> &AddressBook {
        &self.membership
    }

    /// Run the simulation to queue exhaustion.
    pub fn run(&self) -> SimulationOutcome {
        let engine = DisseminationEngine {
            full_propagation: self.full_propagation,
        };
        let mut stats = StatisticsCollector::new(&self.membership);
        let mut tree = PropagationTree::with_root(self.originator.clone());
        let mut queue = VecDeque::new();

        queue.push_back(PropagationTask {
            addr: self.originator.clone(),
            book: self.membership.clone(),
            depth: 0,
            coefficients: self.coefficients,
            tree_node: tree.root(),
            sender: self.originator.clone(),
        });

        let mut tasks_processed: u64 = 0;
        while let Some(task) = queue.pop_front() {
            engine.process(task, &mut stats, &mut tree, &mut queue);
            tasks_processed += 1;
        }

        debug!(
            nodes = self.membership.len(),
            tasks = tasks_processed,
            messages = stats.messages_sent(),
            reached = stats.nodes_reached().len(),
            "simulation drained"
        );

        SimulationOutcome { tree, stats }
    }
}

/// What one drained run leaves behind.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// The delivery tree; the root is the originator.
    pub tree: PropagationTree,
    /// The populated per-run counters.
    pub stats: StatisticsCollector,
}
