//! Deterministic RainTree propagation engine.
//!
//! One simulation run disseminates a message from an originating node to
//! every node in a fixed membership set. Processing is a single-threaded,
//! strictly FIFO drain of an explicit task queue, so identical parameters
//! replay identically.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   SimulationRunner                      │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │    Task queue (VecDeque<PropagationTask>)          │ │
//! │  │    Breadth-first: stable insertion order per depth │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │    Dissemination engine: two fan-out sends plus    │ │
//! │  │    one self-demotion over a shrinking view         │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │    StatisticsCollector + PropagationTree           │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod collector;
mod engine;
mod runner;
mod task;
mod tree;

pub use collector::StatisticsCollector;
pub use runner::{SimulationOutcome, SimulationRunner};
pub use task::PropagationTask;
pub use tree::{PropagationTree, TreeNodeId};
