//! Parameter validation errors.

use crate::NodeAddress;

/// Rejected simulation parameters.
///
/// The propagation engine itself never fails: degenerate interior state
/// (an empty view) ends a branch silently. Validation happens once, up
/// front, when a runner or evaluator is built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// The membership set has no nodes.
    #[error("membership set must contain at least one node")]
    EmptyMembership,

    /// A coefficient falls outside the open interval (0, 1).
    #[error("coefficient {name} must lie in (0, 1), got {value}")]
    CoefficientOutOfRange {
        /// Which coefficient was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The originator is not part of the membership set.
    #[error("originator {0} is not in the membership set")]
    UnknownOriginator(NodeAddress),

    /// A batch was configured with zero runs.
    #[error("number of runs must be at least one")]
    NoRuns,
}
