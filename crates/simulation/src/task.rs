//! The unit of work driving one propagation step.

use crate::tree::TreeNodeId;
use raintree_types::{AddressBook, Coefficients, NodeAddress};

/// One step of message delivery, consumed exactly once by the engine.
///
/// `sender == addr` marks a demotion step: the node keeps fanning out over
/// a narrower residual slice without a network hop, so no receive is
/// counted when the task is processed.
#[derive(Debug, Clone)]
pub struct PropagationTask {
    /// The node acting on this step.
    pub addr: NodeAddress,
    /// The membership view the node holds at this hop.
    pub book: AddressBook,
    /// Depth in the propagation tree; the root task sits at 0.
    pub depth: u32,
    /// Tuning coefficients, carried unchanged along every path.
    pub coefficients: Coefficients,
    /// Tree node recording this delivery.
    pub tree_node: TreeNodeId,
    /// Whoever delivered the message for this step.
    pub sender: NodeAddress,
}
