//! Per-run statistics, shared by every processed task.

use indexmap::IndexMap;
use raintree_types::{AddressBook, NodeAddress};
use std::collections::{BTreeMap, BTreeSet};

/// Counters for a single simulation run.
///
/// One collector exists per run and is threaded mutably through every task
/// the engine processes. `nodes_reached` only grows and `nodes_missing`
/// only shrinks; their union is the full membership set at all times. The
/// per-node maps are pre-populated with zeroes for the whole membership, in
/// membership order, so lookups never miss and iteration order is stable.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsCollector {
    messages_sent: u64,
    nodes_reached: BTreeSet<NodeAddress>,
    nodes_missing: BTreeSet<NodeAddress>,
    msgs_received_by: IndexMap<NodeAddress, u64>,
    msgs_sent_by: IndexMap<NodeAddress, u64>,
    depth_completion: BTreeMap<u32, u64>,
    max_theoretical_depth: f64,
}

impl StatisticsCollector {
    /// Fresh counters for a run over `membership`.
    pub fn new(membership: &AddressBook) -> Self {
        let zeroed: IndexMap<NodeAddress, u64> =
            membership.iter().cloned().map(|addr| (addr, 0)).collect();
        Self {
            messages_sent: 0,
            nodes_reached: BTreeSet::new(),
            nodes_missing: membership.iter().cloned().collect(),
            msgs_received_by: zeroed.clone(),
            msgs_sent_by: zeroed,
            depth_completion: BTreeMap::new(),
            max_theoretical_depth: (membership.len() as f64).log(3.0),
        }
    }

    /// Count a genuine network delivery to `addr`.
    pub(crate) fn record_receive(&mut self, addr: &NodeAddress) {
        if let Some(count) = self.msgs_received_by.get_mut(addr) {
            *count += 1;
        }
    }

    /// Count one send performed by `from`.
    pub(crate) fn record_send(&mut self, from: &NodeAddress) {
        self.messages_sent += 1;
        if let Some(count) = self.msgs_sent_by.get_mut(from) {
            *count += 1;
        }
    }

    /// Move `addr` from missing to reached.
    pub(crate) fn mark_reached(&mut self, addr: &NodeAddress) {
        self.nodes_missing.remove(addr);
        self.nodes_reached.insert(addr.clone());
    }

    /// Count a task processed at `depth` after coverage was complete.
    pub(crate) fn record_completion(&mut self, depth: u32) {
        *self.depth_completion.entry(depth).or_insert(0) += 1;
    }

    /// Whether every member has been reached.
    pub fn coverage_complete(&self) -> bool {
        self.nodes_missing.is_empty()
    }

    /// Whether `depth` has reached the ternary depth bound.
    pub fn past_depth_bound(&self, depth: u32) -> bool {
        f64::from(depth) >= self.max_theoretical_depth
    }

    /// Total sends across the run.
    pub fn messages_sent(&self) -> u64 {
        self.messages_sent
    }

    /// Members reached so far.
    pub fn nodes_reached(&self) -> &BTreeSet<NodeAddress> {
        &self.nodes_reached
    }

    /// Members not yet reached.
    pub fn nodes_missing(&self) -> &BTreeSet<NodeAddress> {
        &self.nodes_missing
    }

    /// Per-node genuine deliveries, in membership order.
    pub fn msgs_received_by(&self) -> &IndexMap<NodeAddress, u64> {
        &self.msgs_received_by
    }

    /// Per-node sends, in membership order.
    pub fn msgs_sent_by(&self) -> &IndexMap<NodeAddress, u64> {
        &self.msgs_sent_by
    }

    /// Deliveries counted for one node.
    pub fn received_count(&self, addr: &NodeAddress) -> u64 {
        self.msgs_received_by.get(addr).copied().unwrap_or(0)
    }

    /// Sends counted for one node.
    pub fn sent_count(&self, addr: &NodeAddress) -> u64 {
        self.msgs_sent_by.get(addr).copied().unwrap_or(0)
    }

    /// How many tasks completed at each depth after full coverage.
    pub fn depth_completion(&self) -> &BTreeMap<u32, u64> {
        &self.depth_completion
    }

    /// `log_3` of the membership size: the expected hop count for full
    /// coverage under ternary branching.
    pub fn max_theoretical_depth(&self) -> f64 {
        self.max_theoretical_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_collector_state() {
        let membership = AddressBook::numbered(9);
        let stats = StatisticsCollector::new(&membership);

        assert_eq!(stats.messages_sent(), 0);
        assert!(stats.nodes_reached().is_empty());
        assert_eq!(stats.nodes_missing().len(), 9);
        assert!(!stats.coverage_complete());
        assert!((stats.max_theoretical_depth() - 2.0).abs() < 1e-9);
        // Pre-populated, zeroed, in membership order.
        assert_eq!(stats.msgs_received_by().len(), 9);
        assert!(stats.msgs_received_by().values().all(|&c| c == 0));
        let first = stats.msgs_sent_by().keys().next().map(NodeAddress::as_str);
        assert_eq!(first, Some("val_1"));
    }

    #[test]
    fn test_reached_and_missing_partition_membership() {
        let membership = AddressBook::numbered(3);
        let mut stats = StatisticsCollector::new(&membership);

        stats.mark_reached(&NodeAddress::from("val_2"));
        assert_eq!(stats.nodes_reached().len(), 1);
        assert_eq!(stats.nodes_missing().len(), 2);
        assert!(!stats.nodes_missing().contains(&NodeAddress::from("val_2")));

        // Re-marking is idempotent.
        stats.mark_reached(&NodeAddress::from("val_2"));
        assert_eq!(stats.nodes_reached().len(), 1);
        assert_eq!(stats.nodes_missing().len(), 2);
    }

    #[test]
    fn test_depth_bound_is_ternary_log() {
        let stats = StatisticsCollector::new(&AddressBook::numbered(27));
        assert!((stats.max_theoretical_depth() - 3.0).abs() < 1e-9);
        assert!(!stats.past_depth_bound(2));
        assert!(stats.past_depth_bound(3));
        assert!(stats.past_depth_bound(4));

        // A single-node membership bounds at depth zero.
        let stats = StatisticsCollector::new(&AddressBook::numbered(1));
        assert!(stats.past_depth_bound(0));
    }
}
