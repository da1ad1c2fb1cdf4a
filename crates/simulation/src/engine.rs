//! The per-task fan-out rule.
//!
//! Each processed task performs at most two sends (to positions a fixed
//! fraction of its current view away) and one self-demotion (re-enqueueing
//! itself over the residual slice it alone stays responsible for). All
//! follow-up work lands on the shared FIFO queue; nothing recurses.

use crate::collector::StatisticsCollector;
use crate::task::PropagationTask;
use crate::tree::PropagationTree;
use raintree_types::NodeAddress;
use std::collections::VecDeque;
use tracing::trace;

/// Applies the fan-out rule for one task and enqueues the follow-up work.
///
/// Processing never fails. A task with an empty view is a no-op, ending
/// that branch before any counter moves.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DisseminationEngine {
    /// Keep propagating after coverage is complete and the ternary depth
    /// bound has been hit. Rendering aid: the tree then shows the full
    /// structure instead of stopping at the bound. Off for measurement.
    pub full_propagation: bool,
}

impl DisseminationEngine {
    pub(crate) fn process(
        &self,
        task: PropagationTask,
        stats: &mut StatisticsCollector,
        tree: &mut PropagationTree,
        queue: &mut VecDeque<PropagationTask>,
    ) {
        if task.book.is_empty() {
            return;
        }

        // A genuine delivery; demotion tasks carry sender == addr.
        if task.addr != task.sender {
            stats.record_receive(&task.addr);
        }

        // Once every member is covered, record the depth and end the branch
        // at the ternary depth bound.
        if stats.coverage_complete() {
            stats.record_completion(task.depth);
            if !self.full_propagation && stats.past_depth_bound(task.depth) {
                return;
            }
        }

        stats.mark_reached(&task.addr);

        let n = task.book.len();
        let Some(i) = task.book.position(&task.addr) else {
            // A node only ever acts on views carrying itself; a foreign
            // view ends the branch.
            return;
        };

        let c = task.coefficients;
        let target1_idx = (i + span(n, c.t1())) % n;
        let target2_idx = (i + span(n, c.t2())) % n;
        let shrink_idx = (i + span(n, c.shrink())) % n;

        let mut target1 = task.book.get(target1_idx);
        let mut target2 = task.book.get(target2_idx);
        // One send per peer per hop; a send is never self-addressed.
        if target1 == target2 {
            target2 = None;
        }
        if target1 == Some(&task.addr) {
            target1 = None;
        }

        for (target, target_idx) in [(target1, target1_idx), (target2, target2_idx)] {
            let Some(target) = target else { continue };
            self.send(target, target_idx, &task, n, stats, tree, queue);
        }

        // Demotion: the node keeps covering a narrower slice of its own
        // view. Not a send, so no send counter moves.
        let residual = task.book.shrink(i, shrink_idx);
        if residual.len() > 1 {
            let tree_node = tree.add_child(task.tree_node, task.addr.clone());
            queue.push_back(PropagationTask {
                addr: task.addr.clone(),
                book: residual,
                depth: task.depth + 1,
                coefficients: c,
                tree_node,
                sender: task.addr.clone(),
            });
        }
    }

    /// One network send: count it, derive the target's shrunk view, and
    /// enqueue the target's task.
    fn send(
        &self,
        target: &NodeAddress,
        target_idx: usize,
        task: &PropagationTask,
        n: usize,
        stats: &mut StatisticsCollector,
        tree: &mut PropagationTree,
        queue: &mut VecDeque<PropagationTask>,
    ) {
        stats.record_send(&task.addr);

        let target_shrink_idx = (target_idx + span(n, task.coefficients.shrink())) % n;
        let view = task.book.shrink(target_idx, target_shrink_idx);

        // Delivery is lossless here, so the target counts as reached the
        // moment the send is recorded; sibling tasks already in flight may
        // also address it.
        stats.mark_reached(target);

        let tree_node = tree.add_child(task.tree_node, target.clone());
        trace!(from = %task.addr, to = %target, depth = task.depth, view = view.len(), "send");
        queue.push_back(PropagationTask {
            addr: target.clone(),
            book: view,
            depth: task.depth + 1,
            coefficients: task.coefficients,
            tree_node,
            sender: task.addr.clone(),
        });
    }
}

/// Truncating fractional span across a view of `n` entries.
fn span(n: usize, coefficient: f64) -> usize {
    (n as f64 * coefficient) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use raintree_types::{AddressBook, Coefficients};

    fn setup(n: usize) -> (StatisticsCollector, PropagationTree, VecDeque<PropagationTask>) {
        let membership = AddressBook::numbered(n);
        let stats = StatisticsCollector::new(&membership);
        let tree = PropagationTree::with_root(NodeAddress::from("val_1"));
        (stats, tree, VecDeque::new())
    }

    fn root_task(n: usize, coefficients: Coefficients, tree: &PropagationTree) -> PropagationTask {
        PropagationTask {
            addr: NodeAddress::from("val_1"),
            book: AddressBook::numbered(n),
            depth: 0,
            coefficients,
            tree_node: tree.root(),
            sender: NodeAddress::from("val_1"),
        }
    }

    #[test]
    fn test_empty_view_is_a_noop() {
        let (mut stats, mut tree, mut queue) = setup(3);
        let task = PropagationTask {
            addr: NodeAddress::from("val_1"),
            book: AddressBook::new([]),
            depth: 1,
            coefficients: Coefficients::ternary(),
            tree_node: tree.root(),
            sender: NodeAddress::from("val_2"),
        };

        DisseminationEngine::default().process(task, &mut stats, &mut tree, &mut queue);

        // Nothing counted, nothing enqueued: not even the receive.
        assert_eq!(stats.messages_sent(), 0);
        assert_eq!(stats.received_count(&NodeAddress::from("val_1")), 0);
        assert!(queue.is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_self_target_is_dropped() {
        // n=2 with t1 small: target1 lands on the acting node itself and is
        // suppressed, so only target2 produces a send.
        let (mut stats, mut tree, mut queue) = setup(2);
        let coefficients = Coefficients::new(0.3, 0.9, 0.9).unwrap();
        let task = root_task(2, coefficients, &tree);

        DisseminationEngine::default().process(task, &mut stats, &mut tree, &mut queue);

        assert_eq!(stats.messages_sent(), 1);
        assert_eq!(stats.sent_count(&NodeAddress::from("val_1")), 1);
        let sent_to = queue.front().map(|t| t.addr.clone());
        assert_eq!(sent_to, Some(NodeAddress::from("val_2")));
    }

    #[test]
    fn test_duplicate_target_sends_once() {
        // n=3 with t1 and t2 resolving to the same index: the second send
        // is suppressed and messages_sent grows by exactly one.
        let (mut stats, mut tree, mut queue) = setup(3);
        let coefficients = Coefficients::new(0.34, 0.5, 0.9).unwrap();
        let task = root_task(3, coefficients, &tree);

        DisseminationEngine::default().process(task, &mut stats, &mut tree, &mut queue);

        assert_eq!(stats.messages_sent(), 1);
        assert_eq!(stats.sent_count(&NodeAddress::from("val_1")), 1);
    }

    #[test]
    fn test_demotion_enqueues_without_counting() {
        // Ternary coefficients over n=9: two sends plus one demotion.
        let (mut stats, mut tree, mut queue) = setup(9);
        let task = root_task(9, Coefficients::ternary(), &tree);

        DisseminationEngine::default().process(task, &mut stats, &mut tree, &mut queue);

        assert_eq!(stats.messages_sent(), 2);
        assert_eq!(queue.len(), 3);
        let demoted = queue.back().unwrap();
        assert_eq!(demoted.addr, NodeAddress::from("val_1"));
        assert_eq!(demoted.sender, demoted.addr);
        assert_eq!(demoted.depth, 1);
        assert_eq!(demoted.book.len(), 6);
    }

    #[test]
    fn test_fanout_targets_and_views() {
        // n=9, thirds: val_1 at index 0 sends to indices 3 and 6, and each
        // recipient's view starts at its own position.
        let (mut stats, mut tree, mut queue) = setup(9);
        let task = root_task(9, Coefficients::ternary(), &tree);

        DisseminationEngine::default().process(task, &mut stats, &mut tree, &mut queue);

        let first = &queue[0];
        assert_eq!(first.addr, NodeAddress::from("val_4"));
        assert_eq!(first.sender, NodeAddress::from("val_1"));
        assert_eq!(first.book.get(0), Some(&NodeAddress::from("val_4")));
        assert_eq!(first.book.len(), 6);

        let second = &queue[1];
        assert_eq!(second.addr, NodeAddress::from("val_7"));
        assert_eq!(second.book.get(0), Some(&NodeAddress::from("val_7")));
        assert_eq!(second.book.len(), 6);

        // Both recipients were optimistically marked reached.
        assert!(stats.nodes_reached().contains(&NodeAddress::from("val_4")));
        assert!(stats.nodes_reached().contains(&NodeAddress::from("val_7")));
    }

    #[test]
    fn test_early_termination_past_depth_bound() {
        // Coverage already complete and depth at the bound: the task only
        // records its completion depth (after counting the delivery).
        let (mut stats, mut tree, mut queue) = setup(9);
        for addr in AddressBook::numbered(9).iter() {
            stats.mark_reached(addr);
        }
        let task = PropagationTask {
            addr: NodeAddress::from("val_4"),
            book: AddressBook::numbered(9),
            depth: 2,
            coefficients: Coefficients::ternary(),
            tree_node: tree.root(),
            sender: NodeAddress::from("val_1"),
        };

        DisseminationEngine::default().process(task, &mut stats, &mut tree, &mut queue);

        assert_eq!(stats.received_count(&NodeAddress::from("val_4")), 1);
        assert_eq!(stats.depth_completion().get(&2), Some(&1));
        assert!(queue.is_empty());
        assert_eq!(stats.messages_sent(), 0);
    }

    #[test]
    fn test_full_propagation_continues_past_bound() {
        let (mut stats, mut tree, mut queue) = setup(9);
        for addr in AddressBook::numbered(9).iter() {
            stats.mark_reached(addr);
        }
        let task = PropagationTask {
            addr: NodeAddress::from("val_4"),
            book: AddressBook::numbered(9),
            depth: 2,
            coefficients: Coefficients::ternary(),
            tree_node: tree.root(),
            sender: NodeAddress::from("val_1"),
        };

        let engine = DisseminationEngine {
            full_propagation: true,
        };
        engine.process(task, &mut stats, &mut tree, &mut queue);

        // The depth is still recorded, but the branch keeps fanning out.
        assert_eq!(stats.depth_completion().get(&2), Some(&1));
        assert!(!queue.is_empty());
    }
}
