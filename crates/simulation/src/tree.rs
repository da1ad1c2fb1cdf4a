//! Arena-backed propagation tree.

use raintree_types::NodeAddress;

/// Index of a node in a [`PropagationTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeNodeId(usize);

#[derive(Debug, Clone)]
struct TreeNode {
    addr: NodeAddress,
    parent: Option<TreeNodeId>,
    children: Vec<TreeNodeId>,
}

/// The delivery tree built while a run drains.
///
/// Nodes live in an arena and link by index, so the tree is append-only and
/// every node except the root has exactly one parent. Demotion steps append
/// a child carrying the same address as its parent; the rendered tree shows
/// them as separate branches, one per narrower view the node worked
/// through.
#[derive(Debug, Clone)]
pub struct PropagationTree {
    nodes: Vec<TreeNode>,
}

impl PropagationTree {
    /// Create a tree holding only the originator's root node.
    pub fn with_root(addr: NodeAddress) -> Self {
        Self {
            nodes: vec![TreeNode {
                addr,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root node id.
    pub fn root(&self) -> TreeNodeId {
        TreeNodeId(0)
    }

    /// Append a child under `parent` and return its id.
    pub fn add_child(&mut self, parent: TreeNodeId, addr: NodeAddress) -> TreeNodeId {
        let id = TreeNodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            addr,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// The address recorded at a node.
    pub fn addr(&self, id: TreeNodeId) -> &NodeAddress {
        &self.nodes[id.0].addr
    }

    /// The parent of a node, `None` for the root.
    pub fn parent(&self, id: TreeNodeId) -> Option<TreeNodeId> {
        self.nodes[id.0].parent
    }

    /// Child ids of a node, in insertion order.
    pub fn children(&self, id: TreeNodeId) -> &[TreeNodeId] {
        &self.nodes[id.0].children
    }

    /// Total number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
