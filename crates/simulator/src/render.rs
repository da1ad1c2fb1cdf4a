//! ASCII rendering of a propagation tree.

use raintree_simulation::{PropagationTree, TreeNodeId};

/// Render the tree with the root at the top, one node per line.
///
/// Demotion branches show up as a child carrying its parent's address, so
/// the rendered tree mirrors exactly what the engine enqueued.
pub fn render_tree(tree: &PropagationTree) -> String {
    let mut out = String::new();
    out.push_str(tree.addr(tree.root()).as_str());
    out.push('\n');
    render_children(tree, tree.root(), "", &mut out);
    out
}

fn render_children(tree: &PropagationTree, node: TreeNodeId, prefix: &str, out: &mut String) {
    let children = tree.children(node);
    for (idx, &child) in children.iter().enumerate() {
        let last = idx + 1 == children.len();
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(tree.addr(child).as_str());
        out.push('\n');
        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_children(tree, child, &child_prefix, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raintree_simulation::{PropagationTree, SimulationRunner};
    use raintree_types::{AddressBook, Coefficients, NodeAddress};

    #[test]
    fn test_render_single_node() {
        let tree = PropagationTree::with_root(NodeAddress::from("val_1"));
        assert_eq!(render_tree(&tree), "val_1\n");
    }

    #[test]
    fn test_render_branches() {
        let mut tree = PropagationTree::with_root(NodeAddress::from("val_1"));
        let root = tree.root();
        let left = tree.add_child(root, NodeAddress::from("val_4"));
        tree.add_child(root, NodeAddress::from("val_7"));
        tree.add_child(left, NodeAddress::from("val_6"));

        let rendered = render_tree(&tree);
        let expected = "\
val_1
├── val_4
│   └── val_6
└── val_7
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_rendered_run_contains_every_reached_node() {
        let outcome = SimulationRunner::new(
            AddressBook::numbered(9),
            NodeAddress::from("val_1"),
            Coefficients::ternary(),
        )
        .expect("valid parameters")
        .run();

        let rendered = render_tree(&outcome.tree);
        for member in AddressBook::numbered(9).iter() {
            assert!(rendered.contains(member.as_str()), "{member} missing");
        }
    }
}
