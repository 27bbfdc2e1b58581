//! Aggregator - bottom-up directory sizes

use super::config::Traversal;
use super::node::{NodeId, ScanTree};

/// Finalize every directory size under the root and return the root total.
pub fn aggregate(tree: &mut ScanTree, traversal: Traversal) -> u64 {
    let root = tree.root();
    match traversal {
        Traversal::Recursive => finalize(tree, root),
        Traversal::Iterative => finalize_iterative(tree, root),
    }
}

/// Post-order: each directory becomes the sum of its children.
/// Files return their own size unchanged.
pub fn finalize(tree: &mut ScanTree, id: NodeId) -> u64 {
    let node = tree.node(id);
    if !node.is_dir() {
        return node.size().unwrap_or(0);
    }

    let children: Vec<NodeId> = node.children().collect();
    let total: u64 = children.into_iter().map(|child| finalize(tree, child)).sum();
    tree.set_directory_size(id, total);
    total
}

/// Same result as [`finalize`] using an explicit stack.
pub fn finalize_iterative(tree: &mut ScanTree, id: NodeId) -> u64 {
    // (node, children already pushed)
    let mut stack = vec![(id, false)];

    while let Some((current, expanded)) = stack.pop() {
        let node = tree.node(current);
        if !node.is_dir() {
            continue;
        }
        if expanded {
            let total: u64 = node
                .children()
                .map(|child| tree.node(child).size().unwrap_or(0))
                .sum();
            tree.set_directory_size(current, total);
        } else {
            stack.push((current, true));
            stack.extend(node.children().map(|child| (child, false)));
        }
    }

    tree.node(id).size().unwrap_or(0)
}
