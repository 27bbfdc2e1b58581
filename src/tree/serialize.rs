//! Serializer - converts the scan tree into the ordered output form

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::config::Traversal;
use super::node::{NodeId, ScanTree, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Directory,
}

/// Output node. Files always carry `children: null` and directories
/// `extension: null`, matching the wire format consumers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskNode {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<DiskNode>>,
}

impl DiskNode {
    pub fn file(name: impl Into<String>, size: u64, extension: Option<&str>) -> Self {
        Self {
            name: name.into(),
            size,
            kind: NodeType::File,
            extension: extension.map(str::to_string),
            children: None,
        }
    }

    pub fn directory(name: impl Into<String>, size: u64, children: Vec<DiskNode>) -> Self {
        Self {
            name: name.into(),
            size,
            kind: NodeType::Directory,
            extension: None,
            children: Some(children),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeType::Directory
    }

    pub fn children(&self) -> &[DiskNode] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Sibling order: directories first, then larger sizes, then names ascending.
///
/// Names are unique within a directory, so this is a strict total order.
pub fn sibling_order(a: &DiskNode, b: &DiskNode) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| b.size.cmp(&a.size))
        .then_with(|| a.name.cmp(&b.name))
}

/// Serialize the whole tree from its root.
///
/// Directory sizes come from aggregation; run it first.
pub fn to_disk_node(tree: &ScanTree, traversal: Traversal) -> DiskNode {
    let root = tree.root();
    match traversal {
        Traversal::Recursive => serialize(tree, root),
        Traversal::Iterative => serialize_iterative(tree, root),
    }
}

pub fn serialize(tree: &ScanTree, id: NodeId) -> DiskNode {
    let node = tree.node(id);
    if !node.is_dir() {
        return file_node(node);
    }
    let children = node.children().map(|child| serialize(tree, child)).collect();
    directory_node(node, children)
}

/// Same output as [`serialize`] using an explicit stack.
pub fn serialize_iterative(tree: &ScanTree, id: NodeId) -> DiskNode {
    struct Frame {
        id: NodeId,
        pending: std::vec::IntoIter<NodeId>,
        done: Vec<DiskNode>,
    }

    impl Frame {
        fn open(tree: &ScanTree, id: NodeId) -> Self {
            let node = tree.node(id);
            Self {
                id,
                pending: node.children().collect::<Vec<_>>().into_iter(),
                done: Vec::with_capacity(node.child_count()),
            }
        }
    }

    let root = tree.node(id);
    if !root.is_dir() {
        return file_node(root);
    }

    let mut stack = vec![Frame::open(tree, id)];
    let mut finished = None;

    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.pending.next() {
            let node = tree.node(child);
            if node.is_dir() {
                stack.push(Frame::open(tree, child));
            } else {
                frame.done.push(file_node(node));
            }
            continue;
        }

        if let Some(frame) = stack.pop() {
            let node = directory_node(tree.node(frame.id), frame.done);
            match stack.last_mut() {
                Some(parent) => parent.done.push(node),
                None => finished = Some(node),
            }
        }
    }

    finished.unwrap_or_else(|| directory_node(root, Vec::new()))
}

fn file_node(node: &TreeNode) -> DiskNode {
    DiskNode::file(node.name(), node.size().unwrap_or(0), node.extension())
}

fn directory_node(node: &TreeNode, mut children: Vec<DiskNode>) -> DiskNode {
    children.sort_by(sibling_order);
    DiskNode::directory(node.name(), node.size().unwrap_or(0), children)
}
