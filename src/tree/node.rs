//! Intermediate scan tree, stored as an arena of nodes

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::utils::guess_extension;

/// Index of a node inside a [`ScanTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node is. Fixed when the node is created.
#[derive(Debug, Clone)]
pub enum NodeKind {
    File {
        size: u64,
        extension: Option<String>,
    },
    Directory {
        /// `None` until the tree has been aggregated.
        size: Option<u64>,
        children: HashMap<String, NodeId>,
    },
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    name: String,
    kind: NodeKind,
}

impl TreeNode {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let extension = guess_extension(&name).map(str::to_string);
        Self {
            name,
            kind: NodeKind::File { size, extension },
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory {
                size: None,
                children: HashMap::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// File size, or the aggregated directory size once known.
    pub fn size(&self) -> Option<u64> {
        match &self.kind {
            NodeKind::File { size, .. } => Some(*size),
            NodeKind::Directory { size, .. } => *size,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { extension, .. } => extension.as_deref(),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Child ids of a directory. Files have none.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        let children = match &self.kind {
            NodeKind::Directory { children, .. } => Some(children.values().copied()),
            NodeKind::File { .. } => None,
        };
        children.into_iter().flatten()
    }

    pub fn child(&self, name: &str) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Directory { children, .. } => children.get(name).copied(),
            NodeKind::File { .. } => None,
        }
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        match &self.kind {
            NodeKind::Directory { children, .. } => children.len(),
            NodeKind::File { .. } => 0,
        }
    }
}

/// Mutable tree owned by a single scan. The root is always the first node.
#[derive(Debug, Clone)]
pub struct ScanTree {
    nodes: Vec<TreeNode>,
}

impl ScanTree {
    pub fn new(root: TreeNode) -> Self {
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach `node` under the directory `parent`.
    ///
    /// Returns `None` when `parent` is a file, or when it already has a child
    /// of the same name. The existing child is never replaced.
    pub fn add_child(&mut self, parent: NodeId, node: TreeNode) -> Option<NodeId> {
        let id = NodeId(self.nodes.len());
        match &mut self.nodes[parent.0].kind {
            NodeKind::Directory { children, .. } => match children.entry(node.name.clone()) {
                Entry::Occupied(_) => return None,
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            },
            NodeKind::File { .. } => return None,
        }
        self.nodes.push(node);
        Some(id)
    }

    /// Record the aggregated size of a directory. No-op for files.
    pub(crate) fn set_directory_size(&mut self, id: NodeId, total: u64) {
        if let NodeKind::Directory { size, .. } = &mut self.nodes[id.0].kind {
            *size = Some(total);
        }
    }
}
