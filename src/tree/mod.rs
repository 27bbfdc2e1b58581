//! Directory tree scanning
//!
//! A scan runs in three stages over a tree owned by that scan alone:
//!
//! - `walker`: depth-first walk under a global file budget, building a raw tree
//! - `aggregate`: post-order pass assigning directory sizes
//! - `serialize`: conversion to [`DiskNode`] with deterministic sibling order
//!
//! Each stage can run recursively or over an explicit stack, see [`Traversal`].

mod aggregate;
mod config;
mod node;
mod serialize;
mod utils;
mod walker;

pub use aggregate::{aggregate, finalize, finalize_iterative};
pub use config::{DEFAULT_MAX_FILES, ScanConfig, Traversal};
pub use node::{NodeId, NodeKind, ScanTree, TreeNode};
pub use serialize::{
    DiskNode, NodeType, serialize, serialize_iterative, sibling_order, to_disk_node,
};
pub use utils::{format_size, guess_extension, is_hidden, root_name};
pub use walker::{ScanCounters, StopReason, WalkOutcome, Walker};
