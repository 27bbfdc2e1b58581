//! Configuration types for directory scans

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default number of files a scan will include.
pub const DEFAULT_MAX_FILES: usize = 20_000;

/// How the walk, aggregation and serialization stages descend the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Traversal {
    /// One call frame per directory level.
    #[default]
    Recursive,
    /// Explicit stack over the node arena. Depth is bounded only by memory.
    Iterative,
}

/// Configuration for scan behavior.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Global budget on the number of files included across the whole subtree
    pub max_files: usize,
    pub traversal: Traversal,
    /// Checked before every directory entry; once set the walk stops.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl ScanConfig {
    pub fn with_max_files(max_files: usize) -> Self {
        Self {
            max_files,
            ..Default::default()
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            traversal: Traversal::Recursive,
            cancel: None,
        }
    }
}
