//! Walker - builds the intermediate scan tree under a global file budget

use std::fs::{self, FileType, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::vec;

use tracing::{debug, trace};

use super::config::{ScanConfig, Traversal};
use super::node::{NodeId, ScanTree, TreeNode};
use super::utils::{is_hidden, root_name};

/// Why a walk left entries unvisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    BudgetExhausted,
    Cancelled,
}

/// Running totals for one scan. Only files included in the tree are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounters {
    pub files_visited: usize,
    pub bytes_visited: u64,
    pub stopped: Option<StopReason>,
}

impl ScanCounters {
    fn record_file(&mut self, size: u64) {
        self.files_visited += 1;
        self.bytes_visited += size;
    }
}

/// Raw tree plus the counters gathered while building it.
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    pub tree: ScanTree,
    pub counters: ScanCounters,
}

/// One directory entry, detached from the listing it came from.
struct Listed {
    path: PathBuf,
    file_type: io::Result<FileType>,
}

enum Visit {
    Skip,
    Directory(String),
    File(TreeNode),
}

/// Depth-first, pre-order walker.
///
/// Entries are taken in the order the filesystem reports them; ordering is
/// applied later by the serializer. A directory that cannot be listed, or
/// whose listing fails part way, simply has no further entries. A missing or
/// non-directory root produces an empty root directory.
///
/// Each listing is read in full and closed before its entries are visited,
/// so at most one directory handle is open at a time whatever the depth.
pub struct Walker {
    config: ScanConfig,
}

impl Walker {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn walk(&self, root: &Path) -> WalkOutcome {
        let mut tree = ScanTree::new(TreeNode::directory(root_name(root)));
        let mut counters = ScanCounters::default();

        match self.config.traversal {
            Traversal::Recursive => {
                let root_id = tree.root();
                self.walk_dir(root, root_id, &mut tree, &mut counters);
            }
            Traversal::Iterative => self.walk_iterative(root, &mut tree, &mut counters),
        }

        if let Some(reason) = counters.stopped {
            debug!(
                root = %root.display(),
                ?reason,
                files = counters.files_visited,
                "walk stopped early"
            );
        }

        WalkOutcome { tree, counters }
    }

    fn walk_dir(&self, path: &Path, dir: NodeId, tree: &mut ScanTree, counters: &mut ScanCounters) {
        for entry in list_dir(path) {
            if self.should_stop(counters) {
                return;
            }

            match visit(&entry) {
                Visit::Skip => {}
                Visit::Directory(name) => {
                    if let Some(id) = add_directory(tree, dir, name, &entry.path) {
                        self.walk_dir(&entry.path, id, tree, counters);
                    }
                }
                Visit::File(node) => add_file(tree, dir, node, counters),
            }
        }
    }

    /// Same visiting order as `walk_dir`, with the pending entries of each
    /// level kept on an explicit stack.
    fn walk_iterative(&self, root: &Path, tree: &mut ScanTree, counters: &mut ScanCounters) {
        let mut stack: Vec<(vec::IntoIter<Listed>, NodeId)> =
            vec![(list_dir(root).into_iter(), tree.root())];

        while let Some((entries, dir)) = stack.last_mut() {
            let dir = *dir;
            let Some(entry) = entries.next() else {
                stack.pop();
                continue;
            };
            if self.should_stop(counters) {
                break;
            }

            match visit(&entry) {
                Visit::Skip => {}
                Visit::Directory(name) => {
                    if let Some(id) = add_directory(tree, dir, name, &entry.path) {
                        stack.push((list_dir(&entry.path).into_iter(), id));
                    }
                }
                Visit::File(node) => add_file(tree, dir, node, counters),
            }
        }
    }

    /// Budget and cancellation are global: once either trips, no further
    /// entries are processed anywhere in the tree.
    fn should_stop(&self, counters: &mut ScanCounters) -> bool {
        if counters.stopped.is_some() {
            return true;
        }
        if counters.files_visited >= self.config.max_files {
            counters.stopped = Some(StopReason::BudgetExhausted);
        } else if self.config.is_cancelled() {
            counters.stopped = Some(StopReason::Cancelled);
        }
        counters.stopped.is_some()
    }
}

/// Read a whole directory listing. Entries before a listing error are kept.
fn list_dir(path: &Path) -> Vec<Listed> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping unreadable directory");
            return Vec::new();
        }
    };

    let mut listed = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => listed.push(Listed {
                path: entry.path(),
                file_type: entry.file_type(),
            }),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "directory listing failed");
                break;
            }
        }
    }
    listed
}

fn add_directory(tree: &mut ScanTree, dir: NodeId, name: String, path: &Path) -> Option<NodeId> {
    let id = tree.add_child(dir, TreeNode::directory(name));
    if id.is_none() {
        debug!(path = %path.display(), "skipping directory with a duplicate display name");
    }
    id
}

/// Counters only move for files that actually land in the tree.
fn add_file(tree: &mut ScanTree, dir: NodeId, node: TreeNode, counters: &mut ScanCounters) {
    let size = node.size().unwrap_or(0);
    if tree.add_child(dir, node).is_some() {
        counters.record_file(size);
    } else {
        debug!("skipping file with a duplicate display name");
    }
}

/// Size recorded for a file; 0 when its status cannot be read.
fn file_size(metadata: io::Result<Metadata>) -> u64 {
    metadata.map(|m| m.len()).unwrap_or(0)
}

fn visit(entry: &Listed) -> Visit {
    let Ok(file_type) = &entry.file_type else {
        return Visit::Skip;
    };
    // Never followed, whatever they point at
    if file_type.is_symlink() {
        trace!(path = %entry.path.display(), "skipping symlink");
        return Visit::Skip;
    }

    let Some(name) = entry.path.file_name() else {
        return Visit::Skip;
    };
    let name = name.to_string_lossy().to_string();

    if file_type.is_dir() {
        if is_hidden(&name) {
            trace!(path = %entry.path.display(), "pruning hidden directory");
            return Visit::Skip;
        }
        return Visit::Directory(name);
    }

    if file_type.is_file() {
        let size = file_size(fs::symlink_metadata(&entry.path));
        return Visit::File(TreeNode::file(name, size));
    }

    Visit::Skip
}
