//! Scan requests: validation, root resolution and the full scan pipeline

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ScanError;
use crate::palette::{Palette, assign_group_colors};
use crate::tree::{
    DEFAULT_MAX_FILES, DiskNode, ScanConfig, ScanCounters, WalkOutcome, Walker, aggregate,
    to_disk_node,
};

/// Longest accepted path, in characters.
pub const MAX_PATH_LEN: usize = 4096;
/// Upper bound for `max_files`.
pub const MAX_FILES_LIMIT: usize = 200_000;

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub path: String,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl ScanRequest {
    pub fn new(path: impl Into<String>, max_files: usize) -> Self {
        Self {
            path: path.into(),
            max_files,
        }
    }

    /// Reject out-of-range input before any filesystem access.
    pub fn validate(&self) -> Result<(), ScanError> {
        let len = self.path.chars().count();
        if len == 0 || len > MAX_PATH_LEN {
            return Err(ScanError::PathLength(len));
        }
        if !(1..=MAX_FILES_LIMIT).contains(&self.max_files) {
            return Err(ScanError::MaxFilesOutOfRange(self.max_files));
        }
        Ok(())
    }
}

/// Wire response for a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub root: DiskNode,
    pub file_count: usize,
    pub total_size: u64,
    #[serde(default)]
    pub group_colors: BTreeMap<String, String>,
}

/// Ordered tree plus the counters of the walk that produced it.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub root: DiskNode,
    pub counters: ScanCounters,
}

impl ScanOutcome {
    pub fn into_response(self, group_colors: BTreeMap<String, String>) -> ScanResponse {
        ScanResponse {
            root: self.root,
            file_count: self.counters.files_visited,
            total_size: self.counters.bytes_visited,
            group_colors,
        }
    }
}

/// Make `path` absolute against the current directory and drop `.`/`..`
/// lexically. Symlinks are not resolved.
pub fn resolve_root(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Scan a directory after checking that the root exists and is a directory.
pub fn scan_directory(root: &Path, config: &ScanConfig) -> Result<ScanOutcome, ScanError> {
    let root = resolve_root(root);
    let metadata = fs::metadata(&root).map_err(|source| ScanError::RootUnreadable {
        path: root.clone(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory { path: root });
    }
    Ok(scan_tree(&root, config))
}

/// Walk, aggregate and serialize `root` with no checks on the root itself.
///
/// A missing root yields an empty directory and zero counters.
pub fn scan_tree(root: &Path, config: &ScanConfig) -> ScanOutcome {
    let started = Instant::now();

    let WalkOutcome { mut tree, counters } = Walker::new(config.clone()).walk(root);
    aggregate(&mut tree, config.traversal);
    let root_node = to_disk_node(&tree, config.traversal);

    info!(
        root = %root.display(),
        files = counters.files_visited,
        bytes = counters.bytes_visited,
        truncated = counters.stopped.is_some(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scan complete"
    );

    ScanOutcome {
        root: root_node,
        counters,
    }
}

/// Validate, scan with default settings, and attach group colors.
pub fn run_scan(request: &ScanRequest, palette: Option<&dyn Palette>) -> Result<ScanResponse, ScanError> {
    run_scan_with(request, ScanConfig::default(), palette)
}

/// Like [`run_scan`], taking traversal and cancellation settings from
/// `config`. The request's `max_files` always wins.
pub fn run_scan_with(
    request: &ScanRequest,
    config: ScanConfig,
    palette: Option<&dyn Palette>,
) -> Result<ScanResponse, ScanError> {
    request.validate()?;

    let config = ScanConfig {
        max_files: request.max_files,
        ..config
    };
    let outcome = scan_directory(Path::new(&request.path), &config)?;
    let group_colors = palette
        .map(|palette| assign_group_colors(&outcome.root, palette))
        .unwrap_or_default();

    Ok(outcome.into_response(group_colors))
}
