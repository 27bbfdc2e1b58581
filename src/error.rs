//! Error types for scan requests

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::scan::{MAX_FILES_LIMIT, MAX_PATH_LEN};

/// Errors that stop a scan before it starts.
///
/// Problems inside the walked subtree never surface here; they only shorten
/// the branch where they happen.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("path must be between 1 and {max} characters, got {0}", max = MAX_PATH_LEN)]
    PathLength(usize),

    #[error("max_files must be between 1 and {max}, got {0}", max = MAX_FILES_LIMIT)]
    MaxFilesOutOfRange(usize),

    #[error("cannot access '{}': {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not a directory", .path.display())]
    NotADirectory { path: PathBuf },
}

/// Failures of an external palette generator. Never fatal to a scan.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("failed to run palette command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("palette command exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("palette command produced malformed output: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("palette command is empty")]
    EmptyCommand,
}
