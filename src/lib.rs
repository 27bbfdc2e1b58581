//! diskviz - disk usage tree scanner with deterministic, serializable output

pub mod error;
pub mod logging;
pub mod output;
pub mod palette;
pub mod sample;
pub mod scan;
pub mod stats;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{PaletteError, ScanError};
pub use output::{OutputConfig, TreeFormatter, print_json};
pub use palette::{CommandPalette, Palette, assign_group_colors};
pub use sample::sample_disk;
pub use scan::{
    MAX_FILES_LIMIT, MAX_PATH_LEN, ScanOutcome, ScanRequest, ScanResponse, run_scan, run_scan_with,
    scan_directory, scan_tree,
};
pub use stats::{
    StatsConfig, TreeStats, collect_stats, file_type_stats, largest_files, print_stats,
    print_stats_json,
};
pub use tree::{DiskNode, NodeType, ScanConfig, ScanCounters, ScanTree, Traversal, Walker};
