//! Output configuration types

use std::collections::BTreeMap;

/// Configuration for console tree output.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Deepest level printed below the root; `None` prints everything
    pub max_depth: Option<usize>,
    /// Top-level directory name -> `#rrggbb`, as assigned by a palette
    pub group_colors: BTreeMap<String, String>,
}
