//! Scan result display
//!
//! - `config` - Output configuration types
//! - `tree` - Console tree with sizes and group colors
//! - `json` - JSON output

mod config;
mod json;
mod tree;

pub use config::OutputConfig;
pub use json::print_json;
pub use tree::{TreeFormatter, parse_hex_color};
