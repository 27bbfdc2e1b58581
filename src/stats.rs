//! File-type statistics for a scanned tree
//!
//! Groups files by extension and picks out the largest files, the two views
//! a disk usage dashboard needs besides the tree itself.

use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{DiskNode, format_size};

/// How many of the largest files are reported by default.
pub const DEFAULT_LARGEST_FILES: usize = 6;

/// Aggregate over one extension. Extensions are compared case-insensitively
/// and reported upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTypeStat {
    pub extension: String,
    pub size: u64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargeFile {
    /// Slash-joined path starting at the root's name
    pub path: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// Collected statistics about a tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeStats {
    pub files: usize,
    /// Directories below the root
    pub directories: usize,
    pub total_size: u64,
    /// Sorted by size descending, then extension
    pub by_extension: Vec<FileTypeStat>,
    pub largest_files: Vec<LargeFile>,
}

#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub largest_limit: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            largest_limit: DEFAULT_LARGEST_FILES,
        }
    }
}

/// Statistics collector that accumulates data while visiting a tree.
#[derive(Debug, Default)]
pub struct StatsCollector {
    config: StatsConfig,
    files: usize,
    directories: usize,
    total_size: u64,
    /// Maps extension -> (bytes, file_count)
    by_extension: HashMap<String, (u64, usize)>,
    all_files: Vec<LargeFile>,
}

impl StatsCollector {
    pub fn new(config: StatsConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Record a file found at `path`.
    pub fn record_file(&mut self, path: String, node: &DiskNode) {
        self.files += 1;
        self.total_size += node.size;

        // Extensionless files count toward totals but not toward any type
        if let Some(ext) = &node.extension {
            let entry = self
                .by_extension
                .entry(ext.to_uppercase())
                .or_insert((0, 0));
            entry.0 += node.size;
            entry.1 += 1;
        }

        self.all_files.push(LargeFile {
            path,
            size: node.size,
            extension: node.extension.clone(),
        });
    }

    pub fn record_directory(&mut self) {
        self.directories += 1;
    }

    /// Finalize and return the collected statistics.
    pub fn finalize(mut self) -> TreeStats {
        let mut by_extension: Vec<FileTypeStat> = self
            .by_extension
            .into_iter()
            .map(|(extension, (size, count))| FileTypeStat {
                extension,
                size,
                count,
            })
            .collect();
        by_extension.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.extension.cmp(&b.extension)));

        self.all_files
            .sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        self.all_files.truncate(self.config.largest_limit);

        TreeStats {
            files: self.files,
            directories: self.directories,
            total_size: self.total_size,
            by_extension,
            largest_files: self.all_files,
        }
    }
}

/// Visit every node under `root` and collect statistics.
pub fn collect_stats(root: &DiskNode, config: StatsConfig) -> TreeStats {
    let mut collector = StatsCollector::new(config);
    let mut pending: Vec<(&DiskNode, String)> = vec![(root, root.name.clone())];

    while let Some((node, path)) = pending.pop() {
        if !node.is_dir() {
            collector.record_file(path, node);
            continue;
        }
        if !std::ptr::eq(node, root) {
            collector.record_directory();
        }
        for child in node.children() {
            pending.push((child, format!("{}/{}", path, child.name)));
        }
    }

    collector.finalize()
}

/// Per-extension breakdown of `root`.
pub fn file_type_stats(root: &DiskNode) -> Vec<FileTypeStat> {
    collect_stats(root, StatsConfig::default()).by_extension
}

/// The `limit` largest files under `root`.
pub fn largest_files(root: &DiskNode, limit: usize) -> Vec<LargeFile> {
    collect_stats(
        root,
        StatsConfig {
            largest_limit: limit,
        },
    )
    .largest_files
}

/// Print statistics to stdout with optional color.
pub fn print_stats(stats: &TreeStats, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);

    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    stdout.set_color(&bold)?;
    writeln!(stdout, "Disk Usage Statistics")?;
    stdout.reset()?;
    writeln!(stdout, "─────────────────────")?;

    writeln!(stdout, "Files:        {} total", format_number(stats.files))?;
    writeln!(stdout, "Directories:  {}", format_number(stats.directories))?;
    writeln!(stdout, "Size:         {}", format_size(stats.total_size))?;
    writeln!(stdout)?;

    if !stats.by_extension.is_empty() {
        stdout.set_color(&bold)?;
        writeln!(stdout, "By File Type:")?;
        stdout.reset()?;

        let mut ext_color = ColorSpec::new();
        ext_color.set_fg(Some(Color::Cyan));

        for stat in &stats.by_extension {
            write!(stdout, "  ")?;
            stdout.set_color(&ext_color)?;
            write!(stdout, "{:<10}", stat.extension)?;
            stdout.reset()?;
            writeln!(
                stdout,
                "{:>8}  {:>6} files",
                format_size(stat.size),
                format_number(stat.count)
            )?;
        }
        writeln!(stdout)?;
    }

    if !stats.largest_files.is_empty() {
        stdout.set_color(&bold)?;
        writeln!(stdout, "Largest Files:")?;
        stdout.reset()?;

        for file in &stats.largest_files {
            writeln!(stdout, "  {:>8}  {}", format_size(file.size), file.path)?;
        }
    }

    Ok(())
}

/// Format a number with thousand separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Print statistics as JSON.
pub fn print_stats_json(stats: &TreeStats) -> io::Result<()> {
    crate::output::print_json(stats)
}
