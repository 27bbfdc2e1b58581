//! Tree formatter for console output
//!
//! Renders a [`DiskNode`] the way `tree` does, with each entry's size after
//! its name. Top-level directories take their palette color when one was
//! assigned.

use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{DiskNode, format_size};

use super::config::OutputConfig;

#[derive(Debug, Default)]
struct Counts {
    dirs: usize,
    files: usize,
}

/// Formatter for a complete scan tree.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render without colors.
    pub fn format(&self, root: &DiskNode) -> String {
        let mut buffer = Buffer::no_color();
        // Writes into an in-memory buffer cannot fail
        let _ = self.write_tree(&mut buffer, root);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    pub fn print(&self, root: &DiskNode) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_tree(&mut stdout, root)
    }

    pub fn write_tree(&self, out: &mut dyn WriteColor, root: &DiskNode) -> io::Result<()> {
        let mut counts = Counts::default();
        self.write_entry(out, root, None)?;
        self.write_children(out, root, "", 1, &mut counts)?;
        out.reset()?;
        writeln!(out)?;
        writeln!(
            out,
            "{} directories, {} files, {}",
            counts.dirs,
            counts.files,
            format_size(root.size)
        )
    }

    fn write_children(
        &self,
        out: &mut dyn WriteColor,
        node: &DiskNode,
        prefix: &str,
        depth: usize,
        counts: &mut Counts,
    ) -> io::Result<()> {
        let children = node.children();
        for (i, child) in children.iter().enumerate() {
            let is_last = i + 1 == children.len();
            let connector = if is_last { "└── " } else { "├── " };
            write!(out, "{}{}", prefix, connector)?;

            let group = if depth == 1 {
                self.config
                    .group_colors
                    .get(&child.name)
                    .and_then(|hex| parse_hex_color(hex.as_str()))
            } else {
                None
            };
            self.write_entry(out, child, group)?;

            if child.is_dir() {
                counts.dirs += 1;
                if self.config.max_depth.is_none_or(|max| depth < max) {
                    let next = if is_last {
                        format!("{}    ", prefix)
                    } else {
                        format!("{}│   ", prefix)
                    };
                    self.write_children(out, child, &next, depth + 1, counts)?;
                }
            } else {
                counts.files += 1;
            }
        }
        Ok(())
    }

    fn write_entry(
        &self,
        out: &mut dyn WriteColor,
        node: &DiskNode,
        group: Option<Color>,
    ) -> io::Result<()> {
        if node.is_dir() {
            let mut spec = ColorSpec::new();
            spec.set_fg(Some(group.unwrap_or(Color::Blue))).set_bold(true);
            out.set_color(&spec)?;
        }
        write!(out, "{}", node.name)?;
        out.reset()?;

        out.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(out, " ({})", format_size(node.size))?;
        out.reset()?;
        writeln!(out)
    }
}

/// Parse `#rrggbb` into a terminal color.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
