//! Group colors for the top-level directories of a scan
//!
//! Colors come from a pluggable [`Palette`]. The stock implementation runs an
//! external generator program; any failure there leaves the scan result intact
//! with an empty color map.

use std::collections::BTreeMap;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::PaletteError;
use crate::tree::DiskNode;

/// Source of `count` color strings.
pub trait Palette {
    fn generate(&self, count: usize) -> Result<Vec<String>, PaletteError>;
}

impl<F> Palette for F
where
    F: Fn(usize) -> Result<Vec<String>, PaletteError>,
{
    fn generate(&self, count: usize) -> Result<Vec<String>, PaletteError> {
        self(count)
    }
}

/// Runs `program args... COUNT` and reads a JSON array of colors from stdout.
#[derive(Debug, Clone)]
pub struct CommandPalette {
    program: String,
    args: Vec<String>,
}

impl CommandPalette {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a command line on whitespace, e.g. `"node palette_generator.cjs"`.
    pub fn parse(command: &str) -> Result<Self, PaletteError> {
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or(PaletteError::EmptyCommand)?;
        Ok(Self::new(program, parts))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Palette for CommandPalette {
    fn generate(&self, count: usize) -> Result<Vec<String>, PaletteError> {
        debug!(program = %self.program, count, "running palette command");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(count.to_string())
            .output()
            .map_err(|source| PaletteError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PaletteError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if stdout.is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(stdout)?)
    }
}

/// Names of the root's immediate child directories, in output order.
pub fn group_names(root: &DiskNode) -> Vec<&str> {
    root.children()
        .iter()
        .filter(|child| child.is_dir() && !child.name.is_empty())
        .map(|child| child.name.as_str())
        .collect()
}

/// Pair each top-level directory with a color by position.
///
/// Extra colors are ignored and extra names stay uncolored.
pub fn assign_group_colors(root: &DiskNode, palette: &dyn Palette) -> BTreeMap<String, String> {
    let names = group_names(root);
    if names.is_empty() {
        return BTreeMap::new();
    }

    match palette.generate(names.len()) {
        Ok(colors) => names
            .into_iter()
            .zip(colors)
            .map(|(name, color)| (name.to_string(), color))
            .collect(),
        Err(e) => {
            warn!(error = %e, "palette generation failed, returning no group colors");
            BTreeMap::new()
        }
    }
}
