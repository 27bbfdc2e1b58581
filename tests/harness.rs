//! Test harness for diskviz integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_file(&self, path: &str, size: usize) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, vec![b'x'; size]).expect("Failed to write file");
        full_path
    }

    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

pub fn run_diskviz(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_diskviz");
    let output = Command::new(binary)
        .args(args)
        .current_dir(dir)
        .env_remove("DISKVIZ_PALETTE_COMMAND")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run diskviz");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// Run with `--json` and parse the response.
pub fn scan_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut all_args = vec!["--json"];
    all_args.extend_from_slice(args);
    let (stdout, stderr, success) = run_diskviz(dir, &all_args);
    assert!(success, "diskviz should succeed: {}", stderr);
    serde_json::from_str(&stdout).expect("stdout should be JSON")
}

/// Names of a JSON node's children, in output order.
pub fn child_names(node: &serde_json::Value) -> Vec<String> {
    node["children"]
        .as_array()
        .map(|children| {
            children
                .iter()
                .map(|c| c["name"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let tree = TestTree::new();
        assert!(tree.path().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let tree = TestTree::new();
        let file_path = tree.add_file("nested/test.bin", 12);
        assert_eq!(fs::metadata(file_path).unwrap().len(), 12);
    }
}
