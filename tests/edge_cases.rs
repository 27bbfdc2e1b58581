//! Edge case and error handling tests for diskviz

#![cfg(unix)]

mod harness;

use harness::{TestTree, child_names, run_diskviz, scan_json};
use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
fn test_symlink_to_file_not_counted() {
    let tree = TestTree::new();
    tree.add_file("target.bin", 64);
    symlink(tree.path().join("target.bin"), tree.path().join("link.bin"))
        .expect("Failed to create symlink");

    let json = scan_json(tree.path(), &[]);
    assert_eq!(child_names(&json["root"]), vec!["target.bin"]);
    assert_eq!(json["file_count"], 1);
    assert_eq!(json["total_size"], 64);
}

#[test]
fn test_symlink_to_directory_not_entered() {
    let tree = TestTree::new();
    tree.add_file("realdir/file.bin", 8);
    symlink(tree.path().join("realdir"), tree.path().join("linkdir"))
        .expect("Failed to create dir symlink");

    let json = scan_json(tree.path(), &[]);
    assert_eq!(child_names(&json["root"]), vec!["realdir"]);
    assert_eq!(json["file_count"], 1);
}

#[test]
fn test_symlink_to_parent_no_infinite_loop() {
    let tree = TestTree::new();
    tree.add_file("subdir/file.bin", 4);
    symlink("..", tree.path().join("subdir").join("parent"))
        .expect("Failed to create parent symlink");

    let json = scan_json(tree.path(), &[]);
    assert_eq!(child_names(&json["root"]["children"][0]), vec!["file.bin"]);
}

#[test]
fn test_broken_symlink() {
    let tree = TestTree::new();
    tree.add_file("real.bin", 2);
    symlink("nonexistent.bin", tree.path().join("broken_link.bin"))
        .expect("Failed to create broken symlink");

    let json = scan_json(tree.path(), &[]);
    assert_eq!(child_names(&json["root"]), vec!["real.bin"]);
}

// ============================================================================
// Hidden Entries
// ============================================================================

#[test]
fn test_hidden_directory_contributes_nothing() {
    let tree = TestTree::new();
    tree.add_file(".git/objects/pack.bin", 5000);
    tree.add_file("visible/.hidden_dir/inner.txt", 700);
    tree.add_file("visible/shown.txt", 3);

    let json = scan_json(tree.path(), &[]);
    assert_eq!(json["file_count"], 1);
    assert_eq!(json["total_size"], 3);
    assert_eq!(child_names(&json["root"]), vec!["visible"]);
    assert_eq!(child_names(&json["root"]["children"][0]), vec!["shown.txt"]);
}

#[test]
fn test_hidden_file_included_without_extension() {
    let tree = TestTree::new();
    tree.add_file(".bashrc", 11);
    tree.add_file(".env.production", 4);

    let json = scan_json(tree.path(), &[]);
    assert_eq!(json["file_count"], 2);
    assert_eq!(child_names(&json["root"]), vec![".bashrc", ".env.production"]);
    for child in json["root"]["children"].as_array().unwrap() {
        assert!(child["extension"].is_null());
    }
}

#[test]
fn test_extension_uses_final_suffix() {
    let tree = TestTree::new();
    tree.add_file("archive.tar.gz", 30);
    tree.add_file("README", 20);
    tree.add_file("report.pdf", 10);

    let json = scan_json(tree.path(), &[]);
    let children = json["root"]["children"].as_array().unwrap();
    assert_eq!(children[0]["extension"], "gz");
    assert!(children[1]["extension"].is_null());
    assert_eq!(children[2]["extension"], "pdf");
}

// ============================================================================
// Budget
// ============================================================================

#[test]
fn test_budget_of_one() {
    let tree = TestTree::new();
    tree.add_file("a/1.txt", 1);
    tree.add_file("b/2.txt", 1);
    tree.add_file("c.txt", 1);

    let json = scan_json(tree.path(), &["--max-files", "1"]);
    assert_eq!(json["file_count"], 1);
    assert_eq!(json["total_size"], 1);
}

#[test]
fn test_max_files_out_of_range_rejected() {
    let tree = TestTree::new();

    let (_stdout, stderr, success) = run_diskviz(tree.path(), &["--max-files", "0"]);
    assert!(!success);
    assert!(stderr.contains("max_files"), "unexpected stderr: {}", stderr);

    let (_stdout, stderr, success) = run_diskviz(tree.path(), &["--max-files", "200001"]);
    assert!(!success);
    assert!(stderr.contains("200000"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_overlong_path_rejected() {
    let tree = TestTree::new();
    let long = "a".repeat(4097);

    let (_stdout, stderr, success) = run_diskviz(tree.path(), &[&long]);
    assert!(!success);
    assert!(stderr.contains("4096"), "unexpected stderr: {}", stderr);
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn test_nonexistent_path() {
    let tree = TestTree::new();

    let (_stdout, stderr, success) = run_diskviz(tree.path(), &["does-not-exist"]);
    assert!(!success, "diskviz should fail for missing root");
    assert!(stderr.contains("cannot access"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_file_as_root() {
    let tree = TestTree::new();
    tree.add_file("plain.txt", 3);

    let (_stdout, stderr, success) = run_diskviz(tree.path(), &["plain.txt"]);
    assert!(!success);
    assert!(stderr.contains("not a directory"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_empty_directory() {
    let tree = TestTree::new();
    tree.add_dir("empty");

    let json = scan_json(tree.path(), &["empty"]);
    assert_eq!(json["file_count"], 0);
    assert_eq!(json["root"]["size"], 0);
    assert_eq!(json["root"]["children"], serde_json::json!([]));
}

#[test]
fn test_unreadable_directory_is_skipped() {
    let tree = TestTree::new();
    tree.add_file("readable/file.bin", 9);
    tree.add_file("locked/hidden.bin", 5);
    let locked = tree.path().join("locked");

    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o000);
    fs::set_permissions(&locked, perms).expect("Failed to set permissions");

    let (stdout, stderr, success) = run_diskviz(tree.path(), &["--json"]);

    // Restore permissions for cleanup
    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&locked, perms).expect("Failed to restore permissions");

    assert!(success, "unreadable directories must not fail the scan: {}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let names = child_names(&json["root"]);
    // The directory itself is listed even when its contents are not
    assert!(names.contains(&"readable".to_string()));
    assert!(names.contains(&"locked".to_string()));
    assert!(json["file_count"].as_u64().unwrap() >= 1);
}

#[test]
fn test_unicode_names() {
    let tree = TestTree::new();
    tree.add_file("données/résumé.pdf", 6);
    tree.add_file("日本語.txt", 2);

    let json = scan_json(tree.path(), &[]);
    assert_eq!(child_names(&json["root"]), vec!["données", "日本語.txt"]);
    assert_eq!(json["root"]["children"][0]["children"][0]["extension"], "pdf");
}

#[test]
fn test_deep_nesting_iterative() {
    let tree = TestTree::new();
    let deep: Vec<String> = (0..50).map(|i| format!("d{}", i)).collect();
    tree.add_file(&format!("{}/leaf.bin", deep.join("/")), 17);

    let json = scan_json(tree.path(), &["--iterative"]);
    assert_eq!(json["file_count"], 1);
    assert_eq!(json["root"]["children"][0]["size"], 17);
}

#[test]
fn test_nesting_deeper_than_open_file_limit() {
    // Past the common default limit of 1024 open files
    let tree = TestTree::new();
    let deep = vec!["d"; 1100].join("/");
    tree.add_file(&format!("{}/leaf.bin", deep), 17);

    let (stdout, _stderr, success) =
        run_diskviz(tree.path(), &["--iterative", "--stats", "--json"]);
    assert!(success);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["files"], 1);
    assert_eq!(stats["directories"], 1100);
    assert_eq!(stats["total_size"], 17);
}
