//! Fixed demonstration tree, served without touching the filesystem

use crate::tree::DiskNode;

/// Hardcoded disk layout used for demos and health checks.
///
/// Sizes are declared, not aggregated: some directories list no children.
pub fn sample_disk() -> DiskNode {
    DiskNode::directory(
        "root",
        1_786_432_000,
        vec![
            DiskNode::directory(
                "System",
                734_003_200,
                vec![
                    DiskNode::file("kernel.bin", 120_000_000, Some("bin")),
                    DiskNode::directory("drivers", 320_000_000, vec![]),
                    DiskNode::directory("Logs", 294_003_200, vec![]),
                ],
            ),
            DiskNode::directory(
                "Users",
                1_052_428_800,
                vec![
                    DiskNode::directory(
                        "alice",
                        752_428_800,
                        vec![
                            DiskNode::file("photo.jpg", 30_000_000, Some("jpg")),
                            DiskNode::file("report.pdf", 5_000_000, Some("pdf")),
                            DiskNode::directory("Downloads", 717_428_800, vec![]),
                        ],
                    ),
                    DiskNode::directory(
                        "bob",
                        300_000_000,
                        vec![
                            DiskNode::file("video.mp4", 280_000_000, Some("mp4")),
                            DiskNode::file("notes.txt", 2_000_000, Some("txt")),
                        ],
                    ),
                ],
            ),
        ],
    )
}
