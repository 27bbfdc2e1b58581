//! CLI entry point for diskviz

use std::io::IsTerminal;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use diskviz::tree::DEFAULT_MAX_FILES;
use diskviz::{
    CommandPalette, OutputConfig, Palette, ScanConfig, ScanRequest, ScanResponse, StatsConfig,
    Traversal, TreeFormatter, assign_group_colors, collect_stats, print_json, print_stats,
    print_stats_json, run_scan_with, sample_disk,
};
use tracing::warn;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "diskviz")]
#[command(about = "Scan a directory tree and report where the bytes are")]
#[command(version)]
struct Args {
    /// Directory to scan
    #[arg(default_value = ".")]
    path: String,

    /// Stop after including this many files (1-200000)
    #[arg(short = 'n', long = "max-files", default_value_t = DEFAULT_MAX_FILES)]
    max_files: usize,

    /// Output the scan result as JSON
    #[arg(long = "json")]
    json: bool,

    /// Show size and count per file type plus the largest files
    #[arg(long = "stats")]
    stats: bool,

    /// Use the built-in demonstration tree instead of scanning
    #[arg(long = "sample")]
    sample: bool,

    /// Descend only N levels deep in console output
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Traverse with an explicit stack instead of recursion (for very deep trees)
    #[arg(long = "iterative")]
    iterative: bool,

    /// External program printing a JSON array of colors for COUNT groups,
    /// invoked as `CMD COUNT`
    #[arg(long = "palette-command", env = "DISKVIZ_PALETTE_COMMAND", value_name = "CMD")]
    palette_command: Option<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    diskviz::logging::init(args.verbose);

    let palette = args
        .palette_command
        .as_deref()
        .and_then(|command| match CommandPalette::parse(command) {
            Ok(palette) => Some(palette),
            Err(e) => {
                warn!(error = %e, "ignoring palette command");
                None
            }
        });
    let palette = palette.as_ref().map(|p| p as &dyn Palette);

    let response = if args.sample {
        sample_response(palette)
    } else {
        let request = ScanRequest::new(args.path.clone(), args.max_files);
        let config = ScanConfig {
            traversal: if args.iterative {
                Traversal::Iterative
            } else {
                Traversal::Recursive
            },
            ..Default::default()
        };
        run_scan_with(&request, config, palette).unwrap_or_else(|e| {
            eprintln!("diskviz: {}", e);
            process::exit(1);
        })
    };

    let result = if args.stats {
        let stats = collect_stats(&response.root, StatsConfig::default());
        if args.json {
            print_stats_json(&stats)
        } else {
            print_stats(&stats, should_use_color(args.color))
        }
    } else if args.json {
        print_json(&response)
    } else {
        let formatter = TreeFormatter::new(OutputConfig {
            use_color: should_use_color(args.color),
            max_depth: args.level,
            group_colors: response.group_colors.clone(),
        });
        formatter.print(&response.root)
    };

    if let Err(e) = result {
        eprintln!("diskviz: error writing output: {}", e);
        process::exit(1);
    }
}

/// Wrap the demonstration tree in the same response shape as a scan.
fn sample_response(palette: Option<&dyn Palette>) -> ScanResponse {
    let root = sample_disk();
    let group_colors = palette
        .map(|palette| assign_group_colors(&root, palette))
        .unwrap_or_default();
    let file_count = collect_stats(&root, StatsConfig::default()).files;

    ScanResponse {
        file_count,
        total_size: root.size,
        root,
        group_colors,
    }
}
