//! Command-line interface for smellscan.

use clap::{Parser, Subcommand};
use globset::GlobSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{Config, DEFAULT_TEMPLATE};
use crate::detect::{Runner, Severity};
use crate::report::{self, FileError, FileReport, ScanReport};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Path argument meaning "read the source from standard input".
const STDIN_PATH: &str = "-";

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["target", "build", "out", "node_modules"];

/// Structural code smell detection for Java sources.
///
/// Reports long methods, deep nesting, unused imports, magic numbers,
/// god classes, string concatenation in loops and empty catch blocks.
#[derive(Parser)]
#[command(name = "smellscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity: -v debug, -vv trace (otherwise SMELLSCAN_LOG, default warn)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze Java sources for code smells
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// File or directory to analyze, or - for standard input
    pub path: PathBuf,

    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty, json, or sarif
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Lowest severity that fails the run (overrides the configuration)
    #[arg(long)]
    pub fail_on: Option<Severity>,

    /// Run the detectors of each file in parallel
    #[arg(long)]
    pub parallel_detectors: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "smellscan.yaml")]
    pub output: PathBuf,
}

/// Collect `.java` files under `root`, sorted.
pub fn collect_files(root: &Path, exclusions: &GlobSet) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("java") {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if exclusions.is_match(relative) || exclusions.is_match(path) {
            debug!(file = %path.display(), "excluded by configuration");
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" && args.format != "sarif" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'sarif'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let (config, config_path) = match Config::discover(args.config.as_deref(), Path::new(".")) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(path) = &config_path {
        debug!(config = %path.display(), "configuration loaded");
    }

    let fail_on = args.fail_on.unwrap_or(config.fail_on);
    let runner =
        Runner::new(config.thresholds.clone()).parallel_detectors(args.parallel_detectors);

    let path_str = args.path.to_string_lossy().to_string();
    let (report, base_path) = if path_str == STDIN_PATH {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        let mut report = ScanReport::new(path_str);
        report.files.push(FileReport {
            file: "<stdin>".to_string(),
            findings: runner.analyze(&source),
        });
        (report, PathBuf::new())
    } else {
        // Resolve path
        let abs_path = match args.path.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: cannot access path {:?}: {}", args.path, e);
                return Ok(EXIT_ERROR);
            }
        };

        let files = if abs_path.is_dir() {
            collect_files(&abs_path, &config.exclusions())?
        } else {
            vec![abs_path.clone()]
        };

        if files.is_empty() {
            eprintln!("Warning: no Java files to analyze");
            return Ok(EXIT_SUCCESS);
        }

        let report = scan(&runner, &args.path, &abs_path, &files);
        (report, args.path.clone())
    };

    // Output results
    match args.format.as_str() {
        "json" => report::write_json(&report)?,
        "sarif" => report::write_sarif(&base_path, &report)?,
        _ => report::write_pretty(&report, fail_on),
    }

    if !report.errors.is_empty() {
        Ok(EXIT_ERROR)
    } else if report.fails(fail_on) {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Analyse `files` and name each one relative to the path the user gave.
fn scan(runner: &Runner, given: &Path, abs_root: &Path, files: &[PathBuf]) -> ScanReport {
    let mut report = ScanReport::new(given.to_string_lossy());

    for analysis in runner.analyze_files(files) {
        let display = match analysis.path.strip_prefix(abs_root) {
            Ok(rel) if !rel.as_os_str().is_empty() => given.join(rel),
            _ => given.to_path_buf(),
        };
        let file = display.to_string_lossy().to_string();

        match analysis.result {
            Ok(findings) => report.files.push(FileReport { file, findings }),
            Err(e) => {
                warn!(file = %file, error = %e, "file skipped");
                report.errors.push(FileError {
                    file,
                    error: format!("{:#}", e),
                });
            }
        }
    }

    report
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_TEMPLATE) {
        eprintln!("Error: failed to write configuration: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to adjust thresholds", args.output.display());
    println!("  2. Run: smellscan analyze src --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_skips_hidden_build_and_excluded() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for dir in ["src/main", "src/generated", ".git", "target", "build/classes"] {
            std::fs::create_dir_all(root.join(dir)).unwrap();
        }
        for file in [
            "src/main/B.java",
            "src/main/A.java",
            "src/main/notes.txt",
            "src/generated/G.java",
            ".git/H.java",
            "target/T.java",
            "build/classes/C.java",
        ] {
            std::fs::write(root.join(file), "class X {}").unwrap();
        }

        let config = Config {
            excluded_paths: vec!["**/generated/**".to_string()],
            ..Default::default()
        };
        let files = collect_files(root, &config.exclusions()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["src/main/A.java", "src/main/B.java"]);
    }

    #[test]
    fn test_scan_names_files_relative_to_given_path() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        std::fs::write(root.join("A.java"), "class A {}").unwrap();

        let files = collect_files(&root, &GlobSet::empty()).unwrap();
        let report = scan(&Runner::default(), Path::new("proj"), &root, &files);
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].file, Path::new("proj").join("A.java").to_string_lossy());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("smellscan.yaml");

        let args = InitArgs {
            output: output.clone(),
        };
        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        assert!(Config::load(&output).is_ok());
        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "smellscan", "-v", "check", "src", "--format", "json", "--fail-on", "medium",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.format, "json");
                assert_eq!(args.fail_on, Some(Severity::Medium));
                assert!(!args.parallel_detectors);
            }
            Commands::Init(_) => panic!("expected analyze"),
        }
    }
}
