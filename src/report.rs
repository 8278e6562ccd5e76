//! Output formatting for smellscan results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::detect::{Finding, Severity, SmellKind};

/// Findings of one analysed translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub findings: Vec<Finding>,
}

/// A file that could not be analysed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub file: String,
    pub error: String,
}

/// Results of one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Path as given on the command line.
    pub path: String,
    pub files: Vec<FileReport>,
    pub errors: Vec<FileError>,
}

impl ScanReport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.files.iter().flat_map(|f| f.findings.iter())
    }

    /// Finding counts per severity, most severe first. "No Issues Found"
    /// markers are not counted.
    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for finding in self.findings() {
            if finding.kind != SmellKind::NoIssuesFound {
                *counts.entry(finding.severity).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Whether any finding is at least as severe as `fail_on`.
    pub fn fails(&self, fail_on: Severity) -> bool {
        self.findings()
            .any(|f| f.kind != SmellKind::NoIssuesFound && f.severity.is_at_least(fail_on))
    }
}

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_analyzed: usize,
    pub files: Vec<FileReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FileError>,
}

/// Render results as pretty-printed JSON.
pub fn to_json(report: &ScanReport) -> anyhow::Result<String> {
    let json = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: report.path.clone(),
        files_analyzed: report.files.len(),
        files: report.files.clone(),
        errors: report.errors.clone(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Write results in JSON format.
pub fn write_json(report: &ScanReport) -> anyhow::Result<()> {
    println!("{}", to_json(report)?);
    Ok(())
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "smellscan";

#[derive(Serialize, Deserialize)]
struct SarifReport {
    version: String,
    #[serde(rename = "$schema")]
    schema: String,
    runs: Vec<SarifRun>,
}

#[derive(Serialize, Deserialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize, Deserialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize, Deserialize)]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize, Deserialize)]
struct SarifRule {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    default_config: SarifRuleConfig,
}

#[derive(Serialize, Deserialize)]
struct SarifRuleConfig {
    level: String,
}

#[derive(Serialize, Deserialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Serialize, Deserialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize, Deserialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize, Deserialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifact,
    region: SarifRegion,
}

#[derive(Serialize, Deserialize)]
struct SarifArtifact {
    uri: String,
}

#[derive(Serialize, Deserialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
}

fn short_description(kind: SmellKind) -> &'static str {
    match kind {
        SmellKind::LongMethod => "Method body spans too many lines",
        SmellKind::DeepNesting => "Control flow nested too deeply",
        SmellKind::UnusedImport => "Import never referenced",
        SmellKind::MagicNumber => "Unnamed numeric literal",
        SmellKind::GodClass => "Class too large or with too many methods",
        SmellKind::StringConcatInLoop => "String built by concatenation inside a loop",
        SmellKind::EmptyCatchBlock => "Exception caught and silently dropped",
        SmellKind::ParsingError => "Source could not be parsed",
        SmellKind::NoIssuesFound => "No code smells detected",
    }
}

fn map_severity_to_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium | Severity::Low => "warning",
        Severity::Info => "note",
    }
}

fn make_relative_path(file_path: &str, base_path: &Path) -> String {
    if base_path.as_os_str().is_empty() {
        return file_path.to_string();
    }

    let file = Path::new(file_path);

    // Single file scan
    if file == base_path {
        return file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string());
    }

    file.strip_prefix(base_path)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string())
}

/// Render results as SARIF. "No Issues Found" markers produce no result.
pub fn to_sarif(base_path: &Path, report: &ScanReport) -> anyhow::Result<String> {
    let mut kinds: Vec<SmellKind> = Vec::new();
    let mut results = Vec::new();

    for file in &report.files {
        for finding in &file.findings {
            if finding.kind == SmellKind::NoIssuesFound {
                continue;
            }
            if !kinds.contains(&finding.kind) {
                kinds.push(finding.kind);
            }
            results.push(SarifResult {
                rule_id: finding.kind.id().to_string(),
                level: map_severity_to_level(finding.severity).to_string(),
                message: SarifMessage {
                    text: finding.description.clone(),
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifact {
                            uri: make_relative_path(&file.file, base_path),
                        },
                        region: SarifRegion {
                            start_line: finding.line().filter(|l| *l > 0).unwrap_or(1),
                        },
                    },
                }],
            });
        }
    }

    let rules = kinds
        .into_iter()
        .map(|kind| SarifRule {
            id: kind.id().to_string(),
            name: kind.as_str().to_string(),
            short_description: SarifMessage {
                text: short_description(kind).to_string(),
            },
            default_config: SarifRuleConfig {
                level: map_severity_to_level(kind.severity()).to_string(),
            },
        })
        .collect();

    let sarif = SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    };

    Ok(serde_json::to_string_pretty(&sarif)?)
}

/// Write results in SARIF format.
pub fn write_sarif(base_path: &Path, report: &ScanReport) -> anyhow::Result<()> {
    println!("{}", to_sarif(base_path, report)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(report: &ScanReport, fail_on: Severity) {
    // Header
    println!();
    print!("  ");
    print!("{}", "smellscan".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", report.path);
    print!("  {}", "Files:    ".dimmed());
    println!("{}", report.files.len());
    println!();

    for file in &report.files {
        write_file(file);
    }

    if !report.errors.is_empty() {
        println!("  {} ({}):", "Errors".red().bold(), report.errors.len());
        for e in &report.errors {
            println!("    {}  {}", e.file.blue(), e.error);
        }
        println!();
    }

    write_summary(report);
    println!();

    print!("  {}", format!("Fail on: {}", fail_on).dimmed());
    print!("  ");
    if report.fails(fail_on) {
        print!("{}", "FAILED".red());
    } else {
        print!("{}", "PASSED".green());
    }
    println!();
    println!();
}

fn write_file(file: &FileReport) {
    println!("  {} ({}):", file.file.blue().bold(), file.findings.len());
    println!();

    for f in &file.findings {
        write_severity_tag(f.severity);
        print!("   ");
        print!("{:<30}", f.kind.as_str().dimmed());
        println!("{}", f.location.dimmed());

        // Description on next line, indented
        println!("            {}", f.description);
        println!();
    }
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Critical => print!("    {} ", "CRIT ".red().bold()),
        Severity::High => print!("    {} ", "HIGH ".red()),
        Severity::Medium => print!("    {} ", "MED  ".yellow()),
        Severity::Low => print!("    {} ", "LOW  ".blue()),
        Severity::Info => print!("    {} ", "INFO ".green()),
    }
}

fn write_summary(report: &ScanReport) {
    let counts = report.severity_counts();
    if counts.is_empty() {
        println!("  {}", "✓ No code smells detected".green());
        return;
    }

    println!("  {}", "Summary:".bold());
    for severity in Severity::ALL {
        if let Some(count) = counts.get(&severity) {
            let plural = if *count != 1 { "s" } else { "" };
            println!("    {:<10} {:>4} finding{}", severity.as_str(), count, plural);
        }
    }
}
