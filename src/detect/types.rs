//! Core types for detection results.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref LINE_LOCATION_RE: Regex = Regex::new(r"^Line (\d+)").unwrap();
}

/// Severity levels for findings, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(alias = "critical")]
    Critical,
    #[serde(alias = "high")]
    High,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "info")]
    Info,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }

    /// Whether this severity is at least as severe as `threshold`.
    pub fn is_at_least(&self, threshold: Severity) -> bool {
        *self <= threshold
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            "info" => Ok(Severity::Info),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Finding type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmellKind {
    #[serde(rename = "Long Method")]
    LongMethod,
    #[serde(rename = "Deep Nesting")]
    DeepNesting,
    #[serde(rename = "Unused Import")]
    UnusedImport,
    #[serde(rename = "Magic Number")]
    MagicNumber,
    #[serde(rename = "God Class")]
    GodClass,
    #[serde(rename = "String Concatenation in Loop")]
    StringConcatInLoop,
    #[serde(rename = "Empty Catch Block")]
    EmptyCatchBlock,
    #[serde(rename = "Parsing Error")]
    ParsingError,
    #[serde(rename = "No Issues Found")]
    NoIssuesFound,
}

impl SmellKind {
    /// The type tag as reported to consumers.
    pub fn as_str(&self) -> &'static str {
        match self {
            SmellKind::LongMethod => "Long Method",
            SmellKind::DeepNesting => "Deep Nesting",
            SmellKind::UnusedImport => "Unused Import",
            SmellKind::MagicNumber => "Magic Number",
            SmellKind::GodClass => "God Class",
            SmellKind::StringConcatInLoop => "String Concatenation in Loop",
            SmellKind::EmptyCatchBlock => "Empty Catch Block",
            SmellKind::ParsingError => "Parsing Error",
            SmellKind::NoIssuesFound => "No Issues Found",
        }
    }

    /// Stable machine identifier (used as SARIF rule id).
    pub fn id(&self) -> &'static str {
        match self {
            SmellKind::LongMethod => "long_method",
            SmellKind::DeepNesting => "deep_nesting",
            SmellKind::UnusedImport => "unused_import",
            SmellKind::MagicNumber => "magic_number",
            SmellKind::GodClass => "god_class",
            SmellKind::StringConcatInLoop => "string_concat_in_loop",
            SmellKind::EmptyCatchBlock => "empty_catch_block",
            SmellKind::ParsingError => "parsing_error",
            SmellKind::NoIssuesFound => "no_issues_found",
        }
    }

    /// Severity every finding of this type carries.
    pub fn severity(&self) -> Severity {
        match self {
            SmellKind::ParsingError => Severity::Critical,
            SmellKind::GodClass | SmellKind::EmptyCatchBlock => Severity::High,
            SmellKind::LongMethod | SmellKind::DeepNesting | SmellKind::StringConcatInLoop => {
                Severity::Medium
            }
            SmellKind::UnusedImport | SmellKind::MagicNumber => Severity::Low,
            SmellKind::NoIssuesFound => Severity::Info,
        }
    }
}

impl std::fmt::Display for SmellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single reported issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: SmellKind,
    pub location: String,
    pub severity: Severity,
    pub description: String,
}

impl Finding {
    /// A finding with the severity fixed for its type.
    pub fn new(kind: SmellKind, location: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
            severity: kind.severity(),
            description: description.into(),
        }
    }

    /// The single finding reported for source that does not parse.
    pub fn parsing_error() -> Self {
        Self::new(
            SmellKind::ParsingError,
            NO_LOCATION,
            "Failed to parse Java code. Please ensure the code is valid.",
        )
    }

    /// The single finding reported for clean source.
    pub fn no_issues() -> Self {
        Self::new(
            SmellKind::NoIssuesFound,
            NO_LOCATION,
            "Great! No code smells detected.",
        )
    }

    /// Line number parsed from a `"Line N ..."` location.
    pub fn line(&self) -> Option<usize> {
        LINE_LOCATION_RE
            .captures(&self.location)
            .and_then(|caps| caps[1].parse().ok())
    }
}

/// Location used when a finding refers to no particular line.
pub const NO_LOCATION: &str = "N/A";

/// `"Line N"`.
pub fn line_location(line: usize) -> String {
    format!("Line {}", line)
}

/// `"Line N (Method: name)"`.
pub fn method_location(line: usize, method: &str) -> String {
    format!("Line {} (Method: {})", line, method)
}

/// `"Line N (Class: name)"`.
pub fn class_location(line: usize, class: &str) -> String {
    format!("Line {} (Class: {})", line, class)
}
