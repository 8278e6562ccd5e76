//! smellscan - structural code smell detection for Java.
//!
//! smellscan parses one Java compilation unit at a time and reports
//! quality problems visible from syntax alone: long methods, deep nesting,
//! unused imports, magic numbers, god classes, string concatenation in
//! loops and empty catch blocks.
//!
//! # Architecture
//!
//! - `parser`: tree-sitter adapter producing an owned syntax tree
//! - `analysis`: tree model, unit views and the shared traversal kernel
//! - `detect`: the detectors, the finding model and the runner
//! - `config`: YAML configuration schema
//! - `report`: output formatting (pretty, JSON, SARIF)
//!
//! # Example
//!
//! ```
//! use smellscan::{Runner, SmellKind};
//!
//! let findings = Runner::default().analyze("class A { int twice(int x) { return x * 2; } }");
//! assert_eq!(findings[0].kind, SmellKind::NoIssuesFound);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod detect;
pub mod parser;
pub mod report;

pub use analysis::{ClassUnit, ImportUnit, MethodUnit, Node, NodeKind, Span, SyntaxTree};
pub use config::{Config, ConfigError};
pub use detect::{Detector, Finding, Runner, Severity, SmellKind, Thresholds};
pub use parser::{parse, ParseError};
