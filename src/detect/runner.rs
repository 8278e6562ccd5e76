//! Detection runner that orchestrates all checks.
//!
//! One analysis has three outcomes: the source does not parse (a single
//! "Parsing Error" finding, no detector runs), it parses and nothing is
//! found (a single "No Issues Found" finding), or it parses and the
//! findings of all detectors are returned in detector order.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::analysis::{MethodUnit, SyntaxTree};
use crate::parser;

use super::{
    detect_deep_nesting, detect_empty_catch_blocks, detect_god_classes, detect_long_methods,
    detect_magic_numbers, detect_string_concat_in_loops, detect_unused_imports, Finding,
    Thresholds,
};

/// The fixed set of detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detector {
    LongMethod,
    DeepNesting,
    UnusedImport,
    MagicNumber,
    GodClass,
    StringConcatInLoop,
    EmptyCatchBlock,
}

impl Detector {
    /// All detectors in the order their findings are reported.
    pub const ALL: [Detector; 7] = [
        Detector::LongMethod,
        Detector::DeepNesting,
        Detector::UnusedImport,
        Detector::MagicNumber,
        Detector::GodClass,
        Detector::StringConcatInLoop,
        Detector::EmptyCatchBlock,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Detector::LongMethod => "long-method",
            Detector::DeepNesting => "deep-nesting",
            Detector::UnusedImport => "unused-import",
            Detector::MagicNumber => "magic-number",
            Detector::GodClass => "god-class",
            Detector::StringConcatInLoop => "string-concat-in-loop",
            Detector::EmptyCatchBlock => "empty-catch-block",
        }
    }

    /// Run this detector over one parsed unit.
    pub fn detect(&self, unit: &AnalysisUnit<'_>, thresholds: &Thresholds) -> Vec<Finding> {
        match self {
            Detector::LongMethod => detect_long_methods(&unit.methods, thresholds),
            Detector::DeepNesting => detect_deep_nesting(&unit.methods, thresholds),
            Detector::UnusedImport => detect_unused_imports(unit.tree),
            Detector::MagicNumber => detect_magic_numbers(&unit.methods, thresholds),
            Detector::GodClass => detect_god_classes(unit.tree, thresholds),
            Detector::StringConcatInLoop => detect_string_concat_in_loops(unit.tree, &unit.methods),
            Detector::EmptyCatchBlock => detect_empty_catch_blocks(&unit.methods),
        }
    }
}

impl std::fmt::Display for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A parsed tree together with its method units, extracted once.
pub struct AnalysisUnit<'t> {
    pub tree: &'t SyntaxTree,
    pub methods: Vec<MethodUnit<'t>>,
}

impl<'t> AnalysisUnit<'t> {
    pub fn new(tree: &'t SyntaxTree) -> Self {
        Self {
            tree,
            methods: tree.methods(),
        }
    }
}

/// Outcome of analysing one file on disk.
#[derive(Debug)]
pub struct FileAnalysis {
    pub path: PathBuf,
    /// Findings, or why the file could not be read.
    pub result: anyhow::Result<Vec<Finding>>,
}

/// Executes all detectors against source texts.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    thresholds: Thresholds,
    parallel_detectors: bool,
}

impl Runner {
    /// Create a new detection runner.
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            parallel_detectors: false,
        }
    }

    /// Set whether the detectors of one tree run on the rayon pool.
    pub fn parallel_detectors(mut self, parallel: bool) -> Self {
        self.parallel_detectors = parallel;
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Analyse one translation unit.
    ///
    /// Never fails: a source that does not parse yields the single
    /// "Parsing Error" finding.
    pub fn analyze(&self, source: &str) -> Vec<Finding> {
        let tree = match parser::parse(source) {
            Ok(tree) => tree,
            Err(err) => {
                debug!(error = %err, "reporting parse failure as a finding");
                return vec![Finding::parsing_error()];
            }
        };

        let findings = self.run_detectors(&tree);
        if findings.is_empty() {
            return vec![Finding::no_issues()];
        }
        findings
    }

    /// Run every detector over a parsed tree, concatenating their findings
    /// in detector order. No deduplication happens.
    pub fn run_detectors(&self, tree: &SyntaxTree) -> Vec<Finding> {
        let unit = AnalysisUnit::new(tree);
        trace!(methods = unit.methods.len(), "running detectors");

        let per_detector: Vec<Vec<Finding>> = if self.parallel_detectors {
            Detector::ALL
                .par_iter()
                .map(|detector| detector.detect(&unit, &self.thresholds))
                .collect()
        } else {
            Detector::ALL
                .iter()
                .map(|detector| detector.detect(&unit, &self.thresholds))
                .collect()
        };

        for (detector, findings) in Detector::ALL.iter().zip(&per_detector) {
            debug!(detector = detector.name(), count = findings.len(), "detector finished");
        }

        per_detector.into_iter().flatten().collect()
    }

    /// Read and analyse a single file.
    pub fn analyze_file(&self, path: &Path) -> anyhow::Result<Vec<Finding>> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(self.analyze(&source))
    }

    /// Analyse files in parallel. Results are sorted by path.
    pub fn analyze_files(&self, files: &[PathBuf]) -> Vec<FileAnalysis> {
        let mut results: Vec<FileAnalysis> = files
            .par_iter()
            .map(|path| {
                debug!(file = %path.display(), "analysing");
                FileAnalysis {
                    path: path.clone(),
                    result: self.analyze_file(path),
                }
            })
            .collect();

        results.sort_by(|a, b| a.path.cmp(&b.path));
        results
    }
}
