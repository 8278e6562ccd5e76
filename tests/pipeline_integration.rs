//! Integration tests for the full analysis pipeline.
//!
//! These tests run the runner against the testdata fixtures and against
//! generated sources that sit exactly on the detector limits.

use std::path::PathBuf;

use smellscan::detect::{Finding, Runner, Severity, SmellKind};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(testdata_path().join(name)).expect("fixture should exist")
}

fn analyze(source: &str) -> Vec<Finding> {
    Runner::default().analyze(source)
}

fn kinds(findings: &[Finding]) -> Vec<SmellKind> {
    findings.iter().map(|f| f.kind).collect()
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn test_deep_if_chain_is_the_only_finding() {
    let findings = analyze(&fixture("DeepNesting.java"));
    assert_eq!(findings.len(), 1, "unexpected findings: {:?}", findings);
    assert_eq!(findings[0].kind, SmellKind::DeepNesting);
    assert_eq!(findings[0].severity, Severity::Medium);
    assert_eq!(findings[0].location, "Line 4 (Method: check)");
}

#[test]
fn test_unbalanced_braces_give_parsing_error() {
    let findings = analyze(&fixture("Broken.java"));
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, SmellKind::ParsingError);
    assert_eq!(findings[0].severity, Severity::Critical);
    assert_eq!(findings[0].location, "N/A");
    assert_eq!(
        findings[0].description,
        "Failed to parse Java code. Please ensure the code is valid."
    );
}

#[test]
fn test_clean_source_gives_no_issues() {
    for name in ["Clean.java", "SafeSave.java"] {
        let findings = analyze(&fixture(name));
        assert_eq!(findings.len(), 1, "{}: {:?}", name, findings);
        assert_eq!(findings[0].kind, SmellKind::NoIssuesFound);
        assert_eq!(findings[0].severity, Severity::Info);
        assert_eq!(findings[0].description, "Great! No code smells detected.");
    }
}

#[test]
fn test_compound_concat_in_for_loop() {
    let findings = analyze(&fixture("ConcatLoop.java"));
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, SmellKind::StringConcatInLoop);
    assert_eq!(findings[0].severity, Severity::Medium);
    assert_eq!(findings[0].location, "Line 7");
}

#[test]
fn test_order_processor_findings_in_detector_order() {
    let findings = analyze(&fixture("OrderProcessor.java"));
    assert_eq!(
        kinds(&findings),
        vec![
            SmellKind::UnusedImport,
            SmellKind::MagicNumber,
            SmellKind::MagicNumber,
            SmellKind::MagicNumber,
            SmellKind::StringConcatInLoop,
            SmellKind::StringConcatInLoop,
            SmellKind::EmptyCatchBlock,
        ]
    );

    let locations: Vec<&str> = findings.iter().map(|f| f.location.as_str()).collect();
    assert_eq!(
        locations,
        vec!["Line 4", "Line 13", "Line 15", "Line 16", "Line 25", "Line 25", "Line 34"]
    );
    assert!(findings[0].description.contains("'java.util.HashMap'"));
    assert!(findings[1].description.contains("'1.2'"));
    assert!(findings[6].description.contains("'java.io.IOException'"));
}

#[test]
fn test_analysis_is_deterministic() {
    let source = fixture("OrderProcessor.java");
    let runner = Runner::default();
    assert_eq!(runner.analyze(&source), runner.analyze(&source));
    assert_eq!(
        runner.analyze(&source),
        Runner::default().parallel_detectors(true).analyze(&source)
    );
}

// =============================================================================
// Boundaries
// =============================================================================

/// One class with a single method spanning exactly `lines` lines.
fn method_spanning(lines: usize) -> String {
    let mut src = String::from("class Report {\n    void build(StringBuilder sb) {\n");
    for _ in 0..lines - 2 {
        src.push_str("        sb.append(1);\n");
    }
    src.push_str("    }\n}\n");
    src
}

#[test]
fn test_long_method_boundary() {
    assert_eq!(kinds(&analyze(&method_spanning(30))), vec![SmellKind::NoIssuesFound]);

    let findings = analyze(&method_spanning(31));
    assert_eq!(kinds(&findings), vec![SmellKind::LongMethod]);
    assert_eq!(findings[0].location, "Line 2 (Method: build)");
}

fn nested_method(depth: usize) -> String {
    let mut body = String::from("flag = !flag;");
    for _ in 0..depth {
        body = format!("while (flag) {{ {} }}", body);
    }
    format!("class Loop {{\n    void spin(boolean flag) {{\n        {}\n    }}\n}}\n", body)
}

#[test]
fn test_deep_nesting_boundary() {
    assert_eq!(kinds(&analyze(&nested_method(3))), vec![SmellKind::NoIssuesFound]);
    assert_eq!(kinds(&analyze(&nested_method(4))), vec![SmellKind::DeepNesting]);
}

/// A class spanning exactly `lines` lines with `methods` empty methods.
fn class_spanning(lines: usize, methods: usize) -> String {
    let mut src = String::from("class Registry {\n");
    for i in 0..methods {
        src.push_str(&format!("    void handler{}() {{}}\n", i));
    }
    for i in 0..lines - methods - 2 {
        src.push_str(&format!("    private int slot{};\n", i));
    }
    src.push_str("}\n");
    src
}

#[test]
fn test_god_class_line_reason_only() {
    let findings = analyze(&class_spanning(501, 10));
    assert_eq!(kinds(&findings), vec![SmellKind::GodClass]);
    assert_eq!(findings[0].severity, Severity::High);
    assert_eq!(findings[0].location, "Line 1 (Class: Registry)");
    assert!(findings[0]
        .description
        .starts_with("Class 'Registry' is too large: 501 lines (exceeds 500). "));
}

#[test]
fn test_god_class_both_reasons() {
    let findings = analyze(&class_spanning(501, 11));
    assert_eq!(kinds(&findings), vec![SmellKind::GodClass]);
    assert!(findings[0]
        .description
        .starts_with("Class 'Registry' is too large: 501 lines (exceeds 500), 11 methods (exceeds 10). "));
}

#[test]
fn test_god_class_at_limit() {
    assert_eq!(
        kinds(&analyze(&class_spanning(500, 10))),
        vec![SmellKind::NoIssuesFound]
    );
}

// =============================================================================
// Detector properties
// =============================================================================

fn method_returning(expr: &str) -> String {
    format!("class Calc {{\n    double value() {{\n        return {};\n    }}\n}}\n", expr)
}

#[test]
fn test_acceptable_numbers_never_flagged() {
    for literal in ["0", "1", "-1", "2", "0.0", "1.0", "2.0"] {
        let findings = analyze(&method_returning(literal));
        assert_eq!(
            kinds(&findings),
            vec![SmellKind::NoIssuesFound],
            "{} should not be magic",
            literal
        );
    }
}

#[test]
fn test_magic_numbers_flagged() {
    for literal in ["3", "100", "0.08"] {
        let findings = analyze(&method_returning(literal));
        assert_eq!(kinds(&findings), vec![SmellKind::MagicNumber], "{}", literal);
        assert_eq!(findings[0].severity, Severity::Low);
        assert!(findings[0]
            .description
            .starts_with(&format!("Magic number '{}' found.", literal)));
    }
}

fn guarded_call(catch_body: &str) -> String {
    format!(
        "class Job {{\n    void run(Runnable task) {{\n        try {{\n            task.run();\n        }} catch (RuntimeException e) {{\n{}\n        }}\n    }}\n}}\n",
        catch_body
    )
}

#[test]
fn test_empty_catch_property() {
    let logged = analyze(&guarded_call("            System.err.println(e);"));
    assert_eq!(kinds(&logged), vec![SmellKind::NoIssuesFound]);

    let empty = analyze(&guarded_call(""));
    assert_eq!(kinds(&empty), vec![SmellKind::EmptyCatchBlock]);
    assert_eq!(empty[0].severity, Severity::High);
    assert_eq!(empty[0].location, "Line 5");

    let bare = analyze(&guarded_call("            ;"));
    assert_eq!(kinds(&bare), vec![SmellKind::NoIssuesFound]);
}

#[test]
fn test_import_used_on_same_line() {
    let findings = analyze("import java.util.List; class A { List<String> xs; }");
    assert_eq!(kinds(&findings), vec![SmellKind::NoIssuesFound]);

    let findings = analyze("import java.util.Map;\nclass A {}\n");
    assert_eq!(kinds(&findings), vec![SmellKind::UnusedImport]);
    assert!(findings[0]
        .description
        .starts_with("Import 'java.util.Map' is declared but never used."));
}

#[test]
fn test_duplicates_across_detectors_preserved() {
    // The same += is reported once per enclosing loop.
    let source = r##"
class Grid {
    String render(int n) {
        String out = "";
        for (int r = 0; r < n; r++) {
            for (int c = 0; c < n; c++) {
                out += "#";
            }
        }
        return out;
    }
}
"##;
    let findings = analyze(source);
    let concat: Vec<_> = findings
        .iter()
        .filter(|f| f.kind == SmellKind::StringConcatInLoop)
        .collect();
    assert_eq!(concat.len(), 2);
    assert_eq!(concat[0], concat[1]);
}
