//! Integration tests for the tree-sitter parser adapter.
//!
//! These tests check the structural invariants of converted trees against
//! the testdata fixtures.

use std::path::PathBuf;

use smellscan::analysis::{walk, Node, NodeKind};
use smellscan::parser::{self, ParseError};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn java_fixtures() -> Vec<(String, String)> {
    let mut fixtures: Vec<(String, String)> = std::fs::read_dir(testdata_path())
        .expect("should read testdata dir")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|e| e == "java").unwrap_or(false))
        .map(|p| {
            let name = p.file_name().unwrap().to_string_lossy().to_string();
            (name, std::fs::read_to_string(&p).unwrap())
        })
        .collect();
    fixtures.sort();
    fixtures
}

fn valid_fixtures() -> Vec<(String, String)> {
    java_fixtures()
        .into_iter()
        .filter(|(name, _)| name != "Broken.java")
        .collect()
}

#[test]
fn test_fixtures_parse() {
    let fixtures = valid_fixtures();
    assert!(fixtures.len() >= 5);
    for (name, source) in fixtures {
        assert!(parser::parse(&source).is_ok(), "{} should parse", name);
    }
}

#[test]
fn test_children_within_parent_spans() {
    for (name, source) in valid_fixtures() {
        let tree = parser::parse(&source).unwrap();
        walk::walk(tree.root(), |node: &Node| {
            for child in &node.children {
                assert!(
                    node.span.contains(&child.span),
                    "{}: {} at {} escapes {} at {}",
                    name,
                    child.kind,
                    child.span,
                    node.kind,
                    node.span
                );
                assert!(child.span.start_line >= node.span.start_line);
                assert!(child.span.end_line <= node.span.end_line);
            }
        });
    }
}

#[test]
fn test_spans_are_one_based_and_ordered() {
    for (name, source) in valid_fixtures() {
        let tree = parser::parse(&source).unwrap();
        let line_count = source.lines().count();
        walk::walk(tree.root(), |node: &Node| {
            let span = node.span;
            assert!(span.start_line >= 1 && span.start_col >= 1, "{}: {:?}", name, span);
            assert!(span.end_line >= span.start_line, "{}: {:?}", name, span);
            assert!(span.end_line <= line_count.max(1), "{}: {:?}", name, span);
        });
    }
}

#[test]
fn test_literals_and_identifiers_are_leaves() {
    for (_, source) in valid_fixtures() {
        let tree = parser::parse(&source).unwrap();
        let leaves = walk::find_all(tree.root(), |k| {
            k.is_numeric_literal() || matches!(k, NodeKind::StringLiteral | NodeKind::Identifier)
        });
        assert!(!leaves.is_empty());
        for leaf in leaves {
            assert!(leaf.is_leaf(), "{} has children", leaf.kind);
        }
    }
}

#[test]
fn test_method_span_matches_source() {
    let source = std::fs::read_to_string(testdata_path().join("ConcatLoop.java")).unwrap();
    let tree = parser::parse(&source).unwrap();
    let methods = tree.methods();
    assert_eq!(methods.len(), 1);

    let join = methods[0];
    assert_eq!(join.name(), "join");
    assert_eq!(join.span().start_line, 4);
    assert_eq!(join.span().end_line, 10);
    assert_eq!(join.line_count(), 7);
    assert!(tree.text(join.node).starts_with("public String join("));
    assert!(tree.text(join.node).ends_with('}'));
}

#[test]
fn test_units_of_order_processor() {
    let source = std::fs::read_to_string(testdata_path().join("OrderProcessor.java")).unwrap();
    let tree = parser::parse(&source).unwrap();

    let imports: Vec<_> = tree.imports().iter().map(|i| i.qualified_name()).collect();
    assert_eq!(
        imports,
        vec!["java.util.ArrayList", "java.util.HashMap", "java.util.List"]
    );

    let classes = tree.classes();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name(), "OrderProcessor");
    let names: Vec<_> = classes[0].methods().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["total", "summary", "save", "write"]);
}

#[test]
fn test_broken_fixture_reports_problems() {
    let source = std::fs::read_to_string(testdata_path().join("Broken.java")).unwrap();
    match parser::parse(&source) {
        Err(ParseError::Syntax(problems)) => {
            assert!(!problems.is_empty());
            for problem in problems.iter() {
                assert!(problem.line >= 1);
            }
        }
        other => panic!("expected syntax error, got {:?}", other.map(|_| ())),
    }
}
