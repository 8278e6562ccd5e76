//! Detection of string concatenation inside loops.
//!
//! Every for/while/do loop is checked on its own, including loops nested in
//! other loops, so an expression inside two loops is reported twice.
//! Whether a `+` builds a string is decided from its source text: it must
//! contain a double quote or the word "string" in any case.

use crate::analysis::{walk, MethodUnit, Node, NodeKind, SyntaxTree};

use super::{line_location, Finding, SmellKind};

const COMPOUND_MESSAGE: &str = "String concatenation using '+=' inside a loop is inefficient. \
     Each concatenation creates a new String object, leading to O(n²) performance. \
     Use StringBuilder for better performance: StringBuilder.append() is O(n).";

const BINARY_MESSAGE: &str = "String concatenation using '+' inside a loop may be inefficient. \
     Consider using StringBuilder.append() for better performance.";

/// Flag `+=` assignments and string-looking `+` expressions inside loops.
pub fn detect_string_concat_in_loops(
    tree: &SyntaxTree,
    methods: &[MethodUnit<'_>],
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for method in methods {
        walk::walk(method.node, |node| {
            if node.kind.is_loop() {
                check_loop(tree, node, &mut findings);
            }
        });
    }

    findings
}

fn check_loop(tree: &SyntaxTree, loop_node: &Node, findings: &mut Vec<Finding>) {
    for assign in walk::find_all(loop_node, |k| *k == NodeKind::AssignmentExpression) {
        if assign.operator() == Some("+=") {
            findings.push(Finding::new(
                SmellKind::StringConcatInLoop,
                line_location(assign.span.start_line),
                COMPOUND_MESSAGE,
            ));
        }
    }

    for binary in walk::find_all(loop_node, |k| *k == NodeKind::BinaryExpression) {
        if binary.operator() == Some("+") && looks_like_string(tree.text(binary)) {
            findings.push(Finding::new(
                SmellKind::StringConcatInLoop,
                line_location(binary.span.start_line),
                BINARY_MESSAGE,
            ));
        }
    }
}

fn looks_like_string(text: &str) -> bool {
    text.contains('"') || text.to_lowercase().contains("string")
}
