//! Detection of empty catch blocks.

use crate::analysis::{walk, MethodUnit, Node, NodeKind, Payload};

use super::{line_location, Finding, SmellKind};

/// Flag every catch clause in a method whose block holds no statements.
///
/// Comments are not part of the tree, so a block holding only comments is
/// empty. A lone `;` is an empty statement and keeps the block non-empty.
pub fn detect_empty_catch_blocks(methods: &[MethodUnit<'_>]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for method in methods {
        for try_stmt in walk::find_all(method.node, |k| *k == NodeKind::TryStatement) {
            for clause in try_stmt.children_of(NodeKind::CatchClause) {
                if !is_empty_clause(clause) {
                    continue;
                }
                findings.push(Finding::new(
                    SmellKind::EmptyCatchBlock,
                    line_location(clause.span.start_line),
                    format!(
                        "Empty catch block for '{}'. \
                         Silently swallowing exceptions makes debugging difficult and hides bugs. \
                         At minimum, log the exception. Consider: throw new RuntimeException(e), \
                         logger.error(), or handle the exception appropriately.",
                        caught_type(clause)
                    ),
                ));
            }
        }
    }

    findings
}

fn is_empty_clause(clause: &Node) -> bool {
    clause
        .child(NodeKind::Block)
        .is_some_and(|body| body.children.is_empty())
}

fn caught_type(clause: &Node) -> &str {
    match &clause.payload {
        Payload::CatchType(name) => name,
        _ => "",
    }
}
