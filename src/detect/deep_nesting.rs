//! Detection of deeply nested control flow.

use crate::analysis::{walk, MethodUnit};

use super::{method_location, Finding, SmellKind, Thresholds};

/// Flag every method whose if/for/while/do/switch nesting exceeds
/// `max_nesting_depth`.
pub fn detect_deep_nesting(methods: &[MethodUnit<'_>], thresholds: &Thresholds) -> Vec<Finding> {
    let max = thresholds.max_nesting_depth;
    let mut findings = Vec::new();

    for method in methods {
        let depth = walk::max_nesting_depth(method.node);
        if depth > max {
            findings.push(Finding::new(
                SmellKind::DeepNesting,
                method_location(method.start_line(), method.name()),
                format!(
                    "Method has nesting depth of {}, exceeds maximum of {}. \
                     Deep nesting makes code harder to read and maintain. \
                     Consider extracting nested logic into separate methods.",
                    depth, max
                ),
            ));
        }
    }

    findings
}
