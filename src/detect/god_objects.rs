//! Detection of god classes.
//!
//! A class (or interface) is a god class when it spans too many lines or
//! declares too many methods directly. Both reasons are reported together
//! in one finding when both apply. Nested types are checked on their own
//! and their methods do not count towards the enclosing class.

use crate::analysis::{ClassUnit, SyntaxTree};

use super::{class_location, Finding, SmellKind, Thresholds};

/// Flag every class or interface over the size limits.
pub fn detect_god_classes(tree: &SyntaxTree, thresholds: &Thresholds) -> Vec<Finding> {
    tree.classes()
        .into_iter()
        .filter_map(|class| check_class(&class, thresholds))
        .collect()
}

fn check_class(class: &ClassUnit<'_>, thresholds: &Thresholds) -> Option<Finding> {
    let mut reasons = Vec::new();

    let line_count = class.line_count();
    if line_count > thresholds.max_class_lines {
        reasons.push(format!(
            "{} lines (exceeds {})",
            line_count, thresholds.max_class_lines
        ));
    }

    let method_count = class.methods().len();
    if method_count > thresholds.max_class_methods {
        reasons.push(format!(
            "{} methods (exceeds {})",
            method_count, thresholds.max_class_methods
        ));
    }

    if reasons.is_empty() {
        return None;
    }

    Some(Finding::new(
        SmellKind::GodClass,
        class_location(class.span().start_line, class.name()),
        format!(
            "Class '{}' is too large: {}. \
             God classes violate the Single Responsibility Principle and are hard to maintain. \
             Consider splitting into smaller, focused classes.",
            class.name(),
            reasons.join(", ")
        ),
    ))
}
