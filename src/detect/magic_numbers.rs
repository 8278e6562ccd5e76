//! Detection of magic numbers in method bodies.

use crate::analysis::{walk, MethodUnit, Node, NodeKind};

use super::{line_location, Finding, SmellKind, Thresholds};

/// Flag every numeric literal in a method body that is not an acceptable
/// number.
///
/// Negative literals are a unary minus applied to a positive literal, so
/// `-1` is checked as `1`.
pub fn detect_magic_numbers(methods: &[MethodUnit<'_>], thresholds: &Thresholds) -> Vec<Finding> {
    let mut findings = Vec::new();

    for method in methods {
        let Some(body) = method.body() else {
            continue;
        };

        walk::walk(body, |node| {
            if !node.kind.is_numeric_literal() {
                return;
            }
            let Some(value) = literal_value(node) else {
                return;
            };
            if is_acceptable(node.kind, value, thresholds) {
                return;
            }
            findings.push(Finding::new(
                SmellKind::MagicNumber,
                line_location(node.span.start_line),
                format!(
                    "Magic number '{}' found. Consider extracting to a named constant. \
                     Magic numbers make code harder to understand and maintain. \
                     Use descriptive constant names like 'MAX_RETRIES' or 'TAX_RATE'.",
                    value
                ),
            ));
        });
    }

    findings
}

/// Literal text as reported, with any long suffix removed.
fn literal_value(node: &Node) -> Option<&str> {
    let text = node.literal()?;
    Some(match node.kind {
        NodeKind::LongLiteral => text.trim_end_matches(&['l', 'L'][..]),
        _ => text,
    })
}

fn is_acceptable(kind: NodeKind, value: &str, thresholds: &Thresholds) -> bool {
    if thresholds.is_acceptable(value) {
        return true;
    }
    if kind != NodeKind::DoubleLiteral {
        return false;
    }
    thresholds.is_acceptable(&value.replace('.', ""))
        || canonical_double(value).is_some_and(|c| thresholds.is_acceptable(&c))
}

/// Plain decimal form of a floating literal: suffix dropped, trailing
/// fractional zeros and a dangling point removed (`2.50f` -> `2.5`,
/// `1.0` -> `1`). `None` for exponent and hex forms.
fn canonical_double(value: &str) -> Option<String> {
    let digits = value.trim_end_matches(&['f', 'F', 'd', 'D'][..]);
    if digits
        .chars()
        .any(|c| matches!(c, 'e' | 'E' | 'x' | 'X' | 'p' | 'P'))
    {
        return None;
    }
    if !digits.contains('.') {
        return Some(digits.to_string());
    }
    let trimmed = digits.trim_end_matches('0').trim_end_matches('.');
    Some(if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    })
}
