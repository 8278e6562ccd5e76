//! Detection of methods that span too many lines.

use crate::analysis::MethodUnit;

use super::{method_location, Finding, SmellKind, Thresholds};

/// Flag every method whose inclusive line span exceeds `max_method_lines`.
pub fn detect_long_methods(methods: &[MethodUnit<'_>], thresholds: &Thresholds) -> Vec<Finding> {
    let max = thresholds.max_method_lines;

    methods
        .iter()
        .filter(|method| method.line_count() > max)
        .map(|method| {
            Finding::new(
                SmellKind::LongMethod,
                method_location(method.start_line(), method.name()),
                format!(
                    "Method has {} lines, exceeds maximum of {} lines. \
                     Long methods are harder to understand and maintain. \
                     Consider extracting smaller methods.",
                    method.line_count(),
                    max
                ),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Severity;
    use crate::parser;

    /// A class with one method spanning exactly `lines` lines.
    fn method_of_lines(lines: usize) -> String {
        let mut src = String::from("class A {\n    void run() {\n");
        for i in 0..lines - 2 {
            src.push_str(&format!("        int v{} = 0;\n", i));
        }
        src.push_str("    }\n}\n");
        src
    }

    fn run(source: &str) -> Vec<Finding> {
        let tree = parser::parse(source).unwrap();
        detect_long_methods(&tree.methods(), &Thresholds::default())
    }

    #[test]
    fn test_thirty_lines_is_fine() {
        assert!(run(&method_of_lines(30)).is_empty());
    }

    #[test]
    fn test_thirty_one_lines_fires() {
        let findings = run(&method_of_lines(31));
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.kind, SmellKind::LongMethod);
        assert_eq!(f.severity, Severity::Medium);
        assert_eq!(f.location, "Line 2 (Method: run)");
        assert!(f
            .description
            .starts_with("Method has 31 lines, exceeds maximum of 30 lines."));
    }

    #[test]
    fn test_custom_limit() {
        let tree = parser::parse(&method_of_lines(10)).unwrap();
        let thresholds = Thresholds {
            max_method_lines: 9,
            ..Default::default()
        };
        assert_eq!(detect_long_methods(&tree.methods(), &thresholds).len(), 1);
    }

    #[test]
    fn test_constructors_are_not_methods() {
        let mut src = String::from("class A {\n    A() {\n");
        for i in 0..40 {
            src.push_str(&format!("        int v{} = 0;\n", i));
        }
        src.push_str("    }\n}\n");
        assert!(run(&src).is_empty());
    }
}
