//! Detector thresholds.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_METHOD_LINES: usize = 30;
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 3;
pub const DEFAULT_MAX_CLASS_LINES: usize = 500;
pub const DEFAULT_MAX_CLASS_METHODS: usize = 10;
pub const DEFAULT_ACCEPTABLE_NUMBERS: [&str; 4] = ["0", "1", "-1", "2"];

/// Limits the detectors compare against.
///
/// Every limit is exclusive: a value equal to the limit is fine, one above
/// it is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Maximum lines per method (inclusive span).
    pub max_method_lines: usize,
    /// Maximum if/for/while/do/switch nesting inside a method.
    pub max_nesting_depth: usize,
    /// Maximum lines per class or interface.
    pub max_class_lines: usize,
    /// Maximum directly declared methods per class or interface.
    pub max_class_methods: usize,
    /// Numeric literal texts that are never magic.
    pub acceptable_numbers: Vec<String>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_method_lines: DEFAULT_MAX_METHOD_LINES,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_class_lines: DEFAULT_MAX_CLASS_LINES,
            max_class_methods: DEFAULT_MAX_CLASS_METHODS,
            acceptable_numbers: DEFAULT_ACCEPTABLE_NUMBERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Thresholds {
    /// Problems with these thresholds, empty when they are usable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (name, value) in [
            ("max_method_lines", self.max_method_lines),
            ("max_nesting_depth", self.max_nesting_depth),
            ("max_class_lines", self.max_class_lines),
            ("max_class_methods", self.max_class_methods),
        ] {
            if value == 0 {
                problems.push(format!("{} must be at least 1", name));
            }
        }

        for number in &self.acceptable_numbers {
            if !is_numeric_token(number) {
                problems.push(format!(
                    "acceptable_numbers entry '{}' is not a number",
                    number
                ));
            }
        }

        problems
    }

    pub fn is_acceptable(&self, candidate: &str) -> bool {
        self.acceptable_numbers.iter().any(|n| n == candidate)
    }
}

fn is_numeric_token(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits
            .chars()
            .all(|c| c.is_ascii_hexdigit() || matches!(c, '.' | '_' | 'x' | 'X'))
}
