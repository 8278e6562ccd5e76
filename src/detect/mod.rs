//! Detection of code smells in parsed Java source.

mod deep_nesting;
mod empty_catch;
mod god_objects;
mod imports;
mod long_method;
mod magic_numbers;
mod runner;
mod string_concat;
mod thresholds;
mod types;

pub use deep_nesting::detect_deep_nesting;
pub use empty_catch::detect_empty_catch_blocks;
pub use god_objects::detect_god_classes;
pub use imports::detect_unused_imports;
pub use long_method::detect_long_methods;
pub use magic_numbers::detect_magic_numbers;
pub use runner::{AnalysisUnit, Detector, FileAnalysis, Runner};
pub use string_concat::detect_string_concat_in_loops;
pub use thresholds::{
    Thresholds, DEFAULT_ACCEPTABLE_NUMBERS, DEFAULT_MAX_CLASS_LINES, DEFAULT_MAX_CLASS_METHODS,
    DEFAULT_MAX_METHOD_LINES, DEFAULT_MAX_NESTING_DEPTH,
};
pub use types::{
    class_location, line_location, method_location, Finding, Severity, SmellKind, NO_LOCATION,
};
