//! Source parsing.
//!
//! Turns Java source text into an owned [`SyntaxTree`] or a [`ParseError`]
//! carrying every syntax problem tree-sitter recovered from. A partial tree
//! is never returned.

use std::fmt;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::analysis::SyntaxTree;

mod java;

pub use java::JavaParser;

/// A single syntax problem, positioned at 1-based line/column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// The problem list of a failed parse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Problems(pub Vec<Problem>);

impl Problems {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.0.iter()
    }
}

impl fmt::Display for Problems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", problem)?;
        }
        Ok(())
    }
}

/// Why a source text could not be turned into a tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source is not a valid compilation unit.
    #[error("invalid Java source: {0}")]
    Syntax(Problems),
    /// The grammar could not be loaded into the parser.
    #[error("failed to load Java grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    /// tree-sitter gave up without producing a tree.
    #[error("parser did not produce a tree")]
    Aborted,
}

impl ParseError {
    /// Syntax problems, empty for non-syntax failures.
    pub fn problems(&self) -> &[Problem] {
        match self {
            ParseError::Syntax(problems) => &problems.0,
            _ => &[],
        }
    }
}

static JAVA: Lazy<JavaParser> = Lazy::new(JavaParser::new);

/// Parse a Java compilation unit.
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    JAVA.parse(source)
}
