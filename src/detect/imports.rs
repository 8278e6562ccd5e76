//! Detection of unused imports.
//!
//! The check is lexical: import declarations are blanked out of the source
//! and the imported simple name is searched for as a whole word in what
//! remains.
//! A name mentioned only in a comment or string literal therefore counts as
//! used.

use regex::Regex;

use crate::analysis::{ImportUnit, SyntaxTree};

use super::{line_location, Finding, SmellKind};

/// Flag every import whose simple name never appears outside import
/// declarations.
pub fn detect_unused_imports(tree: &SyntaxTree) -> Vec<Finding> {
    let imports = tree.imports();
    if imports.is_empty() {
        return Vec::new();
    }

    let body = blank_imports(tree.source(), &imports);
    let mut findings = Vec::new();

    for import in &imports {
        let name = import.simple_name();
        if name.is_empty() || is_referenced(&body, name) {
            continue;
        }
        findings.push(Finding::new(
            SmellKind::UnusedImport,
            line_location(import.span().start_line),
            format!(
                "Import '{}' is declared but never used. \
                 Unused imports clutter code and should be removed.",
                import.qualified_name()
            ),
        ));
    }

    findings
}

/// Source text with every import declaration replaced by spaces. Line
/// breaks are kept.
fn blank_imports(source: &str, imports: &[ImportUnit<'_>]) -> String {
    let ranges: Vec<_> = imports
        .iter()
        .map(|import| import.span().start_byte..import.span().end_byte)
        .collect();

    source
        .char_indices()
        .map(|(pos, c)| {
            if c != '\n' && ranges.iter().any(|r| r.contains(&pos)) {
                ' '
            } else {
                c
            }
        })
        .collect()
}

fn is_referenced(text: &str, name: &str) -> bool {
    match Regex::new(&format!(r"\b{}\b", regex::escape(name))) {
        Ok(re) => re.is_match(text),
        Err(err) => {
            tracing::warn!(name, %err, "cannot build import pattern; treating as used");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Severity;
    use crate::parser;

    fn run(source: &str) -> Vec<Finding> {
        detect_unused_imports(&parser::parse(source).unwrap())
    }

    #[test]
    fn test_unused_import_flagged() {
        let src = "import java.util.List;\nimport java.util.Map;\n\nclass A {\n    List<String> xs;\n}\n";
        let findings = run(src);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, "Line 2");
        assert_eq!(findings[0].severity, Severity::Low);
        assert!(findings[0].description.starts_with("Import 'java.util.Map' is declared"));
    }

    #[test]
    fn test_whole_word_match_only() {
        // "Lists" does not count as a use of "List"
        let src = "import java.util.List;\nclass A { Object Lists; }\n";
        assert_eq!(run(src).len(), 1);
    }

    #[test]
    fn test_mention_in_comment_counts_as_use() {
        let src = "import java.util.List;\n// a List of things\nclass A {}\n";
        assert!(run(src).is_empty());
    }

    #[test]
    fn test_mention_in_string_counts_as_use() {
        let src = "import java.util.List;\nclass A { String s = \"List\"; }\n";
        assert!(run(src).is_empty());
    }

    #[test]
    fn test_static_import_uses_member_name() {
        let src = "import static java.lang.Math.max;\nclass A { int m() { return max(1, 2); } }\n";
        assert!(run(src).is_empty());
    }

    #[test]
    fn test_wildcard_import_uses_package_segment() {
        let src = "import java.util.*;\nclass A { List<String> xs; }\n";
        let findings = run(src);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].description.contains("'java.util'"));
    }

    #[test]
    fn test_use_on_same_line_as_import() {
        assert!(run("import java.util.List; class A { List<String> xs; }").is_empty());
        let findings = run("import java.util.List; import java.util.Set; class A { Set<String> s; }");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].description.contains("'java.util.List'"));
    }

    #[test]
    fn test_other_import_mention_is_not_a_use() {
        let src = "import java.util.List;\nimport com.acme.List.Helper;\nclass A { Helper h; }\n";
        let findings = run(src);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, "Line 1");
    }

    #[test]
    fn test_no_imports() {
        assert!(run("class A {}").is_empty());
    }
}
