//! tree-sitter adapter for Java.

use tracing::{debug, warn};
use tree_sitter::{Language, Node as TsNode, Parser};

use super::{ParseError, Problem, Problems};
use crate::analysis::{Node, NodeKind, Payload, Span, SyntaxTree};

/// Declarations a compilation unit may hold at top level.
const TOP_LEVEL_KINDS: &[&str] = &[
    "package_declaration",
    "import_declaration",
    "module_declaration",
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Parents under which a `switch` is a statement rather than an expression.
const STATEMENT_PARENTS: &[&str] = &[
    "block",
    "constructor_body",
    "switch_block_statement_group",
    "labeled_statement",
    "if_statement",
    "for_statement",
    "enhanced_for_statement",
    "while_statement",
    "do_statement",
];

/// Longest source excerpt quoted in a problem message.
const MAX_SNIPPET: usize = 40;

pub struct JavaParser {
    language: Language,
}

impl JavaParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> Result<Parser, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Parse `source` into an owned tree.
    pub fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        let mut parser = self.create_parser()?;
        let tree = parser.parse(source, None).ok_or(ParseError::Aborted)?;
        let root = tree.root_node();

        let problems = collect_problems(root, source);
        if !problems.is_empty() {
            let problems = Problems(problems);
            warn!(count = problems.len(), %problems, "parsing failed");
            return Err(ParseError::Syntax(problems));
        }

        let converter = Converter { source };
        let converted = converter.convert(root).ok_or(ParseError::Aborted)?;
        debug!(
            nodes = count_nodes(&converted),
            bytes = source.len(),
            "parsed compilation unit"
        );
        Ok(SyntaxTree::new(source.to_string(), converted))
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Gather ERROR and MISSING nodes plus constructs that cannot appear at the
/// top of a compilation unit, sorted by position.
fn collect_problems(root: TsNode<'_>, source: &str) -> Vec<Problem> {
    let mut problems = Vec::new();

    if root.has_error() {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.is_missing() {
                problems.push(problem_at(node, format!("missing {:?}", node.kind())));
                continue;
            }
            if node.is_error() {
                let message = format!("unexpected {:?}", snippet(node_text(node, source)));
                problems.push(problem_at(node, message));
                continue;
            }
            if !node.has_error() {
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.is_extra() || child.has_error() || TOP_LEVEL_KINDS.contains(&child.kind()) {
            continue;
        }
        problems.push(problem_at(
            child,
            format!("{} is not allowed at top level", child.kind()),
        ));
    }

    problems.sort_by_key(|p| (p.line, p.column));
    problems
}

fn problem_at(node: TsNode<'_>, message: String) -> Problem {
    let start = node.start_position();
    Problem {
        line: start.row + 1,
        column: start.column + 1,
        message,
    }
}

fn snippet(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    if first_line.chars().count() > MAX_SNIPPET {
        let cut: String = first_line.chars().take(MAX_SNIPPET).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}

fn node_text<'s>(node: TsNode<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn count_nodes(root: &Node) -> usize {
    let mut count = 0;
    crate::analysis::walk::walk(root, |_| count += 1);
    count
}

/// Converts a tree-sitter tree into owned [`Node`]s.
struct Converter<'s> {
    source: &'s str,
}

/// A converted node whose children are still being converted.
struct Pending<'t> {
    node: Node,
    grammar_kind: &'static str,
    children: std::vec::IntoIter<TsNode<'t>>,
}

impl Converter<'_> {
    /// Convert the whole tree depth-first with an explicit stack.
    fn convert(&self, root: TsNode<'_>) -> Option<Node> {
        let mut stack = vec![self.open(root, None)];
        let mut finished = None;

        while let Some(top) = stack.last_mut() {
            if let Some(child) = top.children.next() {
                let parent = top.grammar_kind;
                stack.push(self.open(child, Some(parent)));
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let node = done.node;
            match stack.last_mut() {
                Some(parent) => {
                    debug_assert!(
                        parent.node.span.contains(&node.span),
                        "child span escapes its {} parent at {}",
                        parent.node.kind,
                        parent.node.span
                    );
                    parent.node.children.push(node);
                }
                None => finished = Some(node),
            }
        }

        finished
    }

    /// Convert a single node; its children are queued, not converted.
    fn open<'t>(&self, node: TsNode<'t>, parent: Option<&'static str>) -> Pending<'t> {
        let kind = self.kind_of(node, parent);
        let payload = self.payload_of(node, kind);

        let children: Vec<TsNode<'t>> = if is_leaf_kind(kind) {
            Vec::new()
        } else {
            let in_block = node.kind() == "block";
            let mut cursor = node.walk();
            let kept: Vec<_> = node
                .children(&mut cursor)
                .filter(|c| !c.is_extra())
                .filter(|c| c.is_named() || (in_block && c.kind() == ";"))
                .collect();
            kept
        };

        Pending {
            node: Node {
                kind,
                span: self.span_of(node),
                payload,
                children: Vec::with_capacity(children.len()),
            },
            grammar_kind: node.kind(),
            children: children.into_iter(),
        }
    }

    fn text(&self, node: TsNode<'_>) -> &str {
        node_text(node, self.source)
    }

    fn kind_of(&self, node: TsNode<'_>, parent: Option<&'static str>) -> NodeKind {
        match node.kind() {
            "program" => NodeKind::CompilationUnit,
            "package_declaration" => NodeKind::PackageDeclaration,
            "import_declaration" => NodeKind::ImportDeclaration,
            "class_declaration" => NodeKind::ClassDeclaration,
            "interface_declaration" => NodeKind::InterfaceDeclaration,
            "enum_declaration" => NodeKind::EnumDeclaration,
            "record_declaration" => NodeKind::RecordDeclaration,
            "class_body" | "interface_body" => NodeKind::ClassBody,
            "method_declaration" => NodeKind::MethodDeclaration,
            "constructor_declaration" => NodeKind::ConstructorDeclaration,
            "formal_parameter" => NodeKind::FormalParameter,
            "block" => NodeKind::Block,
            ";" if parent == Some("block") => NodeKind::EmptyStatement,
            "if_statement" => NodeKind::IfStatement,
            "for_statement" => NodeKind::ForStatement,
            "enhanced_for_statement" => NodeKind::EnhancedForStatement,
            "while_statement" => NodeKind::WhileStatement,
            "do_statement" => NodeKind::DoStatement,
            "switch_statement" => NodeKind::SwitchStatement,
            "switch_expression" => {
                if parent.is_some_and(|p| STATEMENT_PARENTS.contains(&p)) {
                    NodeKind::SwitchStatement
                } else {
                    NodeKind::SwitchExpression
                }
            }
            "try_statement" | "try_with_resources_statement" => NodeKind::TryStatement,
            "catch_clause" => NodeKind::CatchClause,
            "finally_clause" => NodeKind::FinallyClause,
            "assignment_expression" => NodeKind::AssignmentExpression,
            "binary_expression" => NodeKind::BinaryExpression,
            "unary_expression" => NodeKind::UnaryExpression,
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal" => {
                if self.text(node).ends_with(&['l', 'L'][..]) {
                    NodeKind::LongLiteral
                } else {
                    NodeKind::IntegerLiteral
                }
            }
            "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                NodeKind::DoubleLiteral
            }
            "string_literal" => NodeKind::StringLiteral,
            "identifier" => NodeKind::Identifier,
            other => NodeKind::Other(other),
        }
    }

    fn payload_of(&self, node: TsNode<'_>, kind: NodeKind) -> Payload {
        match kind {
            NodeKind::ClassDeclaration
            | NodeKind::InterfaceDeclaration
            | NodeKind::EnumDeclaration
            | NodeKind::RecordDeclaration
            | NodeKind::MethodDeclaration
            | NodeKind::ConstructorDeclaration
            | NodeKind::FormalParameter => node
                .child_by_field_name("name")
                .map(|n| Payload::Name(self.text(n).to_string()))
                .unwrap_or_default(),
            NodeKind::ImportDeclaration => self.import_payload(node),
            NodeKind::CatchClause => self.catch_payload(node),
            NodeKind::AssignmentExpression
            | NodeKind::BinaryExpression
            | NodeKind::UnaryExpression => node
                .child_by_field_name("operator")
                .map(|op| Payload::Operator(op.kind().to_string()))
                .unwrap_or_default(),
            NodeKind::IntegerLiteral
            | NodeKind::LongLiteral
            | NodeKind::DoubleLiteral
            | NodeKind::StringLiteral => Payload::Literal(self.text(node).to_string()),
            NodeKind::Identifier => Payload::Identifier(self.text(node).to_string()),
            _ => Payload::None,
        }
    }

    fn import_payload(&self, node: TsNode<'_>) -> Payload {
        let mut path = String::new();
        let mut is_static = false;
        let mut wildcard = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "static" => is_static = true,
                "asterisk" => wildcard = true,
                "identifier" | "scoped_identifier" if path.is_empty() => {
                    path = self.text(child).to_string();
                }
                _ => {}
            }
        }

        Payload::Import {
            path,
            is_static,
            wildcard,
        }
    }

    fn catch_payload(&self, node: TsNode<'_>) -> Payload {
        let mut cursor = node.walk();
        let catch_type = node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "catch_formal_parameter")
            .and_then(|param| {
                let mut param_cursor = param.walk();
                let found = param
                    .named_children(&mut param_cursor)
                    .find(|c| c.kind() == "catch_type");
                found
            })
            .map(|t| self.text(t).split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        Payload::CatchType(catch_type)
    }

    /// 1-based span with an inclusive end position.
    fn span_of(&self, node: TsNode<'_>) -> Span {
        let start = node.start_position();
        let end = node.end_position();
        let (start_byte, end_byte) = (node.start_byte(), node.end_byte());

        let (end_line, end_col) = if end_byte <= start_byte {
            (start.row + 1, start.column + 1)
        } else if end.column > 0 {
            (end.row + 1, end.column)
        } else {
            // The node ends with a line break; its last character is the
            // newline terminating the previous row.
            let last = end_byte - 1;
            let line_start = self.source[..last].rfind('\n').map_or(0, |i| i + 1);
            (end.row, last - line_start + 1)
        };

        Span {
            start_byte,
            end_byte,
            start_line: start.row + 1,
            start_col: start.column + 1,
            end_line,
            end_col,
        }
    }
}

/// Literals and identifiers are leaves even where the grammar nests
/// fragments inside them.
fn is_leaf_kind(kind: NodeKind) -> bool {
    kind.is_numeric_literal() || matches!(kind, NodeKind::StringLiteral | NodeKind::Identifier)
}
