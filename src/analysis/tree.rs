//! Owned syntax tree produced by the parser adapter.
//!
//! Nodes are a tagged variant: a [`NodeKind`] plus a kind-specific
//! [`Payload`], an exact source [`Span`] and their children in syntactic
//! order. Every node's span contains the spans of all of its children.

use std::fmt;

use super::units::{ClassUnit, ImportUnit, MethodUnit};
use super::walk;

/// Source location span with byte offsets and line/column positions.
///
/// Lines and columns are 1-based; the end position is inclusive (it points
/// at the last character of the node).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed, inclusive).
    pub end_line: usize,
    /// End column (1-indexed, inclusive).
    pub end_col: usize,
}

impl Span {
    /// Number of source lines covered, counting both ends.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Whether `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start_byte <= other.start_byte && other.end_byte <= self.end_byte
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Grammatical construct a node represents.
///
/// Constructs the detectors care about get their own variant; everything
/// else keeps the grammar's name in [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    PackageDeclaration,
    ImportDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    RecordDeclaration,
    ClassBody,
    MethodDeclaration,
    ConstructorDeclaration,
    FormalParameter,
    Block,
    EmptyStatement,
    IfStatement,
    ForStatement,
    EnhancedForStatement,
    WhileStatement,
    DoStatement,
    SwitchStatement,
    SwitchExpression,
    TryStatement,
    CatchClause,
    FinallyClause,
    AssignmentExpression,
    BinaryExpression,
    UnaryExpression,
    IntegerLiteral,
    LongLiteral,
    DoubleLiteral,
    StringLiteral,
    Identifier,
    Other(&'static str),
}

impl NodeKind {
    /// Whether entering this node adds one level of nesting.
    pub fn is_nesting(&self) -> bool {
        matches!(
            self,
            NodeKind::IfStatement
                | NodeKind::ForStatement
                | NodeKind::WhileStatement
                | NodeKind::DoStatement
                | NodeKind::SwitchStatement
        )
    }

    /// Classic loop statements (for, while, do).
    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            NodeKind::ForStatement | NodeKind::WhileStatement | NodeKind::DoStatement
        )
    }

    /// Integer, long and floating point literals.
    pub fn is_numeric_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::IntegerLiteral | NodeKind::LongLiteral | NodeKind::DoubleLiteral
        )
    }

    /// Declarations that form a class unit.
    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            NodeKind::ClassDeclaration | NodeKind::InterfaceDeclaration
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::CompilationUnit => "compilation-unit",
            NodeKind::PackageDeclaration => "package-declaration",
            NodeKind::ImportDeclaration => "import-declaration",
            NodeKind::ClassDeclaration => "class-declaration",
            NodeKind::InterfaceDeclaration => "interface-declaration",
            NodeKind::EnumDeclaration => "enum-declaration",
            NodeKind::RecordDeclaration => "record-declaration",
            NodeKind::ClassBody => "class-body",
            NodeKind::MethodDeclaration => "method-declaration",
            NodeKind::ConstructorDeclaration => "constructor-declaration",
            NodeKind::FormalParameter => "formal-parameter",
            NodeKind::Block => "block",
            NodeKind::EmptyStatement => "empty-statement",
            NodeKind::IfStatement => "if-statement",
            NodeKind::ForStatement => "for-statement",
            NodeKind::EnhancedForStatement => "enhanced-for-statement",
            NodeKind::WhileStatement => "while-statement",
            NodeKind::DoStatement => "do-statement",
            NodeKind::SwitchStatement => "switch-statement",
            NodeKind::SwitchExpression => "switch-expression",
            NodeKind::TryStatement => "try-statement",
            NodeKind::CatchClause => "catch-clause",
            NodeKind::FinallyClause => "finally-clause",
            NodeKind::AssignmentExpression => "assignment-expression",
            NodeKind::BinaryExpression => "binary-expression",
            NodeKind::UnaryExpression => "unary-expression",
            NodeKind::IntegerLiteral => "integer-literal",
            NodeKind::LongLiteral => "long-literal",
            NodeKind::DoubleLiteral => "double-literal",
            NodeKind::StringLiteral => "string-literal",
            NodeKind::Identifier => "identifier",
            NodeKind::Other(name) => name,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind-specific leaf data carried by a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    None,
    /// Declared name of a class, interface, method or parameter.
    Name(String),
    /// Identifier text.
    Identifier(String),
    /// Literal text exactly as written.
    Literal(String),
    /// Operator symbol of an assignment, binary or unary expression.
    Operator(String),
    /// Declared type of a catch parameter (multi-catch unions verbatim).
    CatchType(String),
    /// Imported name.
    Import {
        path: String,
        is_static: bool,
        wildcard: bool,
    },
}

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub payload: Payload,
    pub children: Vec<Node>,
}

impl Node {
    /// Declared name for declarations, identifier text for identifiers.
    pub fn name(&self) -> Option<&str> {
        match &self.payload {
            Payload::Name(name) | Payload::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Operator symbol for expressions that carry one.
    pub fn operator(&self) -> Option<&str> {
        match &self.payload {
            Payload::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// Literal text for literal nodes.
    pub fn literal(&self) -> Option<&str> {
        match &self.payload {
            Payload::Literal(text) => Some(text),
            _ => None,
        }
    }

    /// First direct child of the given kind.
    pub fn child(&self, kind: NodeKind) -> Option<&Node> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Direct children of the given kind, in order.
    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A parsed translation unit: the root node plus the source it came from.
///
/// Owned by the analysis call that produced it; unit views borrow from it.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    root: Node,
}

impl SyntaxTree {
    pub(crate) fn new(source: String, root: Node) -> Self {
        Self { source, root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text covered by a node of this tree.
    pub fn text(&self, node: &Node) -> &str {
        self.source
            .get(node.span.start_byte..node.span.end_byte)
            .unwrap_or("")
    }

    /// Method declarations in pre-order (first appearance).
    pub fn methods(&self) -> Vec<MethodUnit<'_>> {
        walk::find_all(&self.root, |k| *k == NodeKind::MethodDeclaration)
            .into_iter()
            .map(MethodUnit::new)
            .collect()
    }

    /// Class and interface declarations in pre-order, nested ones included.
    pub fn classes(&self) -> Vec<ClassUnit<'_>> {
        walk::find_all(&self.root, NodeKind::is_class_like)
            .into_iter()
            .map(ClassUnit::new)
            .collect()
    }

    /// Import declarations in source order.
    pub fn imports(&self) -> Vec<ImportUnit<'_>> {
        self.root
            .children_of(NodeKind::ImportDeclaration)
            .filter_map(ImportUnit::new)
            .collect()
    }
}
