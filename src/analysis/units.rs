//! Borrowed views over declaration nodes.

use super::tree::{Node, NodeKind, Payload, Span};

/// A method declaration.
#[derive(Debug, Clone, Copy)]
pub struct MethodUnit<'t> {
    pub node: &'t Node,
}

impl<'t> MethodUnit<'t> {
    pub fn new(node: &'t Node) -> Self {
        Self { node }
    }

    pub fn name(&self) -> &'t str {
        self.node.name().unwrap_or("")
    }

    /// The body block; `None` for abstract and interface methods.
    pub fn body(&self) -> Option<&'t Node> {
        self.node.child(NodeKind::Block)
    }

    pub fn span(&self) -> Span {
        self.node.span
    }

    pub fn start_line(&self) -> usize {
        self.node.span.start_line
    }

    pub fn line_count(&self) -> usize {
        self.node.span.line_count()
    }
}

/// A class or interface declaration.
#[derive(Debug, Clone, Copy)]
pub struct ClassUnit<'t> {
    pub node: &'t Node,
}

impl<'t> ClassUnit<'t> {
    pub fn new(node: &'t Node) -> Self {
        Self { node }
    }

    pub fn name(&self) -> &'t str {
        self.node.name().unwrap_or("")
    }

    pub fn span(&self) -> Span {
        self.node.span
    }

    pub fn is_interface(&self) -> bool {
        self.node.kind == NodeKind::InterfaceDeclaration
    }

    pub fn line_count(&self) -> usize {
        self.node.span.line_count()
    }

    /// Methods declared directly in this type's body (constructors and
    /// methods of nested types excluded).
    pub fn methods(&self) -> Vec<MethodUnit<'t>> {
        self.node
            .child(NodeKind::ClassBody)
            .map(|body| {
                body.children_of(NodeKind::MethodDeclaration)
                    .map(MethodUnit::new)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// An import declaration.
#[derive(Debug, Clone, Copy)]
pub struct ImportUnit<'t> {
    pub node: &'t Node,
    path: &'t str,
    is_static: bool,
    wildcard: bool,
}

impl<'t> ImportUnit<'t> {
    /// View an import node; `None` if the node is not an import.
    pub fn new(node: &'t Node) -> Option<Self> {
        match &node.payload {
            Payload::Import {
                path,
                is_static,
                wildcard,
            } => Some(Self {
                node,
                path,
                is_static: *is_static,
                wildcard: *wildcard,
            }),
            _ => None,
        }
    }

    /// Fully qualified name as written, without `static` or `.*`.
    pub fn qualified_name(&self) -> &'t str {
        self.path
    }

    /// Last segment of the qualified name.
    pub fn simple_name(&self) -> &'t str {
        match self.path.rfind('.') {
            Some(pos) if pos > 0 => &self.path[pos + 1..],
            _ => self.path,
        }
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn span(&self) -> Span {
        self.node.span
    }
}
