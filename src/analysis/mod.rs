//! Syntax tree model and traversal.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Source text │────▶│ parser       │────▶│ SyntaxTree    │
//! └─────────────┘     │ (tree-sitter)│     │ (owned Nodes) │
//!                     └──────────────┘     └───────────────┘
//!                                                  │
//!                                      units + walk│
//!                                                  ▼
//!                                          ┌───────────────┐
//!                                          │ Detectors     │
//!                                          └───────────────┘
//! ```
//!
//! The tree is read-only once built. Unit views (`MethodUnit`, `ClassUnit`,
//! `ImportUnit`) borrow from it and live no longer than the tree.

mod tree;
mod units;
pub mod walk;

pub use tree::{Node, NodeKind, Payload, Span, SyntaxTree};
pub use units::{ClassUnit, ImportUnit, MethodUnit};
