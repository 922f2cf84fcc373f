//! # lockstep_ast
//!
//! Syntax tree definitions for the lockstep comparator.
//!
//! This crate provides:
//! - [`Node`], [`NodeKind`], and [`NodeData`]: the tree element types
//! - [`Tree`]: an index arena owning all nodes of one parsed program
//! - [`Span`] and [`Position`]: source locations
//! - [`SourceFile`]: source text with an offset-to-(line, column) index
//! - [`PreOrder`]: the fixed deterministic traversal order
//!
//! Nodes are immutable after parse. A `Tree` addresses its nodes through
//! [`NodeId`] indices rather than references, so a whole tree can be shared
//! across threads behind an `Arc` without lifetime plumbing.

mod node;
mod preorder;
mod source;
mod span;

pub use node::{Node, NodeData, NodeId, NodeKind, PropertyKind, Tree};
pub use preorder::PreOrder;
pub use source::SourceFile;
pub use span::{Position, Span};
