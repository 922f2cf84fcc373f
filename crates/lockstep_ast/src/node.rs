//! Node and tree definitions.
//!
//! A [`Tree`] owns every node of one parsed program in an index arena.
//! Children are stored as ordered [`NodeId`] lists, so the traversal order
//! is fully determined by the tree itself. Nodes are never mutated after
//! the parse completes.

use serde::Serialize;

use crate::Span;

/// The kind tag of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Program,
    VariableDeclaration,
    VariableDeclarator,
    EmptyStatement,
    BlockStatement,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    ReturnStatement,
    FunctionDeclaration,
    AssignExpression,
    BinaryExpression,
    UnaryExpression,
    CallExpression,
    MemberExpression,
    Identifier,
    NumberLiteral,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,
    RegexLiteral,
    ArrayLiteral,
    ObjectLiteral,
    Property,
}

impl NodeKind {
    /// Returns the kind name as a static string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::VariableDeclarator => "VariableDeclarator",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::AssignExpression => "AssignExpression",
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::UnaryExpression => "UnaryExpression",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::MemberExpression => "MemberExpression",
            NodeKind::Identifier => "Identifier",
            NodeKind::NumberLiteral => "NumberLiteral",
            NodeKind::StringLiteral => "StringLiteral",
            NodeKind::BooleanLiteral => "BooleanLiteral",
            NodeKind::NullLiteral => "NullLiteral",
            NodeKind::RegexLiteral => "RegexLiteral",
            NodeKind::ArrayLiteral => "ArrayLiteral",
            NodeKind::ObjectLiteral => "ObjectLiteral",
            NodeKind::Property => "Property",
        }
    }

    /// Returns true for kinds whose spans typically cover many statements.
    ///
    /// Rendering truncates excerpts of these kinds to keep prompts readable.
    pub const fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Program
                | NodeKind::FunctionDeclaration
                | NodeKind::BlockStatement
                | NodeKind::ExpressionStatement
                | NodeKind::CallExpression
                | NodeKind::IfStatement
                | NodeKind::WhileStatement
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The property kind of an object-literal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyKind {
    /// Plain `key: value`.
    Init,
    /// Getter accessor.
    Get,
    /// Setter accessor.
    Set,
}

impl PropertyKind {
    /// Returns the property kind name as a static string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Init => "init",
            PropertyKind::Get => "get",
            PropertyKind::Set => "set",
        }
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific node payload.
///
/// Only the fields the comparator inspects are stored; everything else is
/// represented structurally through children.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum NodeData {
    #[default]
    None,
    /// Operator token of a binary, assignment, or unary expression.
    Operator(String),
    /// Name of an identifier or variable declarator.
    Name(String),
    /// Boolean literal value.
    Bool(bool),
    /// Decoded string literal value.
    Str(String),
    /// Numeric literal: normalized value plus the raw source text.
    Number { value: f64, raw: String },
    /// Raw text of a regular-expression literal, including delimiters.
    Regex(String),
    /// Object-literal property signature.
    Property { key: String, kind: PropertyKind },
}

/// Identifier of a node within its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Returns the arena index of this id.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A node in the syntax tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// The kind of this node.
    pub kind: NodeKind,
    /// Byte span in the source text.
    pub span: Span,
    /// Ordered child nodes.
    pub children: Vec<NodeId>,
    /// Kind-specific payload.
    pub data: NodeData,
}

impl Node {
    /// Creates a node without payload or children.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            data: NodeData::None,
        }
    }

    /// Creates a node with a payload.
    pub fn with_data(kind: NodeKind, span: Span, data: NodeData) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            data,
        }
    }

    /// Creates a node with children.
    pub fn with_children(kind: NodeKind, span: Span, children: Vec<NodeId>) -> Self {
        Self {
            kind,
            span,
            children,
            data: NodeData::None,
        }
    }

    /// Returns true if this node has children.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// An index arena owning all nodes of one parsed program.
///
/// The root is set once by the builder (the parser) and the tree is frozen
/// afterwards. Nodes are pushed bottom-up, so the root is typically the
/// last node added.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Tree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its id.
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Marks the given node as the root of the tree.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Returns the root node id, if the tree has been built.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the node for the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
