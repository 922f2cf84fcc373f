//! Pairwise node classification.
//!
//! Compares one node from each tree and reports whether they agree. The
//! comparison is shallow: only the two nodes' kinds and own payloads are
//! inspected, except where a mismatch is only meaningful in terms of the
//! immediate children (object literal properties, top-level statement
//! counts).

use std::fmt;

use lockstep_ast::{NodeData, NodeId, NodeKind, Tree};

/// Result of classifying a node pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The nodes agree structurally.
    Same,
    /// The nodes are of different kinds.
    TypeMismatch {
        left: NodeKind,
        right: NodeKind,
    },
    /// The nodes are of the same kind but carry different payloads.
    ValueMismatch {
        field: &'static str,
        left: String,
        right: String,
    },
}

impl Classification {
    /// Returns true for [`Classification::Same`].
    pub fn is_same(&self) -> bool {
        matches!(self, Classification::Same)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Same => write!(f, "the same"),
            Classification::TypeMismatch { left, right } => {
                write!(f, "not the same type: {left} and {right}")
            }
            Classification::ValueMismatch { field, left, right } => {
                write!(f, "not the same value ({field}): `{left}` and `{right}`")
            }
        }
    }
}

/// Classifies a pair of nodes, one from each tree.
pub fn classify(
    left_tree: &Tree,
    left_id: NodeId,
    right_tree: &Tree,
    right_id: NodeId,
) -> Classification {
    let left = left_tree.node(left_id);
    let right = right_tree.node(right_id);

    if left.kind != right.kind {
        return Classification::TypeMismatch {
            left: left.kind,
            right: right.kind,
        };
    }

    match left.kind {
        NodeKind::AssignExpression | NodeKind::BinaryExpression => {
            match (&left.data, &right.data) {
                (NodeData::Operator(a), NodeData::Operator(b)) if a != b => value_mismatch(
                    "operator",
                    a.clone(),
                    b.clone(),
                ),
                _ => Classification::Same,
            }
        }
        NodeKind::BooleanLiteral => match (&left.data, &right.data) {
            (NodeData::Bool(a), NodeData::Bool(b)) if a != b => {
                value_mismatch("value", a.to_string(), b.to_string())
            }
            _ => Classification::Same,
        },
        NodeKind::StringLiteral => match (&left.data, &right.data) {
            (NodeData::Str(a), NodeData::Str(b)) if a != b => {
                value_mismatch("value", a.clone(), b.clone())
            }
            _ => Classification::Same,
        },
        NodeKind::RegexLiteral => match (&left.data, &right.data) {
            (NodeData::Regex(a), NodeData::Regex(b)) if a != b => {
                value_mismatch("literal", a.clone(), b.clone())
            }
            _ => Classification::Same,
        },
        // Numeric literals compare by normalized value, so `1.0` and `1`
        // agree. The raw spellings are what get reported when they don't.
        NodeKind::NumberLiteral => match (&left.data, &right.data) {
            (
                NodeData::Number { value: a, raw: raw_a },
                NodeData::Number { value: b, raw: raw_b },
            ) if a != b => value_mismatch("literal", raw_a.clone(), raw_b.clone()),
            _ => Classification::Same,
        },
        NodeKind::Identifier | NodeKind::VariableDeclarator | NodeKind::FunctionDeclaration => {
            match (&left.data, &right.data) {
                (NodeData::Name(a), NodeData::Name(b)) if a != b => {
                    value_mismatch("name", a.clone(), b.clone())
                }
                _ => Classification::Same,
            }
        }
        NodeKind::ObjectLiteral => classify_object(left_tree, right_tree, left_id, right_id),
        NodeKind::Program => {
            let (a, b) = (left.children.len(), right.children.len());
            if a != b {
                value_mismatch("statement count", a.to_string(), b.to_string())
            } else {
                Classification::Same
            }
        }
        _ => Classification::Same,
    }
}

fn classify_object(
    left_tree: &Tree,
    right_tree: &Tree,
    left_id: NodeId,
    right_id: NodeId,
) -> Classification {
    let left = left_tree.node(left_id);
    let right = right_tree.node(right_id);

    if left.children.len() != right.children.len() {
        return value_mismatch(
            "property count",
            left.children.len().to_string(),
            right.children.len().to_string(),
        );
    }

    for (&lc, &rc) in left.children.iter().zip(&right.children) {
        let lp = left_tree.node(lc);
        let rp = right_tree.node(rc);
        if let (
            NodeData::Property { key: lk, kind: lkind },
            NodeData::Property { key: rk, kind: rkind },
        ) = (&lp.data, &rp.data)
        {
            if lk != rk {
                return value_mismatch("key", lk.clone(), rk.clone());
            }
            if lkind != rkind {
                return value_mismatch(
                    "property kind",
                    lkind.to_string(),
                    rkind.to_string(),
                );
            }
        }
    }

    Classification::Same
}

fn value_mismatch(field: &'static str, left: String, right: String) -> Classification {
    Classification::ValueMismatch { field, left, right }
}
