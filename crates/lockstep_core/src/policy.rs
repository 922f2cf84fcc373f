//! Auto-skip resolution for type mismatches.
//!
//! When the two current nodes differ in kind, a small fixed table decides
//! whether one side may advance without asking the operator. This is a
//! resynchronization heuristic, not tree alignment: it moves at most one
//! side per step and never looks past the current node.

use lockstep_ast::NodeKind;

use crate::CompareConfig;

/// One of the two trees under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the 1-based display label used in prompts and reports.
    pub const fn label(&self) -> &'static str {
        match self {
            Side::Left => "1",
            Side::Right => "2",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The auto-skip table applied to type mismatches.
#[derive(Debug, Clone)]
pub struct DivergencePolicy {
    skip_blocks: bool,
}

impl DivergencePolicy {
    /// Builds the policy from a comparison config.
    pub fn new(config: &CompareConfig) -> Self {
        Self {
            skip_blocks: config.skip_blocks,
        }
    }

    /// Returns true if a node of this kind may be skipped unilaterally.
    pub fn is_skippable(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::EmptyStatement => true,
            NodeKind::BlockStatement => self.skip_blocks,
            _ => false,
        }
    }

    /// Resolves a type mismatch between the two current nodes.
    ///
    /// Returns the side to advance when exactly one side's kind is in the
    /// skip table. When neither or both qualify there is no safe unilateral
    /// choice and the decision escalates to arbitration.
    pub fn resolve(&self, left: NodeKind, right: NodeKind) -> Option<Side> {
        match (self.is_skippable(left), self.is_skippable(right)) {
            (true, false) => Some(Side::Left),
            (false, true) => Some(Side::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(skip_blocks: bool) -> DivergencePolicy {
        DivergencePolicy::new(&CompareConfig::new().skip_blocks(skip_blocks))
    }

    #[test]
    fn test_empty_statement_is_always_skippable() {
        assert!(policy(true).is_skippable(NodeKind::EmptyStatement));
        assert!(policy(false).is_skippable(NodeKind::EmptyStatement));
    }

    #[test]
    fn test_block_skippability_follows_config() {
        assert!(policy(true).is_skippable(NodeKind::BlockStatement));
        assert!(!policy(false).is_skippable(NodeKind::BlockStatement));
    }

    #[test]
    fn test_resolve_advances_the_skippable_side() {
        let p = policy(true);
        assert_eq!(
            p.resolve(NodeKind::EmptyStatement, NodeKind::Identifier),
            Some(Side::Left)
        );
        assert_eq!(
            p.resolve(NodeKind::Identifier, NodeKind::BlockStatement),
            Some(Side::Right)
        );
    }

    #[test]
    fn test_resolve_escalates_when_neither_side_qualifies() {
        let p = policy(true);
        assert_eq!(p.resolve(NodeKind::Identifier, NodeKind::NumberLiteral), None);
    }

    #[test]
    fn test_resolve_escalates_when_both_sides_qualify() {
        let p = policy(true);
        assert_eq!(
            p.resolve(NodeKind::EmptyStatement, NodeKind::BlockStatement),
            None
        );
    }

    #[test]
    fn test_side_labels() {
        assert_eq!(Side::Left.to_string(), "1");
        assert_eq!(Side::Right.to_string(), "2");
    }
}
