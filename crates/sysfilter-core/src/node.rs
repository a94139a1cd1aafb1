//! Decision node and the level list it lives in.
//!
//! A C-style decision tree would link siblings with owning prev/next
//! pointers at each level; that shape doesn't translate cleanly into a
//! language with exclusive ownership, so here a level is just an ordered
//! `Vec` owned by whichever slot holds it. A [`Level`] is that sequence.

use crate::action::Action;
use crate::predicate::Predicate;

/// The ordered sequence of sibling alternatives at one depth and tree
/// position, sorted by `predicate.sibling_key()` with no duplicate keys.
/// An empty level means "no child here".
pub type Level = Vec<DecisionNode>;

/// One node of a per-syscall decision tree.
///
/// A node is a leaf iff `action.is_some()`. `action_branch` records, for
/// every node (leaf or interior), which side of its predicate is the
/// "action applies" side, set once at normalisation time and preserved
/// across merges — it is how the merger tells which branch an incoming
/// chain node continues on without needing to inspect which child slot
/// happens to be populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionNode {
    pub predicate: Predicate,
    pub action: Option<Action>,
    pub action_branch: bool,
    pub true_child: Level,
    pub false_child: Level,
    /// Merge-time bookkeeping only — not a lifetime control, nothing frees
    /// a node based on this count reaching zero.
    pub refcount: u32,
}

impl DecisionNode {
    /// A fresh interior node with its continuation attached on its own
    /// action-branch side, per normalisation.
    pub fn interior(predicate: Predicate, action_branch: bool, continuation: Level) -> Self {
        let mut node = Self {
            predicate,
            action: None,
            action_branch,
            true_child: Level::new(),
            false_child: Level::new(),
            refcount: 0,
        };
        if action_branch {
            node.true_child = continuation;
        } else {
            node.false_child = continuation;
        }
        node
    }

    /// A fresh leaf: the deepest node of a rule chain.
    pub fn leaf(predicate: Predicate, action: Action, action_branch: bool) -> Self {
        Self {
            predicate,
            action: Some(action),
            action_branch,
            true_child: Level::new(),
            false_child: Level::new(),
            refcount: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.action.is_some()
    }

    /// The child slot this node's own continuation (if interior) or
    /// action (if leaf) lives on, per `action_branch`.
    pub fn action_side(&self) -> &Level {
        if self.action_branch { &self.true_child } else { &self.false_child }
    }

    pub fn non_action_side(&self) -> &Level {
        if self.action_branch { &self.false_child } else { &self.true_child }
    }

    pub fn non_action_side_mut(&mut self) -> &mut Level {
        if self.action_branch { &mut self.false_child } else { &mut self.true_child }
    }

    /// A leaf's action-branch child is always absent — there is nothing
    /// left to continue matching once the action has fired.
    pub fn satisfies_leaf_discipline(&self) -> bool {
        !self.is_leaf() || self.action_side().is_empty()
    }
}

/// Find the index of a key in a sorted level, or where it would be
/// inserted to keep the level's ordering intact (mirrors `[T]::binary_search_by`).
pub fn find_key(level: &Level, key: (u8, crate::op::StoredOp)) -> Result<usize, usize> {
    level.binary_search_by_key(&key, |n| n.predicate.sibling_key())
}

/// Insert a node into a sorted level at the position its key requires.
/// Callers are expected to have resolved an equal-key match via the merge
/// cases before reaching here; a duplicate key at this point means the
/// merger's own case analysis missed a match, which is reported rather
/// than allowed to corrupt the level's ordering.
pub fn insert_sorted(level: &mut Level, node: DecisionNode) -> crate::error::Result<()> {
    match find_key(level, node.predicate.sibling_key()) {
        Ok(_) => Err(crate::error::FilterError::Internal(
            "insert_sorted: duplicate sibling key, merge logic should have matched it",
        )),
        Err(at) => {
            level.insert(at, node);
            Ok(())
        }
    }
}

/// Remove a sibling from a level. The removed node's owned subtrees go
/// with it and are dropped normally.
pub fn remove_sibling(level: &mut Level, at: usize) -> DecisionNode {
    level.remove(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::StoredOp;

    fn pred(arg: u8, op: StoredOp, datum: u64) -> Predicate {
        Predicate::new(arg, op, datum)
    }

    #[test]
    fn interior_attaches_continuation_on_own_action_branch_side() {
        let leaf = DecisionNode::leaf(pred(1, StoredOp::Eq, 9), Action::Allow, true);
        let node = DecisionNode::interior(pred(0, StoredOp::Eq, 7), true, vec![leaf.clone()]);
        assert_eq!(node.true_child, vec![leaf]);
        assert!(node.false_child.is_empty());
    }

    #[test]
    fn leaf_discipline_holds_for_fresh_leaf() {
        let leaf = DecisionNode::leaf(pred(0, StoredOp::Eq, 3), Action::Deny, true);
        assert!(leaf.satisfies_leaf_discipline());
    }

    #[test]
    fn leaf_can_carry_a_non_action_side_child() {
        // Merging a longer rule under a shorter leaf can leave that leaf
        // with a child on its non-action-branch side; only the
        // action-branch side is required to stay empty.
        let mut leaf = DecisionNode::leaf(pred(0, StoredOp::Eq, 3), Action::Allow, true);
        leaf.false_child = vec![DecisionNode::leaf(pred(1, StoredOp::Eq, 5), Action::Deny, true)];
        assert!(leaf.satisfies_leaf_discipline());
    }

    #[test]
    fn find_key_reports_insertion_point_when_absent() {
        let level = vec![
            DecisionNode::leaf(pred(0, StoredOp::Eq, 1), Action::Allow, true),
            DecisionNode::leaf(pred(2, StoredOp::Eq, 1), Action::Allow, true),
        ];
        assert_eq!(find_key(&level, (1, StoredOp::Eq)), Err(1));
        assert_eq!(find_key(&level, (0, StoredOp::Eq)), Ok(0));
    }
}
