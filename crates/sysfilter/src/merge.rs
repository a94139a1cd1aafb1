//! Tree merger — folds a normalised rule chain into the existing decision
//! tree for its syscall.
//!
//! A pointer-walk over two linked lists (an incoming cursor and an
//! existing cursor stepping in lockstep) becomes recursion over owned
//! `Vec<DecisionNode>` levels instead: [`merge_node`] consumes one
//! incoming node (with its already-built subtree) against one existing
//! level. Recursing over owned vectors reaches the same fan-out a
//! pointer walk would, with no risk of aliasing two mutable references
//! into the same tree.

use crate::log::{dlog, dwarn};
use sysfilter_core::node::{find_key, insert_sorted, remove_sibling};
use sysfilter_core::{Action, DecisionNode, FilterError, Level, Result};

/// Merge one incoming chain node (owning its continuation subtree) into
/// an existing level, keeping it sorted with no duplicate sibling keys.
/// `action` is the rule's action, used only for log messages.
pub fn merge_node(existing: &mut Level, incoming: DecisionNode, action: Action) -> Result<()> {
    let key = incoming.predicate.sibling_key();
    match find_key(existing, key) {
        Err(_) => {
            // Case 1: keys differ. Graft the remainder of the incoming
            // chain as a new sibling; ends the walk for this subtree.
            dlog!("graft new sibling arg{} at key {:?}", incoming.predicate.arg_index, key);
            insert_sorted(existing, incoming)
        }
        Ok(idx) => {
            existing[idx].refcount += 1;
            merge_equal_key(existing, idx, incoming, action)
        }
    }
}

/// Keys equal (same arg-index and op): the incoming node lands on an
/// existing sibling instead of a fresh slot. Dispatches on the
/// leaf/interior shape of both sides to decide how the two combine.
fn merge_equal_key(existing: &mut Level, idx: usize, incoming: DecisionNode, action: Action) -> Result<()> {
    let ec_is_leaf = existing[idx].is_leaf();
    let c_is_leaf = incoming.is_leaf();

    match (ec_is_leaf, c_is_leaf) {
        (true, true) => {
            // 2a: both leaves.
            if existing[idx].action_branch == incoming.action_branch {
                dlog!("existing leaf already covers rule exactly, discarding new rule");
                // ec already covers this exactly; incoming is dropped.
            } else {
                dlog!("leaves disagree on branch, action now unconditional for this predicate; removing node");
                remove_sibling(existing, idx);
            }
            Ok(())
        }
        (true, false) => {
            // 2b: ec leaf, c internal.
            let incoming_branch = incoming.action_branch;
            let ec_branch = existing[idx].action_branch;
            if incoming_branch == ec_branch {
                dlog!("existing leaf already shorter on this side, discarding new rule's continuation");
                // ec is already shorter/more inclusive on that side.
            } else {
                let continuation = if incoming_branch { incoming.true_child } else { incoming.false_child };
                dlog!("attaching new rule's continuation on leaf's non-action side");
                *existing[idx].non_action_side_mut() = continuation;
            }
            Ok(())
        }
        (false, true) => {
            // 2c: c leaf, ec internal. The new rule is the shorter one:
            // promote ec to a leaf, freeing the subtree on its new
            // action-branch side (it becomes unreachable).
            dlog!("new rule is shorter, promoting existing node to leaf (action {:?})", action);
            let node = &mut existing[idx];
            if incoming.action_branch {
                node.true_child = Level::new();
            } else {
                node.false_child = Level::new();
            }
            node.action = incoming.action;
            node.action_branch = incoming.action_branch;
            Ok(())
        }
        (false, false) => {
            // 2d: both internal. Find which branch carries incoming's
            // continuation (normalisation guarantees exactly one side is
            // populated on a freshly built chain node).
            let incoming_on_true = !incoming.true_child.is_empty();
            let mut continuation = if incoming_on_true { incoming.true_child } else { incoming.false_child };
            let existing_branch =
                if incoming_on_true { &mut existing[idx].true_child } else { &mut existing[idx].false_child };

            if existing_branch.is_empty() {
                dlog!("grafting new rule's continuation onto existing internal node's empty branch");
                *existing_branch = continuation;
                Ok(())
            } else {
                // Exactly one node per level on a freshly built chain.
                let next = continuation.pop().ok_or_else(|| {
                    dwarn!("descent into existing tree: continuation level was unexpectedly empty");
                    FilterError::Internal("empty continuation level during descent")
                })?;
                if !continuation.is_empty() {
                    dwarn!("descent into existing tree: continuation level had more than one node");
                    return Err(FilterError::Internal("continuation level had more than one node"));
                }
                merge_node(existing_branch, next, action)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, NormalizedRule, RawPredicate};
    use sysfilter_core::RawOp;

    fn chain(action: Action, preds: &[(u8, RawOp, u64)]) -> Level {
        let raw: Vec<RawPredicate> = preds.iter().map(|&(a, o, d)| RawPredicate::new(a, o, d)).collect();
        match normalize(action, &raw).unwrap() {
            NormalizedRule::Chain(c) => c,
            NormalizedRule::Unconditional(_) => panic!("expected chain"),
        }
    }

    #[test]
    fn case1_keys_differ_grafts_sibling() {
        let mut level = chain(Action::Allow, &[(0, RawOp::Eq, 3)]);
        let incoming = chain(Action::Deny, &[(1, RawOp::Eq, 5)]).pop().unwrap();
        merge_node(&mut level, incoming, Action::Deny).unwrap();
        assert_eq!(level.len(), 2);
        assert_eq!(level[0].predicate.arg_index, 0);
        assert_eq!(level[1].predicate.arg_index, 1);
    }

    #[test]
    fn case2a_agreeing_branches_discards_new_rule() {
        let mut level = chain(Action::Allow, &[(0, RawOp::Eq, 3)]);
        let incoming = chain(Action::Deny, &[(0, RawOp::Eq, 3)]).pop().unwrap();
        merge_node(&mut level, incoming, Action::Deny).unwrap();
        assert_eq!(level.len(), 1);
        assert_eq!(level[0].action, Some(Action::Allow));
    }

    #[test]
    fn case2a_disagreeing_branches_removes_node() {
        let mut level = chain(Action::Allow, &[(0, RawOp::Eq, 3)]);
        let incoming = chain(Action::Deny, &[(0, RawOp::Ne, 3)]).pop().unwrap();
        merge_node(&mut level, incoming, Action::Deny).unwrap();
        assert!(level.is_empty());
    }

    #[test]
    fn case2c_shorter_rule_promotes_existing_to_leaf() {
        // A shorter rule submitted after a longer one prunes the deeper subtree.
        let mut level = chain(Action::Allow, &[(0, RawOp::Eq, 3), (1, RawOp::Eq, 9)]);
        let incoming = chain(Action::Allow, &[(0, RawOp::Eq, 3)]).pop().unwrap();
        merge_node(&mut level, incoming, Action::Allow).unwrap();
        assert_eq!(level.len(), 1);
        let node = &level[0];
        assert_eq!(node.action, Some(Action::Allow));
        assert!(node.action_branch);
        assert!(node.true_child.is_empty());
        assert!(node.false_child.is_empty());
    }

    #[test]
    fn case2d_both_internal_descends_and_grafts() {
        let mut level = chain(Action::Allow, &[(0, RawOp::Eq, 3), (1, RawOp::Eq, 9)]);
        let incoming = chain(Action::Deny, &[(0, RawOp::Eq, 3), (2, RawOp::Eq, 1)]).pop().unwrap();
        merge_node(&mut level, incoming, Action::Deny).unwrap();
        assert_eq!(level.len(), 1);
        let root = &level[0];
        assert_eq!(root.true_child.len(), 2);
        assert_eq!(root.true_child[0].predicate.arg_index, 1);
        assert_eq!(root.true_child[1].predicate.arg_index, 2);
    }
}
