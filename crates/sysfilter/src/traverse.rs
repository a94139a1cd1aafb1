//! Traversal contract for a downstream code generator: syscall entries
//! ascending, pre-order per tree, siblings grouped by level, every
//! predicate carrying its action-branch bit.
//!
//! This is a read-only walk that returns owned data — no iterator
//! borrowing the database, so a downstream consumer can buffer it however
//! it likes. Deliberately not an "evaluator": it describes the stored
//! structure, it never runs it against argument values — evaluating
//! syscall filters against live arguments belongs to whatever consumes
//! this output, not to this crate.

use crate::db::FilterDb;
use sysfilter_core::{Action, DecisionNode, Predicate};

/// One predicate on the path to a [`TraversedRule`]'s leaf, with the
/// action-branch bit the code generator needs to pick the jump direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversedPredicate {
    pub predicate: Predicate,
    pub action_branch: bool,
}

/// One fully-resolved path from a syscall's tree root to a leaf (or the
/// syscall's unconditional action, with an empty `path`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversedRule {
    pub syscall_nr: u32,
    pub path: Vec<TraversedPredicate>,
    pub action: Action,
}

impl FilterDb {
    /// Pre-order traversal of every entry's tree, in ascending syscall
    /// order, yielding one [`TraversedRule`] per leaf reached.
    pub fn traverse(&self) -> Vec<TraversedRule> {
        let mut out = Vec::new();
        for entry in &self.entries {
            if let Some(action) = entry.unconditional_action {
                if entry.root.is_empty() {
                    out.push(TraversedRule { syscall_nr: entry.syscall_nr, path: Vec::new(), action });
                    continue;
                }
            }
            let mut path = Vec::new();
            traverse_level(entry.syscall_nr, &entry.root, &mut path, &mut out);
        }
        out
    }
}

fn traverse_level(
    syscall_nr: u32,
    level: &[DecisionNode],
    path: &mut Vec<TraversedPredicate>,
    out: &mut Vec<TraversedRule>,
) {
    for node in level {
        traverse_node(syscall_nr, node, path, out);
    }
}

fn traverse_node(
    syscall_nr: u32,
    node: &DecisionNode,
    path: &mut Vec<TraversedPredicate>,
    out: &mut Vec<TraversedRule>,
) {
    path.push(TraversedPredicate { predicate: node.predicate, action_branch: node.action_branch });

    if let Some(action) = node.action {
        out.push(TraversedRule { syscall_nr, path: path.clone(), action });
    }
    if !node.true_child.is_empty() {
        traverse_level(syscall_nr, &node.true_child, path, out);
    }
    if !node.false_child.is_empty() {
        traverse_level(syscall_nr, &node.false_child, path, out);
    }

    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::RawPredicate;
    use sysfilter_core::RawOp;

    #[test]
    fn traverse_yields_ascending_syscall_order() {
        let mut db = FilterDb::new(Action::Deny);
        db.add(Action::Allow, 50, &[]).unwrap();
        db.add(Action::Allow, 10, &[]).unwrap();
        let rules = db.traverse();
        let nrs: Vec<u32> = rules.iter().map(|r| r.syscall_nr).collect();
        assert_eq!(nrs, vec![10, 50]);
    }

    #[test]
    fn traverse_reports_unconditional_rule_with_empty_path() {
        let mut db = FilterDb::new(Action::Deny);
        db.add(Action::Allow, 42, &[]).unwrap();
        let rules = db.traverse();
        assert_eq!(rules, vec![TraversedRule { syscall_nr: 42, path: Vec::new(), action: Action::Allow }]);
    }

    #[test]
    fn traverse_reports_full_predicate_path_with_branch_bits() {
        let mut db = FilterDb::new(Action::Deny);
        db.add(Action::Allow, 42, &[RawPredicate::new(0, RawOp::Eq, 7), RawPredicate::new(1, RawOp::Ne, 0)])
            .unwrap();
        let rules = db.traverse();
        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.action, Action::Allow);
        assert_eq!(rule.path.len(), 2);
        assert!(rule.path[0].action_branch);
        assert!(!rule.path[1].action_branch);
    }
}
