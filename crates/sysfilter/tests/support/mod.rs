//! Test-only abstract evaluator, built entirely from public fields
//! (`SyscallEntry::root`/`unconditional_action`, `DecisionNode`'s public
//! fields). This is scaffolding for checking that merges keep behaving
//! correctly under repeated application and across unrelated syscalls —
//! it is not a library feature and ships nowhere near the `sysfilter`
//! crate's public surface, since evaluating a policy against live
//! syscalls is a downstream consumer's job, not this crate's.

use sysfilter::FilterDb;
use sysfilter_core::node::Level;
use sysfilter_core::{Action, DecisionNode};

/// Evaluate the decision tree for `syscall_nr` against concrete argument
/// values, falling back to the database default when nothing matches.
pub fn evaluate(db: &FilterDb, syscall_nr: u32, args: &[u64]) -> Action {
    match db.find(syscall_nr) {
        None => db.default_action(),
        Some(entry) => {
            if entry.root.is_empty() {
                entry.unconditional_action.unwrap_or_else(|| db.default_action())
            } else {
                eval_level(&entry.root, args).unwrap_or_else(|| db.default_action())
            }
        }
    }
}

fn eval_level(level: &Level, args: &[u64]) -> Option<Action> {
    level.iter().find_map(|node| eval_node(node, args))
}

fn eval_node(node: &DecisionNode, args: &[u64]) -> Option<Action> {
    let holds = node.predicate.holds(args[node.predicate.arg_index as usize]);
    let (child, is_action_side) =
        if holds { (&node.true_child, node.action_branch) } else { (&node.false_child, !node.action_branch) };

    if is_action_side {
        if let Some(action) = node.action {
            return Some(action);
        }
    }
    if !child.is_empty() {
        return eval_level(child, args);
    }
    None
}
