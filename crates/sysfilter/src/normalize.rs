//! Rule normaliser.
//!
//! Rewrites a raw rule — an unordered, arbitrary-operator predicate list —
//! into a canonical chain: predicates sorted by argument index, operators
//! rewritten to the stored basis, each predicate's node carrying the
//! action-branch bit the rewrite produced. The entire chain is built here,
//! and this is the only place `Invalid` can be returned, before `merge`
//! ever touches the existing tree — so a rejected rule can't leave a
//! half-built chain for the merger to see.

use sysfilter_core::{Action, DecisionNode, FilterError, Level, Predicate, RawOp, Result, MAX_ARGS};

/// One raw, caller-submitted predicate: argument index, raw operator, datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPredicate {
    pub arg_index: u8,
    pub op: RawOp,
    pub datum: u64,
}

impl RawPredicate {
    pub fn new(arg_index: u8, op: RawOp, datum: u64) -> Self {
        Self { arg_index, op, datum }
    }
}

/// The outcome of normalisation: either the rule fires unconditionally
/// (zero predicates), or it produces a single-node root `Level` whose
/// chain of continuations ends in the leaf carrying `action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedRule {
    Unconditional(Action),
    Chain(Level),
}

/// Normalise a raw rule. `Invalid` on duplicate argument indices or a
/// predicate count beyond [`MAX_ARGS`].
pub fn normalize(action: Action, predicates: &[RawPredicate]) -> Result<NormalizedRule> {
    if predicates.len() > MAX_ARGS {
        return Err(FilterError::Invalid("predicate chain exceeds MAX_ARGS"));
    }
    if predicates.is_empty() {
        return Ok(NormalizedRule::Unconditional(action));
    }

    let mut sorted: Vec<RawPredicate> = predicates.to_vec();
    sorted.sort_by_key(|p| p.arg_index);
    for pair in sorted.windows(2) {
        if pair[0].arg_index == pair[1].arg_index {
            return Err(FilterError::Invalid("duplicate argument index in rule"));
        }
        if pair[0].arg_index as usize >= MAX_ARGS {
            return Err(FilterError::Invalid("argument index out of range"));
        }
    }
    if let Some(last) = sorted.last() {
        if last.arg_index as usize >= MAX_ARGS {
            return Err(FilterError::Invalid("argument index out of range"));
        }
    }

    // Build from the tail so each node owns the next as its continuation.
    let mut continuation: Level = Level::new();
    for (i, raw) in sorted.iter().enumerate().rev() {
        let normalized = raw.op.normalize();
        let predicate = Predicate::new(raw.arg_index, normalized.stored, raw.datum);
        let node = if i == sorted.len() - 1 {
            DecisionNode::leaf(predicate, action, normalized.action_branch)
        } else {
            DecisionNode::interior(predicate, normalized.action_branch, continuation)
        };
        continuation = vec![node];
    }

    Ok(NormalizedRule::Chain(continuation))
}
