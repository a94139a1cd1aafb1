//! The filter database: default action plus the ordered sequence of
//! syscall entries, and the top-level merge dispatch between a new rule
//! and whatever already exists for its syscall.
//!
//! Not internally synchronised: `add` takes `&mut self`, `find` takes
//! `&self` — mutators need exclusive access, readers need shared access,
//! and external synchronisation (a `Mutex<FilterDb>` at the caller) is
//! assumed rather than built in.

use crate::config::FilterConfig;
use crate::log::{dlog, dwarn, set_debug_logging};
use crate::merge::merge_node;
use crate::normalize::{normalize, NormalizedRule, RawPredicate};
use sysfilter_core::{Action, FilterError, Result, SyscallEntry};

/// In-memory filter database for system-call policy.
///
/// Teardown is ordinary `Drop`: every owned subtree is released exactly
/// once by Rust's ownership graph, with no explicit work-stack needed for
/// deep trees. A deeply skewed tree can't blow the stack on drop because
/// [`Level`](sysfilter_core::Level) is a flat `Vec` at every depth rather
/// than a chain of `Box`es — dropping a `Vec<DecisionNode>` drops its
/// elements iteratively, so the recursion depth a `Drop` glue walk incurs
/// is bounded by tree *depth* (at most `MAX_ARGS`), not by sibling count.
#[derive(Debug, Clone)]
pub struct FilterDb {
    default_action: Action,
    pub(crate) entries: Vec<SyscallEntry>,
    config: FilterConfig,
}

impl FilterDb {
    /// Create an empty database with the given default action.
    pub fn new(default_action: Action) -> Self {
        Self::with_config(default_action, FilterConfig::from_env())
    }

    pub fn with_config(default_action: Action, config: FilterConfig) -> Self {
        set_debug_logging(config.debug_logging);
        Self { default_action, entries: Vec::new(), config }
    }

    pub fn default_action(&self) -> Action {
        self.default_action
    }

    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// O(n) scan of the ordered syscall sequence. The list is sorted, so
    /// this could binary-search instead; a scan keeps `find` trivially,
    /// obviously correct and is cheap enough for a lookup table this size.
    pub fn find(&self, syscall_nr: u32) -> Option<&SyscallEntry> {
        self.entries.iter().find(|e| e.syscall_nr == syscall_nr)
    }

    fn find_index(&self, syscall_nr: u32) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by_key(&syscall_nr, |e| e.syscall_nr)
    }

    /// Normalise and merge a new rule for `syscall_nr` against whatever
    /// this database already holds for it.
    pub fn add(&mut self, action: Action, syscall_nr: u32, predicates: &[RawPredicate]) -> Result<()> {
        if self.config.max_syscall_entries != 0
            && self.entries.len() >= self.config.max_syscall_entries
            && self.find_index(syscall_nr).is_err()
        {
            return Err(FilterError::Invalid("database syscall-entry cap reached"));
        }

        // Build the whole incoming chain before any mutation of the
        // existing tree, so a rejected rule never leaves the database
        // half-updated.
        let rule = normalize(action, predicates)?;

        match self.find_index(syscall_nr) {
            Err(at) => {
                // Case A: new syscall.
                dlog!("syscall {}: new entry", syscall_nr);
                let mut entry = SyscallEntry::new(syscall_nr);
                match rule {
                    NormalizedRule::Unconditional(a) => entry.unconditional_action = Some(a),
                    NormalizedRule::Chain(chain) => entry.root = chain,
                }
                self.entries.insert(at, entry);
                Ok(())
            }
            Ok(idx) => self.add_to_existing(idx, rule, action),
        }
    }

    fn add_to_existing(&mut self, idx: usize, rule: NormalizedRule, action: Action) -> Result<()> {
        let entry = &mut self.entries[idx];

        if !entry.has_tree() {
            // Case B: existing entry already fires unconditionally; it is
            // at least as inclusive as any new rule. Discard and succeed.
            dlog!("syscall {}: already unconditional, discarding new rule", entry.syscall_nr);
            return Ok(());
        }

        match rule {
            NormalizedRule::Unconditional(a) => {
                // Case C: the new rule fires unconditionally and subsumes
                // everything. Free the existing tree (ordinary drop).
                dlog!("syscall {}: new rule is unconditional, replacing tree", entry.syscall_nr);
                entry.root = Vec::new();
                entry.unconditional_action = Some(a);
                Ok(())
            }
            NormalizedRule::Chain(chain) => {
                // Case D: both non-empty, walk in lockstep.
                let mut root = chain;
                let node = root.pop().ok_or_else(|| {
                    dwarn!("syscall {}: normalised chain was unexpectedly empty", entry.syscall_nr);
                    FilterError::Internal("normalised chain was unexpectedly empty")
                })?;
                merge_node(&mut entry.root, node, action)?;
                if entry.root.is_empty() {
                    // A disagreeing pair of leaves can collapse the whole
                    // tree during the merge above. Treat that the same as
                    // an explicit unconditional rule: record the action
                    // that caused the tree to empty, uniformly for every
                    // path that can reach "no tree remains".
                    dlog!("syscall {}: tree collapsed to empty, recording fallback action", entry.syscall_nr);
                    entry.unconditional_action = Some(action);
                }
                Ok(())
            }
        }
    }
}
