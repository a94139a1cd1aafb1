//! Syscall entry: a syscall number paired with the root of its decision tree.

use crate::action::Action;
use crate::node::Level;

/// One entry in the database's ordered syscall sequence.
///
/// `root` empty means "no tree": either the syscall has never had a
/// conditional rule merged into it, or a merge collapsed its tree entirely
/// (two leaves disagreeing on the same predicate removes both). When
/// `root` is empty, `unconditional_action` records the fallback action —
/// the last successfully merged rule's action — that now applies
/// unconditionally; it is meaningless and kept cleared while `root` is
/// non-empty. See DESIGN.md for why both "no tree" paths share one field
/// instead of two separate representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyscallEntry {
    pub syscall_nr: u32,
    pub root: Level,
    pub unconditional_action: Option<Action>,
}

impl SyscallEntry {
    pub fn new(syscall_nr: u32) -> Self {
        Self { syscall_nr, root: Level::new(), unconditional_action: None }
    }

    pub fn has_tree(&self) -> bool {
        !self.root.is_empty()
    }
}
