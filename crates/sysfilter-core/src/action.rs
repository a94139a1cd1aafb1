//! Policy verdicts a leaf decision node can carry.

/// The closed set of actions a matched rule can apply.
///
/// Mirrors the standard Linux seccomp action set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Allow the syscall to proceed.
    Allow,
    /// Deny the syscall without killing the caller (errno is generator-defined).
    Deny,
    /// Kill the calling thread.
    Kill,
    /// Kill the entire process.
    KillProcess,
    /// Force a `SIGSYS` trap.
    Trap,
    /// Allow the syscall but log it.
    Log,
    /// Fail the syscall with the given errno.
    Errno(u16),
    /// Notify a tracer and stop, carrying a caller-defined message value.
    Trace(u32),
}

impl Action {
    /// `true` for actions that still let the syscall complete normally.
    pub fn is_permissive(&self) -> bool {
        matches!(self, Action::Allow | Action::Log)
    }
}
