//! Errors, mirroring `ksvc_core::error::KsvcError`'s hand-rolled shape —
//! this workspace never reaches for an error-derive crate, so neither does
//! this one.

use std::fmt;

/// The three ways a call into this crate can fail, carried as a proper
/// Rust error type instead of a negative-int return-code convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Bad caller input: duplicate argument index, or too many predicates.
    Invalid(&'static str),
    /// Allocation failed before any mutation began. Kept for contract
    /// parity with the original's return-code table even though safe
    /// Rust's allocator aborts rather than surfacing OOM here; see
    /// DESIGN.md.
    NoMemory,
    /// The merger reached a state the invariants say is unreachable.
    /// Reported rather than silently ignored so tests catch regressions.
    Internal(&'static str),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "invalid rule: {}", msg),
            Self::NoMemory => write!(f, "allocation failed"),
            Self::Internal(msg) => write!(f, "internal invariant violation: {}", msg),
        }
    }
}

impl std::error::Error for FilterError {}

impl FilterError {
    /// The original C return-code convention, for any future FFI boundary.
    pub fn code(&self) -> i32 {
        match self {
            Self::Invalid(_) => -1,
            Self::NoMemory => -2,
            Self::Internal(_) => -3,
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
