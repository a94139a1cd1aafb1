//! # sysfilter — in-memory filter database for system-call policy
//!
//! Callers build an evolving policy by repeatedly submitting rules of the
//! form "if syscall N is invoked and an optional conjunction of
//! per-argument predicates holds, take action A". [`FilterDb`] folds each
//! rule into a per-syscall decision tree that stays semantically
//! equivalent to the rules submitted so far, while eliminating redundant
//! subtrees and preferring the most inclusive (shortest) rule on overlap.
//!
//! Out of scope (external collaborators, not provided by this crate):
//! syscall-number resolution, kernel-program code generation from the
//! traversal contract, the public argument-marshalling API, persistence.
//!
//! ## Example
//!
//! ```
//! use sysfilter::FilterDb;
//! use sysfilter::normalize::RawPredicate;
//! use sysfilter_core::{Action, RawOp};
//!
//! let mut db = FilterDb::new(Action::Kill);
//! db.add(Action::Allow, 0 /* read */, &[]).unwrap();
//! db.add(Action::Deny, 1 /* write */, &[RawPredicate::new(0, RawOp::Eq, 2)]).unwrap();
//!
//! assert!(db.find(0).unwrap().root.is_empty());
//! assert!(db.find(1).unwrap().has_tree());
//! ```

pub mod config;
pub mod db;
pub(crate) mod env;
pub(crate) mod log;
pub mod merge;
pub mod normalize;
pub mod traverse;

pub use config::FilterConfig;
pub use db::FilterDb;
pub use traverse::{TraversedPredicate, TraversedRule};

pub use sysfilter_core;
