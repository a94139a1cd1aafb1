//! Minimal debug logging, trimmed down from `gvthread_core::kprint`.
//!
//! `gvthread_core::kprint` carries a log-level enum plus worker/gvthread
//! context fields because its output needs to be disambiguated across a
//! scheduler's concurrent workers. A `FilterDb` has no concurrent workers
//! of its own to disambiguate, so this keeps only what survives that
//! difference: a single enable flag, set once at construction from
//! [`FilterConfig`](crate::config::FilterConfig), gating `eprintln!`.
//!
//! The `debug-logging` feature (same name/purpose as
//! `gvthread-runtime`'s) controls whether the flag and its check compile
//! in at all; off, `debug_logging_enabled()` is a `const false` the
//! optimiser removes along with every `dlog!` call site.

use std::sync::atomic::{AtomicBool, Ordering};

cfg_if::cfg_if! {
    if #[cfg(feature = "debug-logging")] {
        static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

        /// Set once by `FilterDb::new`/`with_config`.
        pub fn set_debug_logging(enabled: bool) {
            DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
        }

        pub fn debug_logging_enabled() -> bool {
            DEBUG_ENABLED.load(Ordering::Relaxed)
        }
    } else {
        pub fn set_debug_logging(_enabled: bool) {}

        #[inline(always)]
        pub fn debug_logging_enabled() -> bool {
            false
        }
    }
}

/// Log a merge decision when debug logging is enabled. No-op otherwise.
macro_rules! dlog {
    ($($arg:tt)*) => {
        if $crate::log::debug_logging_enabled() {
            eprintln!("[sysfilter] {}", format!($($arg)*));
        }
    };
}

/// Report something worth a caller's attention regardless of the debug
/// flag — reserved for states that are unexpected rather than routine,
/// such as a merge falling back to an internal-error path. Unlike
/// `dlog!`, this is not gated on `debug_logging`: a policy author should
/// see it even with debug logging off.
macro_rules! dwarn {
    ($($arg:tt)*) => {
        eprintln!("[sysfilter] warning: {}", format!($($arg)*));
    };
}

pub(crate) use dlog;
pub(crate) use dwarn;

#[cfg(all(test, feature = "debug-logging"))]
mod tests {
    use super::*;

    #[test]
    fn flag_round_trips() {
        set_debug_logging(true);
        assert!(debug_logging_enabled());
        set_debug_logging(false);
        assert!(!debug_logging_enabled());
    }
}
