//! Database configuration, modeled on `gvthread_runtime::config::SchedulerConfig`:
//! compile-time defaults overridable via environment variables, plus a
//! builder. Nothing here is policy-semantic — the merge algorithm's
//! behaviour is fixed; these knobs are purely operational.

pub mod defaults {
    /// 0 disables the cap, matching the "0 disables" convention used
    /// elsewhere in this workspace's config types.
    pub const MAX_SYSCALL_ENTRIES: usize = 0;
    pub const DEBUG_LOGGING: bool = false;
}

use crate::env::{env_get, env_get_bool};

/// Configuration for a [`FilterDb`](crate::db::FilterDb).
///
/// # Configuration priority (highest wins)
///
/// 1. Environment variables (runtime)
/// 2. Library defaults
///
/// # Example
///
/// ```
/// use sysfilter::config::FilterConfig;
///
/// let config = FilterConfig::from_env().debug_logging(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// Soft cap on distinct syscall entries a database will accept before
    /// `add` returns `Invalid`. `0` means unbounded.
    pub max_syscall_entries: usize,
    /// Enable `dlog!`/`dwarn!` output on merge decisions.
    pub debug_logging: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl FilterConfig {
    /// Compile-time defaults with environment overrides.
    ///
    /// - `SYSFILTER_MAX_SYSCALL_ENTRIES` — soft cap on syscall entries (0 = unbounded)
    /// - `SYSFILTER_DEBUG` — enable debug logging (0/1)
    pub fn from_env() -> Self {
        Self {
            max_syscall_entries: env_get(
                "SYSFILTER_MAX_SYSCALL_ENTRIES",
                defaults::MAX_SYSCALL_ENTRIES,
            ),
            debug_logging: env_get_bool("SYSFILTER_DEBUG", defaults::DEBUG_LOGGING),
        }
    }

    pub fn max_syscall_entries(mut self, n: usize) -> Self {
        self.max_syscall_entries = n;
        self
    }

    pub fn debug_logging(mut self, enable: bool) -> Self {
        self.debug_logging = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unbounded_and_quiet() {
        std::env::remove_var("SYSFILTER_MAX_SYSCALL_ENTRIES");
        std::env::remove_var("SYSFILTER_DEBUG");
        let cfg = FilterConfig::from_env();
        assert_eq!(cfg.max_syscall_entries, 0);
        assert!(!cfg.debug_logging);
    }

    #[test]
    fn builder_overrides_defaults() {
        let cfg = FilterConfig::default().max_syscall_entries(16).debug_logging(true);
        assert_eq!(cfg.max_syscall_entries, 16);
        assert!(cfg.debug_logging);
    }
}
