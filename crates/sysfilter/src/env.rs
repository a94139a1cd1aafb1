//! Environment variable utilities, trimmed from `gvthread_core::env`.
//!
//! Same `env_get`/`env_get_bool` shape as `gvthread_core::env`; this crate
//! only needs the two, so `env_get_opt`/`env_get_str`/`env_is_set` were not
//! carried over.

use std::str::FromStr;

/// Get environment variable parsed as type `T`, or return `default`.
#[inline]
pub fn env_get<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Get environment variable as boolean. Accepts "1", "true", "yes", "on"
/// (case-insensitive) as true; everything else (including unset) is the
/// default.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => match val.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
