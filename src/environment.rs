//! Locked access to the process environment.
//!
//! Endpoint and token lookups read environment variables at runtime while
//! tests mutate them; every access goes through one mutex so the two never
//! interleave.

use std::env;
use std::ffi::OsStr;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn lock() -> MutexGuard<'static, ()> {
    // The guarded value is `()`, so a poisoned lock carries no broken state.
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Set an environment variable while holding the global lock.
pub fn set_var<K: AsRef<OsStr>, V: AsRef<OsStr>>(key: K, value: V) {
    let _guard = lock();
    // SAFETY: the mutex serialises access to the unsynchronised std env calls.
    unsafe { env::set_var(key, value) };
}

/// Remove an environment variable while holding the global lock.
pub fn remove_var<K: AsRef<OsStr>>(key: K) {
    let _guard = lock();
    // SAFETY: the mutex serialises access to the unsynchronised std env calls.
    unsafe { env::remove_var(key) };
}

/// Read an environment variable while holding the global lock.
///
/// # Errors
///
/// Returns [`env::VarError`] when the variable is unset or contains invalid
/// Unicode.
pub fn var<K: AsRef<OsStr>>(key: K) -> Result<String, env::VarError> {
    let _guard = lock();
    env::var(key)
}

/// Read an environment variable, treating unset and empty values alike.
#[must_use]
pub fn non_empty_var<K: AsRef<OsStr>>(key: K) -> Option<String> {
    var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn set_and_remove_are_visible_to_var() {
        let key = "JOBBOARD_ENV_HELPER_TEST";
        set_var(key, "value");
        assert_eq!(var(key).expect("read var"), "value");
        remove_var(key);
        assert!(var(key).is_err());
    }

    #[test]
    #[serial]
    fn non_empty_var_ignores_blank_values() {
        let key = "JOBBOARD_ENV_HELPER_BLANK";
        set_var(key, "");
        assert_eq!(non_empty_var(key), None);
        set_var(key, "x");
        assert_eq!(non_empty_var(key).as_deref(), Some("x"));
        remove_var(key);
    }
}
