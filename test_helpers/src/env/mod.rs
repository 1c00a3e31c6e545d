//! Guards for mutating the process environment in tests.
//!
//! Every mutation is serialised by a global re-entrant mutex and returns an
//! RAII guard that puts back the previous value (or removes the variable)
//! when dropped. Guards for the same key restore in LIFO order.
//!
//! Hold an [`EnvScope`] when a test reads several variables and must not see
//! another test's writes in between.
//!
//! # Examples
//!
//! ```
//! use envfill_test_helpers::env;
//!
//! let _scope = env::scope([("APP_PORT", Some("8080")), ("APP_HOST", None)]);
//! assert_eq!(std::env::var("APP_PORT").as_deref(), Ok("8080"));
//! assert!(std::env::var("APP_HOST").is_err());
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Apply `value` to `key`, removing the variable when `value` is `None`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn apply(key: &str, value: Option<&OsStr>) {
    match value {
        Some(value) => unsafe { env::set_var(key, value) },
        None => unsafe { env::remove_var(key) },
    }
}

fn mutate_locked(
    key: String,
    value: Option<&OsStr>,
    _guard: &ReentrantMutexGuard<'static, ()>,
) -> EnvVarGuard {
    let original = env::var_os(&key);
    // SAFETY: the caller holds `ENV_MUTEX`.
    unsafe { apply(&key, value) };
    EnvVarGuard { key, original }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        // SAFETY: `ENV_MUTEX` is held for the restoration.
        unsafe { apply(&self.key, self.original.as_deref()) };
    }
}

/// Scope holding the environment lock together with the guards it created.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    lock: ReentrantMutexGuard<'static, ()>,
    guards: Vec<EnvVarGuard>,
}

impl EnvScope {
    /// Set (`Some`) or remove (`None`) another variable within the scope.
    pub fn set<K, V>(&mut self, key: K, value: Option<&V>)
    where
        K: Into<String>,
        V: AsRef<OsStr> + ?Sized,
    {
        let guard = mutate_locked(key.into(), value.map(AsRef::as_ref), &self.lock);
        self.guards.push(guard);
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use envfill_test_helpers::env;
/// let _g = env::set_var("ENVFILL_DOC_SET", "bar");
/// assert_eq!(std::env::var("ENVFILL_DOC_SET").as_deref(), Ok("bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let guard = ENV_MUTEX.lock();
    mutate_locked(key.into(), Some(value.as_ref()), &guard)
}

/// Removes an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use envfill_test_helpers::env;
/// let _g = env::remove_var("ENVFILL_DOC_REMOVE");
/// assert!(std::env::var("ENVFILL_DOC_REMOVE").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    let guard = ENV_MUTEX.lock();
    mutate_locked(key.into(), None, &guard)
}

/// Lock the environment and apply every `(key, value)` pair, removing keys
/// whose value is `None`.
pub fn scope<I, K, V>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let mut scope = EnvScope {
        lock: ENV_MUTEX.lock(),
        guards: Vec::new(),
    };
    for (key, value) in vars {
        scope.set(key, value.as_ref());
    }
    scope
}
