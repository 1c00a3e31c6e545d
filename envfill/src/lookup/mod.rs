//! Lookup sources consulted by the walker.
//!
//! A [`Lookup`] maps a fully prefixed key to a value, returning `None` when
//! the key is not set. A found empty string is still a value and suppresses
//! defaults. The walker only reads from a source and never caches results.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A key/value source such as the process environment or a parsed file.
///
/// Closures and string maps are sources; borrow a map through a closure
/// such as `|key: &str| map.get(key).cloned()`.
///
/// # Examples
///
/// ```
/// use envfill::Lookup;
///
/// let source = |key: &str| (key == "PORT").then(|| "8080".to_owned());
/// assert_eq!(source.lookup("PORT").as_deref(), Some("8080"));
/// assert_eq!(source.lookup("HOST"), None);
/// ```
pub trait Lookup {
    /// Value stored under `key`, or `None` when it is not set.
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// The process environment.
///
/// Values that are not valid UTF-8 are decoded lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnv;

impl Lookup for OsEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        if key.is_empty() || key.contains(['=', '\0']) {
            return None;
        }
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

/// Reports empty values as not set, so defaults apply to them.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreEmpty<L>(pub L);

impl<L: Lookup> Lookup for IgnoreEmpty<L> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.0.lookup(key).filter(|value| !value.is_empty())
    }
}

/// Consults `primary` first and `secondary` only when `primary` has no value.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use envfill::{Fallback, Lookup};
///
/// let overrides = HashMap::from([("HOST".to_owned(), "db".to_owned())]);
/// let file = HashMap::from([
///     ("HOST".to_owned(), "localhost".to_owned()),
///     ("PORT".to_owned(), "5432".to_owned()),
/// ]);
/// let source = Fallback::new(overrides, file);
/// assert_eq!(source.lookup("HOST").as_deref(), Some("db"));
/// assert_eq!(source.lookup("PORT").as_deref(), Some("5432"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Fallback<A, B> {
    primary: A,
    secondary: B,
}

impl<A, B> Fallback<A, B> {
    /// Layer `primary` over `secondary`.
    #[must_use]
    pub const fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<A: Lookup, B: Lookup> Lookup for Fallback<A, B> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.primary
            .lookup(key)
            .or_else(|| self.secondary.lookup(key))
    }
}
