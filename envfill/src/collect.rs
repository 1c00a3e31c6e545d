//! Collector bridge for key families that directives cannot name.
//!
//! A field marked `#[env(collect, prefix = "...")]` hands its population to a
//! [`Collector`]. The collector receives its root key (the prefix without a
//! trailing separator) and a [`CollectSource`] limited to three operations:
//! raw lookup, single-value conversion and nested-record population.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use envfill::{BoxError, CollectSource, Collector, EnvConfig};
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct Cred {
//!     #[env(key = "USER")]
//!     pub user: String,
//! }
//!
//! /// Reads `<ROOT>` as a comma-separated id list, then `<ROOT>_<id>_*`.
//! #[derive(Debug, Default)]
//! struct Creds(Vec<Cred>);
//!
//! impl Collector for Creds {
//!     fn collect(&mut self, prefix: &str, source: &CollectSource<'_>) -> Result<(), BoxError> {
//!         let mut ids: Vec<String> = Vec::new();
//!         source.read_value(prefix, &mut ids)?;
//!         for id in ids {
//!             let mut cred = Cred::default();
//!             source.populate(&format!("{prefix}_{id}"), &mut cred)?;
//!             self.0.push(cred);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct Config {
//!     #[env(collect, prefix = "CREDS")]
//!     pub creds: Creds,
//! }
//!
//! let source = HashMap::from([
//!     ("CREDS".to_owned(), "0,2".to_owned()),
//!     ("CREDS_0_USER".to_owned(), "alice".to_owned()),
//!     ("CREDS_2_USER".to_owned(), "bob".to_owned()),
//! ]);
//! let config = Config::from_lookup(source).unwrap();
//! let users: Vec<_> = config.creds.0.iter().map(|c| c.user.as_str()).collect();
//! assert_eq!(users, ["alice", "bob"]);
//! ```

use crate::convert::EnvValue;
use crate::error::{BoxError, EnvError, EnvResult};
use crate::resolve::SEPARATOR;
use crate::walk::{EnvConfig, Walker};

/// Custom population logic for a field.
pub trait Collector {
    /// Populate `self` from keys rooted at `prefix`.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk, wrapped with the field name.
    fn collect(&mut self, prefix: &str, source: &CollectSource<'_>) -> Result<(), BoxError>;
}

impl<T: Collector + Default> Collector for Option<T> {
    fn collect(&mut self, prefix: &str, source: &CollectSource<'_>) -> Result<(), BoxError> {
        self.get_or_insert_with(T::default).collect(prefix, source)
    }
}

/// Restricted view of the walker handed to a [`Collector`].
///
/// Keys passed to every method are absolute.
#[derive(Debug, Clone, Copy)]
pub struct CollectSource<'a> {
    walker: &'a Walker<'a>,
}

impl<'a> CollectSource<'a> {
    pub(crate) const fn new(walker: &'a Walker<'a>) -> Self {
        Self { walker }
    }

    /// Raw value stored under `key`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.walker.lookup(key)
    }

    /// Convert the value under `key` into `slot`; a missing key leaves `slot`
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Convert`] naming `key` when conversion fails.
    pub fn read_value<T: EnvValue + ?Sized>(&self, key: &str, slot: &mut T) -> EnvResult<()> {
        self.lookup(key).map_or(Ok(()), |raw| {
            slot.set_from_env(&raw)
                .map_err(|source| EnvError::convert(key, key, source))
        })
    }

    /// Populate `record` as if it were a field with `prefix` as its full
    /// prefix directive.
    ///
    /// # Errors
    ///
    /// Returns whatever walking `record` raises.
    pub fn populate<T: EnvConfig + ?Sized>(&self, prefix: &str, record: &mut T) -> EnvResult<()> {
        record.populate(self.walker, &format!("{prefix}{SEPARATOR}"))
    }
}
