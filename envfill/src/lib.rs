//! Populate typed configuration records from environment-like sources.
//!
//! Derive [`EnvConfig`] on a struct and annotate its public fields with
//! `#[env(...)]` directives:
//!
//! | Directive | Effect |
//! |---|---|
//! | `key = "NAME"` | read the field from `NAME` under the current prefix |
//! | `key = "-"` or `skip` | never touch the field |
//! | `default = <literal>` | value used when the key is not set |
//! | `required` | fail when the key is not set and there is no default |
//! | `prefix = "NAME"` | populate a nested record under `NAME_` |
//! | `flatten` | populate a nested record under the current prefix |
//! | `collect` | delegate to the field's [`Collector`] implementation |
//!
//! A found empty value is a value: it suppresses both the default and the
//! required check. Values are converted through [`EnvValue`], which covers
//! primitives, durations, paths, addresses, `Option`, arrays, vectors, maps
//! and custom [`Decode`] types. Records opting into `#[env(validate)]` run
//! their [`Validate`] hook once populated.
//!
//! The derive macro lives in the companion `envfill_macros` crate.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use std::time::Duration;
//! use envfill::EnvConfig;
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct Config {
//!     #[env(key = "TIMEOUT", default = "30s")]
//!     pub timeout: Duration,
//!     #[env(key = "TAGS")]
//!     pub tags: Option<Vec<String>>,
//! }
//!
//! let source = HashMap::from([("APP_TAGS".to_owned(), "a, b".to_owned())]);
//! let mut config = Config::default();
//! envfill::read_with(&mut config, |key: &str| {
//!     source.get(&format!("APP_{key}")).cloned()
//! })
//! .unwrap();
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! assert_eq!(config.tags, Some(vec!["a".to_owned(), "b".to_owned()]));
//! ```

pub use envfill_macros::EnvConfig;

mod collect;
mod convert;
mod error;
mod lookup;
mod resolve;
mod validate;
mod walk;

pub use collect::{CollectSource, Collector};
#[cfg(feature = "json")]
pub use convert::Json;
pub use convert::{
    BinaryDecode, ConvertError, Decode, EnvValue, JsonDecode, RawBytes, TextDecode,
};
pub use error::{BoxError, DeclarationError, EnvError, EnvResult};
pub use lookup::{Fallback, IgnoreEmpty, Lookup, OsEnv};
pub use resolve::{FieldSpec, Resolved, SEPARATOR, resolve};
pub use validate::{Validate, ValidationError, ValidationErrors, assert, check};
pub use walk::{EnvConfig, Slot, Walker, read, read_with};
