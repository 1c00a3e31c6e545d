//! Struct walker: visits a record's fields depth-first and fills them.
//!
//! `#[derive(EnvConfig)]` generates one [`Walker::visit`] call per
//! participating field, in declaration order. The walker resolves the
//! field's directives, then either converts a leaf, recurses into a nested
//! record, or hands control to a collector. The first error aborts the walk.

use crate::collect::{CollectSource, Collector};
use crate::convert::EnvValue;
use crate::error::{DeclarationError, EnvError, EnvResult};
use crate::lookup::{Lookup, OsEnv};
use crate::resolve::{FieldSpec, Resolved, resolve};
use crate::validate::Validate;

/// A record whose fields can be populated from a [`Lookup`].
///
/// Implement it with `#[derive(EnvConfig)]`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use envfill::EnvConfig;
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct Config {
///     #[env(key = "PORT", default = 8080)]
///     pub port: u16,
///     #[env(prefix = "DB")]
///     pub db: Database,
/// }
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct Database {
///     #[env(key = "HOST", required)]
///     pub host: String,
/// }
///
/// let source = HashMap::from([("DB_HOST".to_owned(), "localhost".to_owned())]);
/// let config = Config::from_lookup(source).unwrap();
/// assert_eq!(config.port, 8080);
/// assert_eq!(config.db.host, "localhost");
/// ```
pub trait EnvConfig {
    /// Populate every participating field, with keys under `prefix`.
    ///
    /// `prefix` is empty at the top level and otherwise ends with
    /// [`SEPARATOR`](crate::SEPARATOR).
    ///
    /// # Errors
    ///
    /// Returns the first declaration, resolution, conversion, delegation or
    /// validation error. Fields visited before it keep their new values.
    fn populate(&mut self, walker: &Walker<'_>, prefix: &str) -> EnvResult<()>;

    /// Build a record from the process environment.
    ///
    /// # Errors
    ///
    /// See [`read`].
    fn from_env() -> EnvResult<Self>
    where
        Self: Sized + Default,
    {
        Self::from_lookup(OsEnv)
    }

    /// Build a record from `source`.
    ///
    /// # Errors
    ///
    /// See [`read_with`].
    fn from_lookup<L: Lookup>(source: L) -> EnvResult<Self>
    where
        Self: Sized + Default,
    {
        let mut record = Self::default();
        read_with(&mut record, source)?;
        Ok(record)
    }
}

impl<T: EnvConfig + Default> EnvConfig for Option<T> {
    fn populate(&mut self, walker: &Walker<'_>, prefix: &str) -> EnvResult<()> {
        self.get_or_insert_with(T::default).populate(walker, prefix)
    }
}

impl<T: EnvConfig + ?Sized> EnvConfig for Box<T> {
    fn populate(&mut self, walker: &Walker<'_>, prefix: &str) -> EnvResult<()> {
        (**self).populate(walker, prefix)
    }
}

/// Populate `target` from the process environment.
///
/// # Errors
///
/// Returns the first error raised while walking `target`. The record may be
/// partially updated and should be discarded.
pub fn read<T: EnvConfig + ?Sized>(target: &mut T) -> EnvResult<()> {
    read_with(target, OsEnv)
}

/// Populate `target` from `source`.
///
/// # Errors
///
/// Returns the first error raised while walking `target`. The record may be
/// partially updated and should be discarded.
pub fn read_with<T, L>(target: &mut T, source: L) -> EnvResult<()>
where
    T: EnvConfig + ?Sized,
    L: Lookup,
{
    tracing::debug!(record = std::any::type_name::<T>(), "populating record");
    target.populate(&Walker::new(&source), "")
}

/// The destination a field offers the walker.
///
/// Generated code picks the variant from the field's directives; the walker
/// checks it against what the directives resolve to.
pub enum Slot<'a> {
    /// A value converted from one key.
    Leaf(&'a mut dyn EnvValue),
    /// A record populated under a prefix.
    Nested(&'a mut dyn EnvConfig),
    /// A field delegating to custom collection logic.
    Collector(&'a mut dyn Collector),
    /// A field whose directives cannot name any shape.
    Invalid,
}

impl Slot<'_> {
    const fn shape(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf",
            Self::Nested(_) => "nested record",
            Self::Collector(_) => "collector",
            Self::Invalid => "field without a usable shape",
        }
    }
}

/// Drives population for one top-level call.
///
/// Holds only the lookup source; the accumulated prefix travels through
/// [`EnvConfig::populate`].
#[derive(Clone, Copy)]
pub struct Walker<'a> {
    source: &'a dyn Lookup,
}

impl<'a> Walker<'a> {
    /// Walker reading from `source`.
    #[must_use]
    pub const fn new(source: &'a dyn Lookup) -> Self {
        Self { source }
    }

    /// Look `key` up in the source.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        let value = self.source.lookup(key);
        tracing::trace!(key, found = value.is_some(), "looked up key");
        value
    }

    /// Populate one field described by `spec` under `prefix`.
    ///
    /// # Errors
    ///
    /// Returns a declaration error when the directives are malformed or do
    /// not match `slot`, and otherwise whatever filling the slot raises.
    pub fn visit(&self, spec: &FieldSpec, prefix: &str, slot: Slot<'_>) -> EnvResult<()> {
        let resolved =
            resolve(spec, prefix).map_err(|source| EnvError::declaration(spec.name, source))?;
        match (resolved, slot) {
            (Resolved::Skip, _) => Ok(()),
            (Resolved::Leaf(key), Slot::Leaf(value)) => self.fill_leaf(spec, &key, value),
            (Resolved::Nested(nested), Slot::Nested(record)) => record.populate(self, &nested),
            (Resolved::Collector(root), Slot::Collector(collector)) => {
                self.delegate(spec, &root, collector)
            }
            (resolved, slot) => Err(EnvError::declaration(
                spec.name,
                DeclarationError::ShapeMismatch {
                    resolved: resolved.shape(),
                    provided: slot.shape(),
                },
            )),
        }
    }

    /// Run the validation hook of a populated record or field.
    ///
    /// `record` is the record's type name for `#[env(validate)]` on a
    /// struct and the field name for the same directive on a field.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Validation`] carrying every failed check.
    pub fn validate(&self, record: &'static str, target: &dyn Validate) -> EnvResult<()> {
        target.validate().map_err(|source| {
            tracing::debug!(record, failures = source.len(), "validation failed");
            EnvError::Validation { record, source }
        })
    }

    fn fill_leaf(&self, spec: &FieldSpec, key: &str, value: &mut dyn EnvValue) -> EnvResult<()> {
        let raw = match (self.lookup(key), spec.default) {
            (Some(found), _) => found,
            (None, Some(default)) => {
                tracing::debug!(field = spec.name, key, "using default value");
                default.to_owned()
            }
            (None, None) if spec.required => {
                return Err(EnvError::Required {
                    field: spec.name.to_owned(),
                    key: key.to_owned(),
                });
            }
            (None, None) => return Ok(()),
        };
        value
            .set_from_env(&raw)
            .map_err(|source| EnvError::convert(spec.name, key, source))
    }

    fn delegate(&self, spec: &FieldSpec, root: &str, collector: &mut dyn Collector) -> EnvResult<()> {
        tracing::debug!(field = spec.name, prefix = root, "delegating to collector");
        collector
            .collect(root, &CollectSource::new(self))
            .map_err(|source| EnvError::Collect {
                field: spec.name.to_owned(),
                source,
            })
    }
}

impl std::fmt::Debug for Walker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker").finish_non_exhaustive()
    }
}
