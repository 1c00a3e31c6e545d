//! Key resolver: turns a field's directives into the key or prefix it uses.
//!
//! Rules are applied in a fixed order so that a field breaking several of
//! them always reports the same error:
//!
//! 1. `key = "-"` skips the field.
//! 2. An empty `key` without a prefix is rejected.
//! 3. An empty `prefix` is rejected.
//! 4. `key` together with `prefix` is rejected.
//! 5. Collector fields need a prefix and neither a key nor `flatten`.
//! 6. Flattened fields may add a prefix but never a key.
//! 7. `prefix` namespaces a nested record; `key` names a leaf.

use crate::error::DeclarationError;

/// Separator appended after every prefix segment.
pub const SEPARATOR: char = '_';

/// Declared directives of one field, as emitted by `#[derive(EnvConfig)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSpec {
    /// Rust field name, used in error messages.
    pub name: &'static str,
    /// `key = "..."`, where `"-"` skips the field.
    pub key: Option<&'static str>,
    /// `prefix = "..."`.
    pub prefix: Option<&'static str>,
    /// `default = ...`, stored as text.
    pub default: Option<&'static str>,
    /// `required`.
    pub required: bool,
    /// `flatten`: the record is embedded without a namespace segment of its own.
    pub flatten: bool,
    /// `collect`: population is delegated to a [`Collector`](crate::Collector).
    pub collect: bool,
}

impl FieldSpec {
    /// Descriptor for `name` with no directives.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            key: None,
            prefix: None,
            default: None,
            required: false,
            flatten: false,
            collect: false,
        }
    }
}

/// Outcome of resolving a field against the accumulated prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The field does not participate.
    Skip,
    /// A leaf read from this fully prefixed key.
    Leaf(String),
    /// A nested record whose descendants use this prefix (ends with the separator,
    /// or is the unchanged parent prefix for a flattened field).
    Nested(String),
    /// A collector rooted at this key (no trailing separator).
    Collector(String),
}

impl Resolved {
    /// Short name of the shape, used in mismatch errors.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Skip => "skipped field",
            Self::Leaf(_) => "leaf",
            Self::Nested(_) => "nested record",
            Self::Collector(_) => "collector",
        }
    }
}

/// Resolve `spec` under the accumulated `prefix`.
///
/// `prefix` is empty at the top level and otherwise ends with [`SEPARATOR`].
///
/// # Errors
///
/// Returns the [`DeclarationError`] for the first rule the directives break.
///
/// # Examples
///
/// ```
/// use envfill::{FieldSpec, Resolved, resolve};
///
/// let port = FieldSpec { key: Some("PORT"), ..FieldSpec::new("port") };
/// assert_eq!(resolve(&port, "DB_"), Ok(Resolved::Leaf("DB_PORT".to_owned())));
///
/// let db = FieldSpec { prefix: Some("DB"), ..FieldSpec::new("db") };
/// assert_eq!(resolve(&db, "APP_"), Ok(Resolved::Nested("APP_DB_".to_owned())));
/// ```
pub fn resolve(spec: &FieldSpec, prefix: &str) -> Result<Resolved, DeclarationError> {
    if spec.key == Some("-") {
        return Ok(Resolved::Skip);
    }
    if spec.key == Some("") && spec.prefix.is_none() {
        return Err(DeclarationError::EmptyKey);
    }
    if spec.prefix == Some("") {
        return Err(DeclarationError::EmptyPrefix);
    }
    if spec.key.is_some() && spec.prefix.is_some() {
        return Err(DeclarationError::KeyAndPrefix);
    }

    if spec.collect {
        return match (spec.key, spec.flatten, spec.prefix) {
            (Some(_), _, _) => Err(DeclarationError::CollectorWithKey),
            (None, true, _) => Err(DeclarationError::CollectorFlattened),
            (None, false, None) => Err(DeclarationError::CollectorWithoutPrefix),
            (None, false, Some(own)) => Ok(Resolved::Collector(format!("{prefix}{own}"))),
        };
    }

    if spec.flatten {
        return match (spec.key, spec.prefix) {
            (Some(_), _) => Err(DeclarationError::FlattenWithKey),
            (None, Some(own)) => Ok(Resolved::Nested(nested(prefix, own))),
            (None, None) => Ok(Resolved::Nested(prefix.to_owned())),
        };
    }

    match (spec.key, spec.prefix) {
        (None, Some(own)) => Ok(Resolved::Nested(nested(prefix, own))),
        (Some(key), None) => Ok(Resolved::Leaf(format!("{prefix}{key}"))),
        _ => Err(DeclarationError::MissingDirective),
    }
}

fn nested(prefix: &str, own: &str) -> String {
    format!("{prefix}{own}{SEPARATOR}")
}
