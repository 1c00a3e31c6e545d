//! Primary error enums for populate flows.

use thiserror::Error;

use crate::convert::ConvertError;
use crate::validate::ValidationErrors;

/// Boxed error returned by user-supplied decode and collector logic.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type EnvResult<T> = Result<T, EnvError>;

/// Errors that abort a populate call.
///
/// Every variant except [`EnvError::Validation`] is raised by the first
/// failing field; the walk stops there and the record must be discarded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvError {
    /// Malformed directives on a field, reported when the field is visited.
    #[error("field `{field}`: {source}")]
    Declaration {
        /// Name of the offending field.
        field: String,
        /// Which directive rule was broken.
        #[source]
        source: DeclarationError,
    },

    /// A `required` field has neither a value nor a default.
    #[error("required field `{field}` is missing: `{key}` is not set")]
    Required {
        /// Name of the field.
        field: String,
        /// Fully prefixed key that was looked up.
        key: String,
    },

    /// The looked-up (or default) value could not be converted.
    #[error("field `{field}` failed to populate from `{key}`: {source}")]
    Convert {
        /// Name of the field, or the key when raised through a collector.
        field: String,
        /// Fully prefixed key the value came from.
        key: String,
        /// Underlying conversion failure.
        #[source]
        source: ConvertError,
    },

    /// Delegated collector logic failed.
    #[error("collector field `{field}` failed: {source}")]
    Collect {
        /// Name of the collector field.
        field: String,
        /// Error returned by the collector.
        #[source]
        source: BoxError,
    },

    /// A validation hook rejected a populated record or field.
    #[error("`{record}` failed to validate: {source}")]
    Validation {
        /// Type name of the record, or name of the field, whose hook failed.
        record: &'static str,
        /// Every failed check.
        #[source]
        source: ValidationErrors,
    },
}

/// Directive combinations rejected by the key resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DeclarationError {
    /// `key = ""` without a prefix.
    #[error("key directive can't be empty")]
    EmptyKey,

    /// `prefix = ""`.
    #[error("prefix directive can't be empty")]
    EmptyPrefix,

    /// Both `key` and `prefix` are present.
    #[error(
        "key and prefix are mutually exclusive: use prefix to populate a nested record, \
         key for leaf or decodable fields"
    )]
    KeyAndPrefix,

    /// A participating field carries no directive at all.
    #[error(
        "field does not have a key or prefix directive; skip it with `key = \"-\"` or flatten it"
    )]
    MissingDirective,

    /// A flattened field names a key.
    #[error("flattened field can't have a key: use prefix to namespace it or remove the key")]
    FlattenWithKey,

    /// A collector field names a key.
    #[error("collector field must use prefix, not key")]
    CollectorWithKey,

    /// A collector field has no prefix.
    #[error("collector field requires a prefix directive")]
    CollectorWithoutPrefix,

    /// A collector field is also flattened.
    #[error("collector field can't be flattened")]
    CollectorFlattened,

    /// The slot handed to the walker does not match what the directives resolve to.
    #[error("directives resolve to a {resolved} but the field provides a {provided}")]
    ShapeMismatch {
        /// Shape the directives resolved to.
        resolved: &'static str,
        /// Shape of the slot supplied by the record.
        provided: &'static str,
    },
}
