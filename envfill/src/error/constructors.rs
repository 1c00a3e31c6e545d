//! Constructors shared by the walker and the collector bridge.

use super::{DeclarationError, EnvError};
use crate::convert::ConvertError;

impl EnvError {
    /// Construct a declaration error for `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use envfill::{DeclarationError, EnvError};
    /// let err = EnvError::declaration("port", DeclarationError::EmptyKey);
    /// assert!(err.to_string().contains("`port`"));
    /// ```
    #[must_use]
    pub fn declaration(field: impl Into<String>, source: DeclarationError) -> Self {
        Self::Declaration {
            field: field.into(),
            source,
        }
    }

    /// Construct a conversion error for `field` read from `key`.
    #[must_use]
    pub fn convert(field: impl Into<String>, key: impl Into<String>, source: ConvertError) -> Self {
        Self::Convert {
            field: field.into(),
            key: key.into(),
            source,
        }
    }

    /// Name of the field the error is attributed to, when there is one.
    ///
    /// Validation failures belong to a whole record and return `None`.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Declaration { field, .. }
            | Self::Required { field, .. }
            | Self::Convert { field, .. }
            | Self::Collect { field, .. } => Some(field),
            Self::Validation { .. } => None,
        }
    }
}
