//! Custom decode capabilities.
//!
//! A type opts into custom conversion by implementing [`Decode`] and exposing
//! one or more of the [`JsonDecode`], [`BinaryDecode`] and [`TextDecode`]
//! views. When several are exposed the converter prefers JSON, then binary,
//! then text, and invokes exactly one of them.

use std::ops::{Deref, DerefMut};

use super::{ConvertError, EnvValue};
use crate::BoxError;

/// Decode a value from its textual form.
pub trait TextDecode {
    /// Replace `self` with the value encoded in `text`.
    ///
    /// # Errors
    ///
    /// Returns any error describing why `text` is not acceptable.
    fn decode_text(&mut self, text: &[u8]) -> Result<(), BoxError>;
}

/// Decode a value from an opaque byte blob.
pub trait BinaryDecode {
    /// Replace `self` with the value encoded in `data`.
    ///
    /// # Errors
    ///
    /// Returns any error describing why `data` is not acceptable.
    fn decode_binary(&mut self, data: &[u8]) -> Result<(), BoxError>;
}

/// Decode a value from a JSON document.
pub trait JsonDecode {
    /// Replace `self` with the value encoded in `json`.
    ///
    /// # Errors
    ///
    /// Returns any error describing why `json` is not acceptable.
    fn decode_json(&mut self, json: &[u8]) -> Result<(), BoxError>;
}

/// Capability query for custom decoding.
///
/// Every method defaults to `None`; override the ones the type supports.
///
/// # Examples
///
/// ```
/// use envfill::{BoxError, Decode, EnvValue, TextDecode};
///
/// #[derive(Default)]
/// struct Upper(String);
///
/// impl TextDecode for Upper {
///     fn decode_text(&mut self, text: &[u8]) -> Result<(), BoxError> {
///         self.0 = std::str::from_utf8(text)?.to_uppercase();
///         Ok(())
///     }
/// }
///
/// impl Decode for Upper {
///     fn text(&mut self) -> Option<&mut dyn TextDecode> {
///         Some(self)
///     }
/// }
///
/// let mut value = Upper::default();
/// value.set_from_env("shout").unwrap();
/// assert_eq!(value.0, "SHOUT");
/// ```
pub trait Decode {
    /// JSON view of the value, if supported.
    fn json(&mut self) -> Option<&mut dyn JsonDecode> {
        None
    }

    /// Binary view of the value, if supported.
    fn binary(&mut self) -> Option<&mut dyn BinaryDecode> {
        None
    }

    /// Text view of the value, if supported.
    fn text(&mut self) -> Option<&mut dyn TextDecode> {
        None
    }
}

impl<T: Decode> EnvValue for T {
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        let bytes = raw.as_bytes();
        let outcome = if let Some(decoder) = self.json() {
            decoder.decode_json(bytes)
        } else if let Some(decoder) = self.binary() {
            decoder.decode_binary(bytes)
        } else if let Some(decoder) = self.text() {
            decoder.decode_text(bytes)
        } else {
            return Err(ConvertError::Unsupported {
                type_name: std::any::type_name::<T>(),
            });
        };
        outcome.map_err(ConvertError::Decode)
    }
}

/// Raw bytes of the source string, stored without comma splitting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawBytes(pub Vec<u8>);

impl EnvValue for RawBytes {
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        self.0 = raw.as_bytes().to_vec();
        Ok(())
    }
}

impl Deref for RawBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<RawBytes> for Vec<u8> {
    fn from(bytes: RawBytes) -> Self {
        bytes.0
    }
}

/// Wrapper decoding its value from a JSON document with `serde_json`.
///
/// # Examples
///
/// ```
/// use envfill::{EnvValue, Json};
///
/// let mut limits: Json<Vec<u32>> = Json::default();
/// limits.set_from_env("[1, 2, 3]").unwrap();
/// assert_eq!(*limits, vec![1, 2, 3]);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

#[cfg(feature = "json")]
impl<T: serde::de::DeserializeOwned> JsonDecode for Json<T> {
    fn decode_json(&mut self, json: &[u8]) -> Result<(), BoxError> {
        self.0 = serde_json::from_slice(json)?;
        Ok(())
    }
}

#[cfg(feature = "json")]
impl<T: serde::de::DeserializeOwned> Decode for Json<T> {
    fn json(&mut self) -> Option<&mut dyn JsonDecode> {
        Some(self)
    }
}

#[cfg(feature = "json")]
impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

#[cfg(feature = "json")]
impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

#[cfg(feature = "json")]
impl<T> Json<T> {
    /// Unwrap the decoded value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}
