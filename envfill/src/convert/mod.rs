//! Value converter: turns one raw string into a typed destination slot.
//!
//! [`EnvValue`] is implemented for primitives, durations, paths, network
//! addresses, raw bytes, `Option`, fixed-size arrays, vectors, maps, and any
//! type exposing a custom decoder through [`Decode`]. Sequences and maps split
//! their input on commas and trim each piece.

mod decode;
mod duration;
mod error;

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use camino::Utf8PathBuf;

#[cfg(feature = "json")]
pub use decode::Json;
pub use decode::{BinaryDecode, Decode, JsonDecode, RawBytes, TextDecode};
pub use error::ConvertError;

/// A destination slot that can be filled from a raw string.
pub trait EnvValue {
    /// Convert `raw` and store the result in `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when `raw` is not a valid value for the type.
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError>;

    /// Whether `raw` leaves a slot of this type unset.
    ///
    /// Sequences and maps treat the empty string as "no value", which lets
    /// `Option<Vec<T>>` tell an unset source apart from an empty one.
    #[must_use]
    fn is_unset(_raw: &str) -> bool
    where
        Self: Sized,
    {
        false
    }
}

/// Split a sequence literal on commas, trimming each piece.
///
/// An empty literal has no pieces; `","` has two empty ones.
fn pieces(raw: &str) -> impl Iterator<Item = &str> {
    (!raw.is_empty())
        .then(|| raw.split(','))
        .into_iter()
        .flatten()
        .map(str::trim)
}

fn convert_new<T: EnvValue + Default>(raw: &str) -> Result<T, ConvertError> {
    let mut value = T::default();
    value.set_from_env(raw)?;
    Ok(value)
}

impl EnvValue for String {
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        raw.clone_into(self);
        Ok(())
    }
}

impl EnvValue for PathBuf {
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        *self = Self::from(raw);
        Ok(())
    }
}

impl EnvValue for Utf8PathBuf {
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        *self = Self::from(raw);
        Ok(())
    }
}

impl EnvValue for bool {
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        *self = match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
            "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
            _ => {
                return Err(ConvertError::Bool {
                    value: raw.to_owned(),
                });
            }
        };
        Ok(())
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl EnvValue for $ty {
            fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
                *self = raw.parse().map_err(|source| ConvertError::Int {
                    value: raw.to_owned(),
                    source,
                })?;
                Ok(())
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {$(
        impl EnvValue for $ty {
            fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
                *self = raw.parse().map_err(|source| ConvertError::Float {
                    value: raw.to_owned(),
                    source,
                })?;
                Ok(())
            }
        }
    )*};
}

impl_float!(f32, f64);

macro_rules! impl_from_str {
    ($($ty:ty => $kind:literal),* $(,)?) => {$(
        impl EnvValue for $ty {
            fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
                *self = <$ty as FromStr>::from_str(raw).map_err(|err| ConvertError::Parse {
                    kind: $kind,
                    value: raw.to_owned(),
                    source: Box::new(err),
                })?;
                Ok(())
            }
        }
    )*};
}

impl_from_str!(
    char => "character",
    IpAddr => "IP address",
    Ipv4Addr => "IPv4 address",
    Ipv6Addr => "IPv6 address",
    SocketAddr => "socket address",
);

impl EnvValue for Duration {
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        *self = duration::parse_duration(raw).ok_or_else(|| ConvertError::Duration {
            value: raw.to_owned(),
        })?;
        Ok(())
    }
}

impl<T: EnvValue + Default> EnvValue for Option<T> {
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        if T::is_unset(raw) {
            return Ok(());
        }
        self.get_or_insert_with(T::default).set_from_env(raw)
    }

    fn is_unset(raw: &str) -> bool {
        T::is_unset(raw)
    }
}

impl<T: EnvValue, const N: usize> EnvValue for [T; N] {
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        let parts: Vec<&str> = pieces(raw).collect();
        if parts.len() < N {
            return Err(ConvertError::ArrayLength {
                expected: N,
                actual: parts.len(),
            });
        }
        for (slot, part) in self.iter_mut().zip(parts) {
            slot.set_from_env(part)?;
        }
        Ok(())
    }
}

impl<T: EnvValue + Default> EnvValue for Vec<T> {
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        if raw.is_empty() {
            return Ok(());
        }
        *self = pieces(raw).map(convert_new).collect::<Result<_, _>>()?;
        Ok(())
    }

    fn is_unset(raw: &str) -> bool {
        raw.is_empty()
    }
}

/// Parse `k1=v1,k2=v2` into key/value pairs, converting each side.
fn map_entries<K, V>(raw: &str) -> impl Iterator<Item = Result<(K, V), ConvertError>>
where
    K: EnvValue + Default,
    V: EnvValue + Default,
{
    pieces(raw).map(|piece| {
        let (key, value) = piece.split_once('=').ok_or_else(|| ConvertError::MapEntry {
            value: piece.to_owned(),
        })?;
        Ok((convert_new(key.trim())?, convert_new(value)?))
    })
}

impl<K, V, S> EnvValue for HashMap<K, V, S>
where
    K: EnvValue + Default + Eq + Hash,
    V: EnvValue + Default,
    S: BuildHasher + Default,
{
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        if raw.is_empty() {
            return Ok(());
        }
        *self = map_entries(raw).collect::<Result<_, _>>()?;
        Ok(())
    }

    fn is_unset(raw: &str) -> bool {
        raw.is_empty()
    }
}

impl<K, V> EnvValue for BTreeMap<K, V>
where
    K: EnvValue + Default + Ord,
    V: EnvValue + Default,
{
    fn set_from_env(&mut self, raw: &str) -> Result<(), ConvertError> {
        if raw.is_empty() {
            return Ok(());
        }
        *self = map_entries(raw).collect::<Result<_, _>>()?;
        Ok(())
    }

    fn is_unset(raw: &str) -> bool {
        raw.is_empty()
    }
}
