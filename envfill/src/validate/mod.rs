//! Post-populate validation.
//!
//! Records deriving [`EnvConfig`](crate::EnvConfig) with `#[env(validate)]`
//! have their [`Validate`] hook called once every field has been populated.
//! The same directive on a field runs the field value's hook right after that
//! field is filled.
//! Checks are independent, so [`assert`] runs all of them and reports every
//! failure in one [`ValidationErrors`].

use std::fmt;

/// Hook run after a record's fields are populated.
///
/// # Examples
///
/// ```
/// use envfill::{Validate, ValidationErrors, assert, check};
///
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Validate for Server {
///     fn validate(&self) -> Result<(), ValidationErrors> {
///         assert([
///             check(!self.host.is_empty(), "host", "must not be empty"),
///             check(self.port != 0, "port", "must be positive"),
///         ])
///     }
/// }
///
/// let err = Server { host: String::new(), port: 0 }.validate().unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "validation failed: host: must not be empty; port: must be positive",
/// );
/// ```
pub trait Validate {
    /// Check the populated record.
    ///
    /// # Errors
    ///
    /// Returns every failed check.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        (**self).validate()
    }
}

/// An absent value has nothing to check.
impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.as_ref().map_or(Ok(()), Validate::validate)
    }
}

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field or key the check is about.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Failure of `field` described by `message`.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Every failed check of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Collect `errors` into an aggregate.
    #[must_use]
    pub const fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Iterate over the failed checks.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Number of failed checks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no check failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// `Ok` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one check failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed:")?;
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, " {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Run every check and aggregate the failures.
///
/// All checks are evaluated; a failure never hides a later one.
///
/// # Errors
///
/// Returns the failed checks, in order, when there is at least one.
pub fn assert<I>(checks: I) -> Result<(), ValidationErrors>
where
    I: IntoIterator<Item = Result<(), ValidationError>>,
{
    checks
        .into_iter()
        .filter_map(Result::err)
        .collect::<ValidationErrors>()
        .into_result()
}

/// A single check: `Ok` when `condition` holds, otherwise a failure of `field`.
///
/// # Errors
///
/// Returns a [`ValidationError`] when `condition` is false.
pub fn check(
    condition: bool,
    field: impl Into<String>,
    message: impl Into<String>,
) -> Result<(), ValidationError> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError::new(field, message))
    }
}
