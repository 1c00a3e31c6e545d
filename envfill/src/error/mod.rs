//! Error types produced while populating configuration records.

mod constructors;
mod types;

pub use types::{BoxError, DeclarationError, EnvError, EnvResult};

#[cfg(test)]
mod tests;
