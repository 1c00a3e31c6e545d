//! Test helpers shared across the envfill workspace.
//!
//! - [`env`]: guards that mutate the process environment and restore it.
//! - [`lookup`]: an in-memory key/value source that records every query.

pub mod env;
pub mod lookup;

pub use lookup::RecordingLookup;
