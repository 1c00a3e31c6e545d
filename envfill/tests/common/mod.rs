//! Shared fixtures for integration tests.

use std::collections::HashMap;

/// Build a map-backed lookup source from `(key, value)` pairs.
pub fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}
