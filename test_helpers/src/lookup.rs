//! In-memory key/value source that remembers which keys were queried.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Map-backed source recording every key passed to [`RecordingLookup::get`].
///
/// # Examples
///
/// ```
/// use envfill_test_helpers::RecordingLookup;
///
/// let source = RecordingLookup::new([("DB_HOST", "localhost")]);
/// assert_eq!(source.get("DB_HOST").as_deref(), Some("localhost"));
/// assert_eq!(source.get("DB_PORT"), None);
/// assert_eq!(source.queried(), ["DB_HOST", "DB_PORT"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingLookup {
    values: HashMap<String, String>,
    queried: Mutex<Vec<String>>,
}

impl RecordingLookup {
    /// Build a source from `(key, value)` pairs.
    #[must_use]
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            queried: Mutex::default(),
        }
    }

    /// Look up `key`, recording the query.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.queried.lock().push(key.to_owned());
        self.values.get(key).cloned()
    }

    /// Keys queried so far, in order.
    #[must_use]
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().clone()
    }

    /// Whether `key` was ever queried.
    #[must_use]
    pub fn was_queried(&self, key: &str) -> bool {
        self.queried.lock().iter().any(|seen| seen == key)
    }
}
