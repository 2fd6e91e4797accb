//! Solver statistics.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// A flat map of dotted statistics keys to values, e.g.
/// `summary.models.enumerated`.
///
/// Theory extensions add their own entries to the statistics of each step.
///
/// # Examples
///
/// ```
/// use tefoli_core::native::Statistics;
///
/// let mut stats = Statistics::new();
/// stats.set("summary.calls", 1.0);
/// stats.add("summary.calls", 2.0);
///
/// assert_eq!(stats.get("summary.calls"), Some(3.0));
/// assert_eq!(stats.get("summary.missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    values: BTreeMap<String, f64>,
}

impl Statistics {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Adds `value` to the entry under `key`, starting from zero.
    pub fn add(&mut self, key: impl Into<String>, value: f64) {
        *self.values.entry(key.into()).or_insert(0.0) += value;
    }

    /// Returns true if an entry exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the entries whose key starts with `prefix`.
    pub fn subtree<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.iter().filter(move |(key, _)| key.starts_with(prefix))
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.values.iter(),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Iterator over statistics entries.
#[derive(Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, f64>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), *value))
    }
}
