use super::{MetricKey, MetricValue};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered metric key to value mapping produced by one collection call.
///
/// Entries appear in evaluation order and cover the entire resolved closure,
/// including dependency-only keys the caller never explicitly requested.
/// Serialization preserves that order, so the persisted JSON document reads
/// in the same order the metrics were evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputationResult {
    entries: Vec<(MetricKey, MetricValue)>,
}

impl ComputationResult {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append an entry. Keys are expected to be unique; the collector only
    /// ever inserts each resolved key once.
    pub fn insert(&mut self, key: MetricKey, value: MetricValue) {
        self.entries.push((key, value));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.entries.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in evaluation order.
    pub fn keys(&self) -> impl Iterator<Item = &MetricKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Entries in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (&MetricKey, &MetricValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ComputationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
