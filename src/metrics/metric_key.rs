use compact_str::CompactString;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifier of a metric, unique within one registry.
///
/// Keys are conventionally namespaced as `"<scope>.<name>"`, e.g.
/// `turn.action_counts`. Ordering is plain lexicographic byte order, which is
/// what gives the resolver its deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricKey(CompactString);

impl MetricKey {
    #[must_use]
    pub fn new(key: impl Into<CompactString>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty keys are rejected at registration time; see
    /// [`crate::engine::MetricRegistry::register`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MetricKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}
