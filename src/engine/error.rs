use crate::metrics::{MetricKey, MetricScope};
use compact_str::CompactString;
use core::error::Error;
use core::fmt;
use thiserror::Error;

/// Defects in how metrics are registered or requested.
///
/// Every variant is detectable without invoking any `compute`; these
/// indicate a deployment or programming problem and should surface at
/// process startup via [`MetricRegistry::validate`].
///
/// [`MetricRegistry::validate`]: super::MetricRegistry::validate
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("metric keys must be non-empty")]
    EmptyKey,

    #[error("metric key '{0}' is already registered")]
    DuplicateKey(MetricKey),

    #[error("unknown metric key '{0}'")]
    UnknownKey(MetricKey),

    #[error("metric '{key}' has scope {actual} but this collection is scoped to {expected}")]
    ScopeMismatch {
        key: MetricKey,
        expected: MetricScope,
        actual: MetricScope,
    },

    #[error("dependency cycle or unresolved reference involving: {}", join_keys(.unresolved))]
    UnresolvedDependencies { unresolved: Vec<MetricKey> },
}

/// Failure of a single metric during evaluation.
///
/// Raised when a metric's `compute` fails or when its returned value does
/// not match the declared output shape. The collection call that produced
/// this error returned no partial result.
#[derive(Debug)]
pub struct ComputationError {
    pub metric_key: MetricKey,
    pub run_id: CompactString,
    pub turn_number: Option<u32>,
    pub cause: ohno::AppError,
}

impl fmt::Display for ComputationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "metric '{}' failed for run '{}'", self.metric_key, self.run_id)?;
        if let Some(turn_number) = self.turn_number {
            write!(f, " turn {turn_number}")?;
        }
        write!(f, ": {}", self.cause)
    }
}

impl Error for ComputationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// Top-level error type of the engine.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}

fn join_keys(keys: &[MetricKey]) -> String {
    let mut out = String::new();
    for (index, key) in keys.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(key.as_str());
    }
    out
}
