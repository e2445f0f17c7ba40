use super::{ComputationResult, MetricContext, MetricDeps, MetricKey, MetricScope, MetricValue, ValueSchema};
use crate::Result;

/// Contract implemented by every derived value.
///
/// Implementations are plain structs; the engine instantiates them through a
/// registry factory, so a fresh instance backs every lookup and no state can
/// leak between collection calls.
pub trait Metric {
    /// Unique key of this metric within its registry.
    fn key(&self) -> MetricKey;

    /// Whether this metric is computed per turn or per run.
    fn scope(&self) -> MetricScope;

    /// Keys that must be evaluated before this metric. Defaults to none.
    ///
    /// Every listed key must be registered, share this metric's scope, and
    /// the edges must form a DAG overall.
    fn requires(&self) -> Vec<MetricKey> {
        Vec::new()
    }

    /// Declared shape of the value [`compute`](Self::compute) returns.
    ///
    /// The collector validates every computed value against this schema and
    /// fails the whole collection call on a mismatch.
    fn output_schema(&self) -> ValueSchema;

    /// Produce this metric's value.
    ///
    /// `prior` holds the value of every key already evaluated in this
    /// collection call, which is guaranteed to include everything named by
    /// [`requires`](Self::requires). Implementations perform only read-only
    /// lookups through `deps` and must not depend on anything beyond
    /// `(ctx, deps, prior)`.
    fn compute(&self, ctx: &MetricContext, deps: &MetricDeps<'_>, prior: &ComputationResult) -> Result<MetricValue, ohno::AppError>;
}
