use super::{TURN_ACTION_COUNTS, count_by_kind, sum_counts};
use crate::metrics::{ComputationResult, Metric, MetricContext, MetricDeps, MetricKey, MetricScope, MetricValue, ValueSchema};
use ohno::app_err;

/// Per-kind count of the actions recorded during one turn.
///
/// Produces a map from action kind to count, e.g. `{"like": 2, "post": 1}`.
/// A turn with no actions yields an empty map, not null.
#[derive(Debug, Default)]
pub struct TurnActionCounts;

impl TurnActionCounts {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Metric for TurnActionCounts {
    fn key(&self) -> MetricKey {
        MetricKey::new(TURN_ACTION_COUNTS)
    }

    fn scope(&self) -> MetricScope {
        MetricScope::Turn
    }

    fn output_schema(&self) -> ValueSchema {
        ValueSchema::Map(Box::new(ValueSchema::Int))
    }

    fn compute(
        &self,
        ctx: &MetricContext,
        deps: &MetricDeps<'_>,
        _prior: &ComputationResult,
    ) -> Result<MetricValue, ohno::AppError> {
        let turn_number = ctx
            .turn_number()
            .ok_or_else(|| app_err!("turn-scoped metric computed without a turn number"))?;
        let actions = deps.run_data().turn_actions(ctx.run_id(), turn_number)?;
        Ok(MetricValue::Map(count_by_kind(&actions)))
    }
}

/// Total number of actions recorded during one turn.
///
/// Derived from [`TurnActionCounts`] rather than re-reading the run data,
/// so the two can never disagree within a collection.
#[derive(Debug, Default)]
pub struct TurnActionTotal;

impl TurnActionTotal {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Metric for TurnActionTotal {
    fn key(&self) -> MetricKey {
        MetricKey::new(super::TURN_TOTAL_ACTIONS)
    }

    fn scope(&self) -> MetricScope {
        MetricScope::Turn
    }

    fn requires(&self) -> Vec<MetricKey> {
        vec![MetricKey::new(TURN_ACTION_COUNTS)]
    }

    fn output_schema(&self) -> ValueSchema {
        ValueSchema::Int
    }

    fn compute(
        &self,
        _ctx: &MetricContext,
        _deps: &MetricDeps<'_>,
        prior: &ComputationResult,
    ) -> Result<MetricValue, ohno::AppError> {
        let counts = prior
            .get(TURN_ACTION_COUNTS)
            .ok_or_else(|| app_err!("'{TURN_ACTION_COUNTS}' missing from prior results"))?
            .as_map()
            .ok_or_else(|| app_err!("'{TURN_ACTION_COUNTS}' is not a map"))?;
        Ok(MetricValue::Int(sum_counts(counts)?))
    }
}
