use super::{RUN_ACTION_COUNTS, count_by_kind, sum_counts};
use crate::metrics::{ComputationResult, Metric, MetricContext, MetricDeps, MetricKey, MetricScope, MetricValue, ValueSchema};
use ohno::app_err;

/// Per-kind count of every action recorded across a whole run.
#[derive(Debug, Default)]
pub struct RunActionCounts;

impl RunActionCounts {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Metric for RunActionCounts {
    fn key(&self) -> MetricKey {
        MetricKey::new(RUN_ACTION_COUNTS)
    }

    fn scope(&self) -> MetricScope {
        MetricScope::Run
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
        let actions = deps.run_data().run_actions(ctx.run_id())?;
        Ok(MetricValue::Map(count_by_kind(&actions)))
    }
}

/// Total number of actions recorded across a whole run, derived from
/// [`RunActionCounts`].
#[derive(Debug, Default)]
pub struct RunActionTotal;

impl RunActionTotal {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Metric for RunActionTotal {
    fn key(&self) -> MetricKey {
        MetricKey::new(super::RUN_TOTAL_ACTIONS)
    }

    fn scope(&self) -> MetricScope {
        MetricScope::Run
    }

    fn requires(&self) -> Vec<MetricKey> {
        vec![MetricKey::new(RUN_ACTION_COUNTS)]
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
            .get(RUN_ACTION_COUNTS)
            .ok_or_else(|| app_err!("'{RUN_ACTION_COUNTS}' missing from prior results"))?
            .as_map()
            .ok_or_else(|| app_err!("'{RUN_ACTION_COUNTS}' is not a map"))?;
        Ok(MetricValue::Int(sum_counts(counts)?))
    }
}
