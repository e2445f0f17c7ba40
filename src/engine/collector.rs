use super::error::{ComputationError, ConfigurationError};
use super::registry::MetricRegistry;
use crate::metrics::{ComputationResult, MetricContext, MetricDeps, MetricKey, MetricScope};
use ohno::app_err;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Log target for the collector
const LOG_TARGET: &str = " collector";

/// Dependency edges of one resolved closure.
struct ClosureGraph {
    requires_of: HashMap<MetricKey, Vec<MetricKey>>,
    required_by: HashMap<MetricKey, Vec<MetricKey>>,
}

/// Resolves and evaluates metrics against a registry.
///
/// A collector borrows its registry and holds no other state, so distinct
/// collection calls are fully independent: each builds its own context,
/// closure, and result map.
#[derive(Debug)]
pub struct MetricsCollector<'a> {
    registry: &'a MetricRegistry,
}

impl<'a> MetricsCollector<'a> {
    #[must_use]
    pub const fn new(registry: &'a MetricRegistry) -> Self {
        Self { registry }
    }

    /// Collect turn-scoped metrics for one turn of a run.
    ///
    /// The result covers the full transitive closure of `requested` in
    /// deterministic evaluation order, dependency-only keys included.
    ///
    /// # Errors
    /// Returns a [`ConfigurationError`] for unknown keys, scope violations,
    /// or dependency cycles, and a [`ComputationError`] when a metric fails
    /// to compute or returns a value violating its declared shape. No
    /// partial result is ever returned.
    pub fn collect_turn(
        &self,
        requested: impl IntoIterator<Item = MetricKey>,
        run_id: &str,
        turn_number: u32,
        deps: &MetricDeps<'_>,
    ) -> crate::Result<ComputationResult> {
        let ctx = MetricContext::for_turn(run_id, turn_number);
        self.collect(MetricScope::Turn, requested, &ctx, deps)
    }

    /// Collect run-scoped metrics for a whole run.
    ///
    /// Same contract as [`collect_turn`](Self::collect_turn), without a turn
    /// number in the context.
    ///
    /// # Errors
    /// See [`collect_turn`](Self::collect_turn).
    pub fn collect_run(
        &self,
        requested: impl IntoIterator<Item = MetricKey>,
        run_id: &str,
        deps: &MetricDeps<'_>,
    ) -> crate::Result<ComputationResult> {
        let ctx = MetricContext::for_run(run_id);
        self.collect(MetricScope::Run, requested, &ctx, deps)
    }

    fn collect(
        &self,
        scope: MetricScope,
        requested: impl IntoIterator<Item = MetricKey>,
        ctx: &MetricContext,
        deps: &MetricDeps<'_>,
    ) -> crate::Result<ComputationResult> {
        let graph = self.expand_closure(scope, requested)?;
        let order = evaluation_order(&graph.requires_of, &graph.required_by)
            .map_err(|unresolved| ConfigurationError::UnresolvedDependencies { unresolved })?;

        log::debug!(
            target: LOG_TARGET,
            "evaluating {} {scope} metrics for run '{}'",
            order.len(),
            ctx.run_id()
        );

        self.evaluate(&order, ctx, deps)
    }

    /// Breadth-first expansion of the requested keys into their transitive
    /// dependency closure, verifying each visited key against the call's
    /// scope. Instances fetched here are throwaways; only `scope` and
    /// `requires` are read.
    fn expand_closure(&self, scope: MetricScope, requested: impl IntoIterator<Item = MetricKey>) -> crate::Result<ClosureGraph> {
        let mut requires_of: HashMap<MetricKey, Vec<MetricKey>> = HashMap::new();
        let mut required_by: HashMap<MetricKey, Vec<MetricKey>> = HashMap::new();
        let mut queue: VecDeque<MetricKey> = requested.into_iter().collect();

        while let Some(key) = queue.pop_front() {
            if requires_of.contains_key(&key) {
                continue;
            }

            let metric = self.registry.get(&key)?;
            if metric.scope() != scope {
                return Err(ConfigurationError::ScopeMismatch {
                    key,
                    expected: scope,
                    actual: metric.scope(),
                }
                .into());
            }

            let mut edges = Vec::new();
            for dep in metric.requires() {
                // A duplicate edge would double-count indegree
                if edges.contains(&dep) {
                    continue;
                }
                required_by.entry(dep.clone()).or_default().push(key.clone());
                queue.push_back(dep.clone());
                edges.push(dep);
            }
            let _ = requires_of.insert(key, edges);
        }

        Ok(ClosureGraph { requires_of, required_by })
    }

    /// Walk the resolved order once, feeding previously computed values to
    /// later metrics and validating every output. Aborts on the first
    /// failure; no later metric is evaluated.
    fn evaluate(&self, order: &[MetricKey], ctx: &MetricContext, deps: &MetricDeps<'_>) -> crate::Result<ComputationResult> {
        let mut result = ComputationResult::new();

        for key in order {
            let metric = self.registry.get(key)?;

            log::debug!(target: LOG_TARGET, "computing metric '{key}' for run '{}'", ctx.run_id());
            let value = match metric.compute(ctx, deps, &result) {
                Ok(value) => value,
                Err(cause) => return Err(computation_error(key, ctx, cause).into()),
            };

            let schema = metric.output_schema();
            if let Err(violation) = schema.validate(&value) {
                let cause = app_err!("output does not match the declared shape: {violation}");
                return Err(computation_error(key, ctx, cause).into());
            }

            result.insert(key.clone(), value);
        }

        Ok(result)
    }
}

/// Deterministic topological order over a dependency graph.
///
/// Repeatedly evaluates the lexicographically smallest ready key, so
/// identical inputs always yield the identical order regardless of
/// registration or request order. Returns the keys that could not be
/// ordered, sorted, as the error value when the graph has a cycle.
pub(crate) fn evaluation_order(
    requires_of: &HashMap<MetricKey, Vec<MetricKey>>,
    required_by: &HashMap<MetricKey, Vec<MetricKey>>,
) -> Result<Vec<MetricKey>, Vec<MetricKey>> {
    let mut indegree: HashMap<&MetricKey, usize> = requires_of.iter().map(|(key, deps)| (key, deps.len())).collect();

    let mut ready: BTreeSet<&MetricKey> = indegree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(key, _)| *key)
        .collect();

    let mut order = Vec::with_capacity(requires_of.len());
    while let Some(key) = ready.pop_first() {
        order.push(key.clone());
        for dependent in required_by.get(key).into_iter().flatten() {
            if let Some(degree) = indegree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    let _ = ready.insert(dependent);
                }
            }
        }
    }

    if order.len() == requires_of.len() {
        Ok(order)
    } else {
        let mut unresolved: Vec<MetricKey> = requires_of.keys().filter(|key| !order.contains(key)).cloned().collect();
        unresolved.sort_unstable();
        Err(unresolved)
    }
}

fn computation_error(key: &MetricKey, ctx: &MetricContext, cause: ohno::AppError) -> ComputationError {
    ComputationError {
        metric_key: key.clone(),
        run_id: ctx.run_id().into(),
        turn_number: ctx.turn_number(),
        cause,
    }
}
