//! The built-in metric set
//!
//! These metrics cover the baseline activity statistics every deployment
//! wants: per-kind action counts and their totals, at both turn and run
//! scope. [`register_all`] installs the whole set into a registry in one
//! call; embedders extend from there with their own [`Metric`] impls.
//!
//! [`Metric`]: crate::metrics::Metric

mod run_actions;
mod turn_actions;

pub use run_actions::{RunActionCounts, RunActionTotal};
pub use turn_actions::{TurnActionCounts, TurnActionTotal};

use crate::engine::{ConfigurationError, MetricRegistry};
use crate::metrics::{ActionRecord, MetricValue};
use compact_str::CompactString;
use ohno::app_err;
use std::collections::BTreeMap;

/// Key of [`TurnActionCounts`].
pub const TURN_ACTION_COUNTS: &str = "turn.action_counts";

/// Key of [`TurnActionTotal`].
pub const TURN_TOTAL_ACTIONS: &str = "turn.total_actions";

/// Key of [`RunActionCounts`].
pub const RUN_ACTION_COUNTS: &str = "run.action_counts";

/// Key of [`RunActionTotal`].
pub const RUN_TOTAL_ACTIONS: &str = "run.total_actions";

/// Register every built-in metric.
///
/// # Errors
/// Returns an error if any built-in key is already taken in `registry`.
pub fn register_all(registry: &mut MetricRegistry) -> Result<(), ConfigurationError> {
    registry.register(TurnActionCounts::new)?;
    registry.register(TurnActionTotal::new)?;
    registry.register(RunActionCounts::new)?;
    registry.register(RunActionTotal::new)?;
    Ok(())
}

/// Tally actions by kind into a deterministic, key-sorted map.
pub(crate) fn count_by_kind(actions: &[ActionRecord]) -> BTreeMap<CompactString, MetricValue> {
    let mut counts: BTreeMap<CompactString, i64> = BTreeMap::new();
    for action in actions {
        *counts.entry(action.kind.clone()).or_insert(0) += 1;
    }

    counts.into_iter().map(|(kind, count)| (kind, MetricValue::Int(count))).collect()
}

/// Sum the integer counts of a per-kind map produced by a counts metric.
pub(crate) fn sum_counts(counts: &BTreeMap<CompactString, MetricValue>) -> Result<i64, ohno::AppError> {
    let mut total = 0i64;
    for (kind, value) in counts {
        let count = value
            .as_int()
            .ok_or_else(|| app_err!("count for action kind '{kind}' is {}, not an integer", value.type_name()))?;
        total += count;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn action(kind: &str) -> ActionRecord {
        ActionRecord {
            turn_number: 0,
            agent_id: "agent-1".into(),
            kind: kind.into(),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_count_by_kind_tallies_and_sorts() {
        let actions = vec![action("post"), action("like"), action("like")];
        let counts = count_by_kind(&actions);

        let entries: Vec<_> = counts.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(entries, vec![("like", MetricValue::Int(2)), ("post", MetricValue::Int(1))]);
    }

    #[test]
    fn test_count_by_kind_on_no_actions() {
        assert!(count_by_kind(&[]).is_empty());
    }

    #[test]
    fn test_sum_counts() {
        let mut counts = BTreeMap::new();
        let _ = counts.insert("like".into(), MetricValue::Int(2));
        let _ = counts.insert("post".into(), MetricValue::Int(1));
        assert_eq!(sum_counts(&counts).unwrap(), 3);
        assert_eq!(sum_counts(&BTreeMap::new()).unwrap(), 0);
    }

    #[test]
    fn test_sum_counts_rejects_non_integers() {
        let mut counts = BTreeMap::new();
        let _ = counts.insert("like".into(), MetricValue::from("two"));
        let error = sum_counts(&counts).unwrap_err();
        assert!(error.to_string().contains("'like'"));
    }

    #[test]
    fn test_register_all_installs_every_builtin() {
        let mut registry = MetricRegistry::new();
        register_all(&mut registry).unwrap();

        assert_eq!(registry.len(), 4);
        for key in [TURN_ACTION_COUNTS, TURN_TOTAL_ACTIONS, RUN_ACTION_COUNTS, RUN_TOTAL_ACTIONS] {
            assert!(registry.has(&key.into()), "missing {key}");
        }

        registry.validate().unwrap();
    }

    #[test]
    fn test_register_all_twice_fails() {
        let mut registry = MetricRegistry::new();
        register_all(&mut registry).unwrap();
        assert!(register_all(&mut registry).is_err());
    }
}
