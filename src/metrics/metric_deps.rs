use super::MetricValue;
use crate::Result;
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single recorded agent action inside a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub turn_number: u32,
    pub agent_id: CompactString,
    pub kind: CompactString,
    pub recorded_at: DateTime<Utc>,
}

/// Read-only access to the events a simulation run has recorded.
pub trait RunDataReader {
    fn run_exists(&self, run_id: &str) -> Result<bool, ohno::AppError>;

    /// Actions recorded during one turn of a run.
    fn turn_actions(&self, run_id: &str, turn_number: u32) -> Result<Vec<ActionRecord>, ohno::AppError>;

    /// Actions recorded across all turns of a run.
    fn run_actions(&self, run_id: &str) -> Result<Vec<ActionRecord>, ohno::AppError>;
}

/// Read-only access to previously persisted metric documents.
pub trait StoredMetricsReader {
    fn turn_metrics(&self, run_id: &str, turn_number: u32) -> Result<Option<MetricValue>, ohno::AppError>;

    fn run_metrics(&self, run_id: &str) -> Result<Option<MetricValue>, ohno::AppError>;
}

/// Parameterized query access for metrics that need it.
///
/// Implementations accept SQL text plus a named-parameter map; interpolating
/// raw values into the query text is never permitted.
pub trait QueryExecutor {
    fn query(
        &self,
        sql: &str,
        params: &BTreeMap<CompactString, MetricValue>,
    ) -> Result<Vec<BTreeMap<CompactString, MetricValue>>, ohno::AppError>;
}

/// The injected collaborators available to [`Metric::compute`].
///
/// The engine never owns or mutates these; they are borrowed for the
/// duration of one collection call and only ever read through.
///
/// [`Metric::compute`]: super::Metric::compute
#[derive(Clone, Copy)]
pub struct MetricDeps<'a> {
    run_data: &'a dyn RunDataReader,
    stored_metrics: &'a dyn StoredMetricsReader,
    query: Option<&'a dyn QueryExecutor>,
}

impl<'a> MetricDeps<'a> {
    #[must_use]
    pub const fn new(run_data: &'a dyn RunDataReader, stored_metrics: &'a dyn StoredMetricsReader) -> Self {
        Self {
            run_data,
            stored_metrics,
            query: None,
        }
    }

    /// Attach an optional query executor.
    #[must_use]
    pub fn with_query(mut self, query: &'a dyn QueryExecutor) -> Self {
        self.query = Some(query);
        self
    }

    #[must_use]
    pub const fn run_data(&self) -> &'a dyn RunDataReader {
        self.run_data
    }

    #[must_use]
    pub const fn stored_metrics(&self) -> &'a dyn StoredMetricsReader {
        self.stored_metrics
    }

    #[must_use]
    pub const fn query(&self) -> Option<&'a dyn QueryExecutor> {
        self.query
    }
}

impl fmt::Debug for MetricDeps<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricDeps")
            .field("has_query", &self.query.is_some())
            .finish_non_exhaustive()
    }
}
