//! The metric contract and its value model
//!
//! This module defines everything a derived value implementation touches:
//! the [`Metric`] trait itself, the identifiers and scopes metrics are keyed
//! by, the JSON-compatible [`MetricValue`] tree they produce, the
//! [`ValueSchema`] shapes those values are validated against, and the
//! read-only [`MetricDeps`] collaborators a metric may consult while
//! computing.
//!
//! # Implementation Model
//!
//! A metric is a plain struct implementing [`Metric`]. It declares:
//! - **Key**: Dot-separated identifier (e.g., `turn.action_counts`)
//! - **Scope**: Computed once per turn ([`MetricScope::Turn`]) or once per
//!   run ([`MetricScope::Run`])
//! - **Requires**: Keys that must be evaluated before it
//! - **Output schema**: The declared shape of the value it returns
//!
//! `compute` is referentially transparent given its inputs: it performs only
//! read-only lookups through [`MetricDeps`] and the partial
//! [`ComputationResult`] of already-evaluated keys. Everything about ordering
//! and failure handling lives in [`crate::engine`], not here.

mod computation_result;
mod metric;
mod metric_context;
mod metric_deps;
mod metric_key;
mod metric_scope;
mod metric_value;
mod value_schema;

pub use computation_result::ComputationResult;
pub use metric::Metric;
pub use metric_context::MetricContext;
pub use metric_deps::{ActionRecord, MetricDeps, QueryExecutor, RunDataReader, StoredMetricsReader};
pub use metric_key::MetricKey;
pub use metric_scope::MetricScope;
pub use metric_value::MetricValue;
pub use value_schema::{SchemaViolation, ValueSchema};
