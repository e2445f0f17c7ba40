//! Dependency resolution and evaluation of metrics
//!
//! This module is the engine proper. The [`MetricRegistry`] maps metric keys
//! to factories producing fresh [`Metric`] instances; the
//! [`MetricsCollector`] expands a requested key set into its transitive
//! dependency closure, computes a deterministic topological evaluation
//! order, evaluates each node sequentially while feeding earlier results to
//! later ones, validates each output against its declared shape, and either
//! returns the full ordered result or aborts with exactly one structured
//! error.
//!
//! Nothing here performs I/O or holds shared mutable state: distinct
//! collection calls are fully independent, which is why the registry hands
//! out a new instance on every lookup.
//!
//! [`Metric`]: crate::metrics::Metric

mod collector;
mod error;
mod registry;

pub use collector::MetricsCollector;
pub use error::{ComputationError, ConfigurationError, MetricsError};
pub use registry::MetricRegistry;
