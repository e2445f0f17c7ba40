//! Declarative metrics engine for agent-simulation runs
//!
//! This crate derives named, possibly-interdependent values from the events a
//! simulation records per turn and per run. Metrics declare what they depend
//! on; the engine expands the transitive closure of a request, computes a
//! deterministic evaluation order, evaluates each metric sequentially while
//! feeding earlier results to later ones, and validates every output against
//! its declared shape.
//!
//! # Module Organization
//!
//! - [`metrics`]: The metric contract and its value model
//! - [`engine`]: The registry, dependency resolver, and collector
//! - [`builtin`]: Conformance metrics exercising the contract end-to-end

/// Result type alias using [`engine::MetricsError`] as the default error type.
pub type Result<T, E = crate::engine::MetricsError> = core::result::Result<T, E>;

pub mod builtin;
pub mod engine;
pub mod metrics;
