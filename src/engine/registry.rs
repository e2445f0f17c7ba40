use super::collector::evaluation_order;
use super::error::ConfigurationError;
use crate::metrics::{Metric, MetricKey};
use core::fmt;
use std::collections::HashMap;

/// Log target for the registry
const LOG_TARGET: &str = " registry";

type MetricFactory = Box<dyn Fn() -> Box<dyn Metric> + Send + Sync>;

/// Maps metric keys to factories producing fresh [`Metric`] instances.
///
/// Every lookup runs the stored factory, so no instance is ever shared or
/// reused between collection calls. The registry is an explicit value owned
/// by the caller; there is no process-wide singleton.
#[derive(Default)]
pub struct MetricRegistry {
    factories: HashMap<MetricKey, MetricFactory>,
}

impl MetricRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory under the key of the metric it produces.
    ///
    /// The factory is probed once to read the key; duplicate and empty keys
    /// are rejected eagerly, before any collection runs.
    ///
    /// # Errors
    /// Returns an error if the key is empty or already registered.
    pub fn register<M, F>(&mut self, factory: F) -> Result<(), ConfigurationError>
    where
        M: Metric + 'static,
        F: Fn() -> M + Send + Sync + 'static,
    {
        let key = factory().key();
        if key.is_empty() {
            return Err(ConfigurationError::EmptyKey);
        }
        if self.factories.contains_key(&key) {
            return Err(ConfigurationError::DuplicateKey(key));
        }

        log::debug!(target: LOG_TARGET, "registered metric '{key}'");
        let _ = self.factories.insert(key, Box::new(move || Box::new(factory())));
        Ok(())
    }

    /// Produce a brand-new instance of the metric registered under `key`.
    ///
    /// # Errors
    /// Returns an error if the key is not registered.
    pub fn get(&self, key: &MetricKey) -> Result<Box<dyn Metric>, ConfigurationError> {
        self.factories
            .get(key)
            .map(|factory| factory())
            .ok_or_else(|| ConfigurationError::UnknownKey(key.clone()))
    }

    /// Check whether `key` is registered, without instantiating anything.
    #[must_use]
    pub fn has(&self, key: &MetricKey) -> bool {
        self.factories.contains_key(key)
    }

    /// Registered keys, in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &MetricKey> {
        self.factories.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Validate the whole registry without computing anything.
    ///
    /// Checks that every `requires` edge resolves to a registered key, that
    /// both endpoints of every edge share a scope, and that the full graph
    /// is acyclic. Intended to run once at process startup, right after the
    /// built-in set is registered.
    ///
    /// # Errors
    /// Returns the first configuration defect found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut requires_of: HashMap<MetricKey, Vec<MetricKey>> = HashMap::with_capacity(self.factories.len());
        let mut required_by: HashMap<MetricKey, Vec<MetricKey>> = HashMap::new();

        for (key, factory) in &self.factories {
            let metric = factory();
            let mut edges = Vec::new();
            for dep in metric.requires() {
                if edges.contains(&dep) {
                    continue;
                }

                let dep_metric = self.get(&dep)?;
                if dep_metric.scope() != metric.scope() {
                    return Err(ConfigurationError::ScopeMismatch {
                        key: dep,
                        expected: metric.scope(),
                        actual: dep_metric.scope(),
                    });
                }

                required_by.entry(dep.clone()).or_default().push(key.clone());
                edges.push(dep);
            }
            let _ = requires_of.insert(key.clone(), edges);
        }

        evaluation_order(&requires_of, &required_by)
            .map(|_| ())
            .map_err(|unresolved| ConfigurationError::UnresolvedDependencies { unresolved })
    }
}

impl fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.factories.keys().collect();
        keys.sort_unstable();
        f.debug_struct("MetricRegistry").field("keys", &keys).finish()
    }
}
