/**
 * registry.rs
 * Keyed collection of pluggable processor factories
 *
 * The registry is the single dispatch surface the artifact lifecycle
 * layer sees: it asks `get_by_stage` which factories run at each
 * ingestion phase. Both the reference-extraction subsystem and the
 * PURL engine register their factories through this shape.
 *
 * Duplicate keys are allowed: `add` appends, iteration follows
 * registration order and `get` returns the first match. Callers that
 * need exclusivity de-duplicate by key themselves.
 */

use std::sync::Arc;

use crate::stage::ProcessorStage;

/// Capability every registrable factory exposes
///
/// `key` is process-unique by convention and stable for the lifetime of
/// the factory instance; `stages` is the set of lifecycle phases the
/// factory participates in.
pub trait ProcessorFactory: Send + Sync {
    fn key(&self) -> &str;

    fn stages(&self) -> &[ProcessorStage];
}

/// Ordered, duplicate-tolerant factory registry
///
/// Construction is dual-mode: `new()` yields an empty registry for
/// manual population (tests own their instance), while the pipeline
/// module builds the process-wide default from the static plugin
/// manifest exactly once. After population the registry is read-mostly;
/// all read paths take `&self`.
pub struct FactoryRegistry<F: ProcessorFactory + ?Sized> {
    factories: Vec<Arc<F>>,
}

impl<F: ProcessorFactory + ?Sized> FactoryRegistry<F> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Create a registry populated from the given factories, in order
    pub fn from_factories(factories: impl IntoIterator<Item = Arc<F>>) -> Self {
        Self {
            factories: factories.into_iter().collect(),
        }
    }

    /// Register a factory
    ///
    /// Appends unconditionally; a factory whose key is already present
    /// is not rejected and not replaced.
    pub fn add(&mut self, factory: Arc<F>) {
        self.factories.push(factory);
    }

    /// Remove every factory registered under `key`
    ///
    /// Returns the number of entries removed; absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.factories.len();
        self.factories.retain(|f| f.key() != key);
        before - self.factories.len()
    }

    /// Remove all factories
    pub fn clear(&mut self) {
        self.factories.clear();
    }

    /// Look up the first factory registered under `key`
    pub fn get(&self, key: &str) -> Option<&Arc<F>> {
        self.factories.iter().find(|f| f.key() == key)
    }

    /// Iterate all registered factories in registration order
    ///
    /// The iterator is restartable: each call yields a fresh pass over
    /// the same snapshot of entries.
    pub fn get_all(&self) -> impl Iterator<Item = &Arc<F>> {
        self.factories.iter()
    }

    /// Factories participating in `stage`
    ///
    /// `None` matches nothing and yields an empty list; the surrounding
    /// pipeline treats "no stage" as an empty filter, not an error.
    pub fn get_by_stage(&self, stage: Option<ProcessorStage>) -> Vec<Arc<F>> {
        match stage {
            Some(stage) => self
                .factories
                .iter()
                .filter(|f| f.stages().contains(&stage))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<F: ProcessorFactory + ?Sized> Default for FactoryRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}
