/**
 * pipeline.rs
 * Stage-gated extraction runner and plugin wiring
 *
 * Plugin discovery is an explicit manifest: a static list of factory
 * constructors iterated in registration order. No runtime reflection.
 * The process-wide default registry is built from the manifest exactly
 * once, under Lazy's mutual exclusion; tests construct their own empty
 * registries instead.
 */

use std::sync::Arc;

use once_cell::sync::Lazy;
use oxigraph::model::NamedNode;

use crate::errors::Result;
use crate::reference::{ExtractorFactory, Reference, SparqlReferenceFactory, SshReferenceFactory};
use crate::registry::FactoryRegistry;
use crate::repository::RepositoryConnection;
use crate::stage::ProcessorStage;

/// Registry of reference-extractor factories
pub type ExtractorRegistry = FactoryRegistry<dyn ExtractorFactory>;

type FactoryConstructor = fn() -> Arc<dyn ExtractorFactory>;

fn sparql_reference_factory() -> Arc<dyn ExtractorFactory> {
    Arc::new(SparqlReferenceFactory::new())
}

fn ssh_reference_factory() -> Arc<dyn ExtractorFactory> {
    Arc::new(SshReferenceFactory::new())
}

/// Built-in extractor factories, in registration order
static PLUGIN_MANIFEST: &[FactoryConstructor] =
    &[sparql_reference_factory, ssh_reference_factory];

/// Build a registry populated from the plugin manifest
pub fn discover_factories() -> ExtractorRegistry {
    FactoryRegistry::from_factories(PLUGIN_MANIFEST.iter().map(|constructor| constructor()))
}

static DEFAULT_REGISTRY: Lazy<ExtractorRegistry> = Lazy::new(discover_factories);

/// The process-wide default registry
///
/// Populated on first use; concurrent first-uses cannot double-populate.
/// Read-only once built - callers needing a mutable registry construct
/// their own via [`ExtractorRegistry::new`] or [`discover_factories`].
pub fn default_registry() -> &'static ExtractorRegistry {
    &DEFAULT_REGISTRY
}

/// Runs every registered extractor factory eligible at a stage
pub struct ExtractionPipeline<'a> {
    registry: &'a ExtractorRegistry,
}

impl<'a> ExtractionPipeline<'a> {
    pub fn new(registry: &'a ExtractorRegistry) -> Self {
        Self { registry }
    }

    /// Pipeline over the process-wide default registry
    pub fn with_defaults() -> ExtractionPipeline<'static> {
        ExtractionPipeline {
            registry: default_registry(),
        }
    }

    /// Extract references with every factory eligible at `stage`
    ///
    /// `None` matches no factory and yields an empty collection.
    pub fn run_stage(
        &self,
        stage: Option<ProcessorStage>,
        conn: &dyn RepositoryConnection,
    ) -> Result<Vec<Reference>> {
        self.run(stage, None, conn)
    }

    /// Re-run extraction for one newly created subject only
    ///
    /// Each factory's query is scoped with a VALUES binding instead of
    /// rescanning the whole graph.
    pub fn run_stage_for_subject(
        &self,
        stage: Option<ProcessorStage>,
        subject: &NamedNode,
        conn: &dyn RepositoryConnection,
    ) -> Result<Vec<Reference>> {
        self.run(stage, Some(subject), conn)
    }

    fn run(
        &self,
        stage: Option<ProcessorStage>,
        subject: Option<&NamedNode>,
        conn: &dyn RepositoryConnection,
    ) -> Result<Vec<Reference>> {
        let mut references = Vec::new();
        for factory in self.registry.get_by_stage(stage) {
            let query = factory.construct_query(subject);
            let model = conn.evaluate_construct(query.as_str())?;

            let extractor = factory.create_extractor();
            if extractor.can_handle(Some(&model)) {
                let extracted = extractor.create_references(Some(&model));
                tracing::debug!(
                    factory = factory.key(),
                    count = extracted.len(),
                    "extracted references"
                );
                references.extend(extracted);
            }
        }
        Ok(references)
    }
}
