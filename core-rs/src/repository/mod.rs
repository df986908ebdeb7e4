/**
 * repository module
 *
 * The triple store itself is an injected collaborator; the pipeline
 * only sees the `RepositoryConnection` capability.
 *
 * - store: oxigraph-backed connection
 * - config: external repository configurations resolved by alias
 */

pub mod config;
pub mod store;

pub use config::{RepositoryConfig, RepositoryConfigRegistry, RepositoryEntry};
pub use store::StoreConnection;

use oxigraph::model::{Graph, NamedNode, Quad};

use crate::errors::Result;

/// Scoped, transactional access to an RDF repository
///
/// Callers own the transaction boundary: acquire, run, commit or roll
/// back on every exit path. The pipeline issues no overlapping writes
/// against one connection; reads and writes within a call are strictly
/// ordered by the caller (`&self` reads, `&mut self` writes).
///
/// An empty `contexts` slice addresses the whole repository; otherwise
/// only the named graphs listed.
pub trait RepositoryConnection {
    /// Every statement in the given contexts
    fn statements(&self, contexts: &[NamedNode]) -> Result<Vec<Quad>>;

    /// Statement count across the given contexts
    fn size(&self, contexts: &[NamedNode]) -> Result<usize>;

    /// Add one statement
    fn add(&mut self, quad: &Quad) -> Result<()>;

    /// Remove one statement; absent statements are a no-op
    fn remove(&mut self, quad: &Quad) -> Result<()>;

    /// Insert an in-memory model, optionally into one named graph
    fn insert_model(&mut self, model: &Graph, context: Option<&NamedNode>) -> Result<()>;

    /// Evaluate a SPARQL CONSTRUCT query into an in-memory model
    fn evaluate_construct(&self, query: &str) -> Result<Graph>;
}
