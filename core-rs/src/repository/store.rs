/**
 * store.rs
 * Oxigraph-backed repository connection
 */

use oxigraph::io::RdfFormat;
use oxigraph::model::{Graph, GraphName, GraphNameRef, NamedNode, Quad};
use oxigraph::sparql::{Query, QueryResults};
use oxigraph::store::Store;

use crate::errors::{ArfError, Result};

use super::RepositoryConnection;

/// In-memory oxigraph store behind the connection capability
///
/// Tests and demos use this directly; deployments wrap their own store
/// the same way.
pub struct StoreConnection {
    store: Store,
}

impl StoreConnection {
    pub fn new() -> Result<Self> {
        let store = Store::new().map_err(|e| ArfError::Store(e.to_string()))?;
        Ok(Self { store })
    }

    /// Load a Turtle document into the default graph
    pub fn load_turtle(&mut self, content: &str) -> Result<()> {
        self.store
            .load_from_reader(RdfFormat::Turtle, content.as_bytes())
            .map_err(|e| ArfError::Store(e.to_string()))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl RepositoryConnection for StoreConnection {
    fn statements(&self, contexts: &[NamedNode]) -> Result<Vec<Quad>> {
        let mut quads = Vec::new();
        if contexts.is_empty() {
            for quad in self.store.iter() {
                quads.push(quad.map_err(|e| ArfError::Store(e.to_string()))?);
            }
        } else {
            for context in contexts {
                let graph = GraphNameRef::NamedNode(context.as_ref());
                for quad in self.store.quads_for_pattern(None, None, None, Some(graph)) {
                    quads.push(quad.map_err(|e| ArfError::Store(e.to_string()))?);
                }
            }
        }
        Ok(quads)
    }

    fn size(&self, contexts: &[NamedNode]) -> Result<usize> {
        if contexts.is_empty() {
            return self.store.len().map_err(|e| ArfError::Store(e.to_string()));
        }
        let mut count = 0;
        for context in contexts {
            let graph = GraphNameRef::NamedNode(context.as_ref());
            for quad in self.store.quads_for_pattern(None, None, None, Some(graph)) {
                quad.map_err(|e| ArfError::Store(e.to_string()))?;
                count += 1;
            }
        }
        Ok(count)
    }

    fn add(&mut self, quad: &Quad) -> Result<()> {
        self.store
            .insert(quad)
            .map(|_| ())
            .map_err(|e| ArfError::Store(e.to_string()))
    }

    fn remove(&mut self, quad: &Quad) -> Result<()> {
        self.store
            .remove(quad)
            .map(|_| ())
            .map_err(|e| ArfError::Store(e.to_string()))
    }

    fn insert_model(&mut self, model: &Graph, context: Option<&NamedNode>) -> Result<()> {
        let graph_name = match context {
            Some(context) => GraphName::NamedNode(context.clone()),
            None => GraphName::DefaultGraph,
        };
        for triple in model.iter() {
            let quad = Quad::new(
                triple.subject.into_owned(),
                triple.predicate.into_owned(),
                triple.object.into_owned(),
                graph_name.clone(),
            );
            self.store
                .insert(&quad)
                .map_err(|e| ArfError::Store(e.to_string()))?;
        }
        Ok(())
    }

    fn evaluate_construct(&self, query: &str) -> Result<Graph> {
        // patterns match across every context, not just the default graph
        let mut query =
            Query::parse(query, None).map_err(|e| ArfError::Query(e.to_string()))?;
        query.dataset_mut().set_default_graph_as_union();

        let results = self
            .store
            .query(query)
            .map_err(|e| ArfError::Query(e.to_string()))?;

        match results {
            QueryResults::Graph(triples) => {
                let mut model = Graph::new();
                for triple in triples {
                    let triple = triple.map_err(|e| ArfError::Query(e.to_string()))?;
                    model.insert(&triple);
                }
                Ok(model)
            }
            _ => Err(ArfError::Query(
                "expected a CONSTRUCT query producing a graph".to_string(),
            )),
        }
    }
}
