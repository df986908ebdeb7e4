/**
 * reference module
 *
 * - extractor: ReferenceExtractor trait + shared extraction walk
 * - sparql: SPARQL endpoint reference variant
 * - ssh: SSH path reference variant
 */

pub mod extractor;
pub mod sparql;
pub mod ssh;

pub use extractor::{ExtractorFactory, ReferenceExtractor};
pub use sparql::{SparqlReferenceExtractor, SparqlReferenceFactory};
pub use ssh::{SshReferenceExtractor, SshReferenceFactory};

use oxigraph::model::{Graph, Literal, NamedNode, Triple};
use uuid::Uuid;

use crate::errors::{ArfError, Result};
use crate::vocab::{self, ReferenceVocabulary};

/// Variant-specific reference payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Data reachable through a SPARQL endpoint
    Sparql {
        /// Named graph locator inside the endpoint
        graph: Option<String>,
        endpoint_url: Option<String>,
    },
    /// Data held as a file on an SSH host
    Ssh {
        filename: Option<String>,
        path: Option<String>,
    },
}

/// A typed pointer to data held outside an artifact's own RDF graph
///
/// References are transient: the extractor creates them from a snapshot
/// of a model, the caller either serializes them back into RDF with
/// [`Reference::to_model`] or discards them. `parent_iri` and
/// `repository_alias` must be present before serialization; a missing
/// one fails that single reference, not its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Owning artifact version; typically attached by the caller after
    /// extraction
    pub artifact_id: Option<String>,
    /// The reference's own identity; a temporary placeholder is minted
    /// at serialization time when absent
    pub object_iri: Option<NamedNode>,
    /// Artifact-internal object this reference hangs off
    pub parent_iri: Option<NamedNode>,
    /// Edge type connecting parent to reference
    pub parent_predicate: NamedNode,
    pub label: Option<String>,
    /// Names the external repository configuration resolving this
    /// reference
    pub repository_alias: Option<String>,
    pub kind: ReferenceKind,
}

impl Reference {
    /// Create an empty reference of the given kind
    ///
    /// The parent predicate defaults to `arf:hasDataReference`.
    pub fn new(kind: ReferenceKind) -> Self {
        Self {
            artifact_id: None,
            object_iri: None,
            parent_iri: None,
            parent_predicate: vocab::HAS_DATA_REFERENCE.into_owned(),
            label: None,
            repository_alias: None,
            kind,
        }
    }

    /// RDF class of this reference's variant
    pub fn type_iri<'a>(&self, vocabulary: &'a ReferenceVocabulary) -> &'a NamedNode {
        match self.kind {
            ReferenceKind::Sparql { .. } => &vocabulary.sparql_reference_class,
            ReferenceKind::Ssh { .. } => &vocabulary.ssh_reference_class,
        }
    }

    /// Serialize this reference into an RDF model
    ///
    /// When `object_iri` is unset a temporary placeholder is minted
    /// under `temporary_prefix`; the PURL engine later rewrites it.
    ///
    /// # Errors
    ///
    /// `ReferenceSerialization` when `parent_iri` or `repository_alias`
    /// is missing. This is a caller bug for this one reference; sibling
    /// references from the same extraction are unaffected.
    pub fn to_model(
        &self,
        vocabulary: &ReferenceVocabulary,
        temporary_prefix: &str,
    ) -> Result<Graph> {
        let parent = self.parent_iri.as_ref().ok_or_else(|| {
            ArfError::ReferenceSerialization(format!(
                "reference {:?} has no parent IRI",
                self.label.as_deref().unwrap_or("<unlabeled>")
            ))
        })?;

        let alias = self.repository_alias.as_ref().ok_or_else(|| {
            ArfError::ReferenceSerialization(format!(
                "reference {:?} has no repository alias",
                self.label.as_deref().unwrap_or("<unlabeled>")
            ))
        })?;

        let object = match &self.object_iri {
            Some(iri) => iri.clone(),
            None => mint_temporary_iri(temporary_prefix)?,
        };

        let mut model = Graph::new();
        model.insert(&Triple::new(
            parent.clone(),
            self.parent_predicate.clone(),
            object.clone(),
        ));
        model.insert(&Triple::new(
            object.clone(),
            oxigraph::model::vocab::rdf::TYPE.into_owned(),
            self.type_iri(vocabulary).clone(),
        ));
        model.insert(&Triple::new(
            object.clone(),
            vocabulary.repository_alias.clone(),
            Literal::new_simple_literal(alias),
        ));

        if let Some(label) = &self.label {
            model.insert(&Triple::new(
                object.clone(),
                oxigraph::model::vocab::rdfs::LABEL.into_owned(),
                Literal::new_simple_literal(label),
            ));
        }

        match &self.kind {
            ReferenceKind::Sparql {
                graph,
                endpoint_url,
            } => {
                if let Some(graph) = graph {
                    model.insert(&Triple::new(
                        object.clone(),
                        vocabulary.graph.clone(),
                        Literal::new_simple_literal(graph),
                    ));
                }
                if let Some(endpoint) = endpoint_url {
                    model.insert(&Triple::new(
                        object.clone(),
                        vocabulary.endpoint_url.clone(),
                        Literal::new_simple_literal(endpoint),
                    ));
                }
            }
            ReferenceKind::Ssh { filename, path } => {
                if let Some(filename) = filename {
                    model.insert(&Triple::new(
                        object.clone(),
                        vocabulary.filename.clone(),
                        Literal::new_simple_literal(filename),
                    ));
                }
                if let Some(path) = path {
                    model.insert(&Triple::new(
                        object.clone(),
                        vocabulary.path.clone(),
                        Literal::new_simple_literal(path),
                    ));
                }
            }
        }

        Ok(model)
    }
}

/// Mint a fresh temporary IRI under the given prefix
pub fn mint_temporary_iri(temporary_prefix: &str) -> Result<NamedNode> {
    NamedNode::new(format!("{}{}", temporary_prefix, Uuid::new_v4().simple()))
        .map_err(|e| ArfError::InvalidIri(e.to_string()))
}
