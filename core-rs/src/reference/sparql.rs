/**
 * sparql.rs
 * SPARQL endpoint reference variant
 *
 * Points at data reachable through a SPARQL endpoint: a named graph
 * locator plus an optional endpoint URL.
 */

use oxigraph::model::{vocab::rdfs, Graph, NamedNode, NamedNodeRef};

use crate::stage::ProcessorStage;
use crate::registry::ProcessorFactory;
use crate::vocab::ReferenceVocabulary;

use super::extractor::{find_parent, first_value, ExtractorFactory, ReferenceExtractor};
use super::{Reference, ReferenceKind};

pub struct SparqlReferenceExtractor {
    vocabulary: ReferenceVocabulary,
    types: Vec<NamedNode>,
}

impl SparqlReferenceExtractor {
    pub fn new(vocabulary: ReferenceVocabulary) -> Self {
        let types = vec![vocabulary.sparql_reference_class.clone()];
        Self { vocabulary, types }
    }
}

impl Default for SparqlReferenceExtractor {
    fn default() -> Self {
        Self::new(ReferenceVocabulary::default())
    }
}

impl ReferenceExtractor for SparqlReferenceExtractor {
    fn supported_types(&self) -> &[NamedNode] {
        &self.types
    }

    fn create_reference(&self, subject: NamedNodeRef<'_>, model: &Graph) -> Reference {
        let vocabulary = &self.vocabulary;
        let mut reference = Reference::new(ReferenceKind::Sparql {
            graph: first_value(model, subject, vocabulary.graph.as_ref()),
            endpoint_url: first_value(model, subject, vocabulary.endpoint_url.as_ref()),
        });

        reference.object_iri = Some(subject.into_owned());
        reference.label = first_value(model, subject, rdfs::LABEL);
        reference.repository_alias =
            first_value(model, subject, vocabulary.repository_alias.as_ref());

        if let Some((parent, predicate)) = find_parent(model, subject) {
            reference.parent_iri = Some(parent);
            reference.parent_predicate = predicate;
        }

        reference
    }
}

/// Factory wiring the SPARQL reference extractor into the registry
pub struct SparqlReferenceFactory {
    vocabulary: ReferenceVocabulary,
    stages: Vec<ProcessorStage>,
}

impl SparqlReferenceFactory {
    pub const KEY: &'static str = "sparql-reference";

    pub fn new() -> Self {
        Self::with_stages(vec![ProcessorStage::StoreConcrete])
    }

    pub fn with_stages(stages: Vec<ProcessorStage>) -> Self {
        Self {
            vocabulary: ReferenceVocabulary::default(),
            stages,
        }
    }
}

impl Default for SparqlReferenceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorFactory for SparqlReferenceFactory {
    fn key(&self) -> &str {
        Self::KEY
    }

    fn stages(&self) -> &[ProcessorStage] {
        &self.stages
    }
}

impl ExtractorFactory for SparqlReferenceFactory {
    fn subject_variable(&self) -> &str {
        "reference"
    }

    fn bgp_fragment(&self) -> String {
        "?reference ?p ?o . ?parent ?incoming ?reference .".to_string()
    }

    fn where_fragment(&self) -> String {
        format!(
            "?reference a <{}> . OPTIONAL {{ ?reference ?p ?o . }} \
             OPTIONAL {{ ?parent ?incoming ?reference . }}",
            self.vocabulary.sparql_reference_class
        )
    }

    fn create_extractor(&self) -> Box<dyn ReferenceExtractor> {
        Box::new(SparqlReferenceExtractor::new(self.vocabulary.clone()))
    }
}
