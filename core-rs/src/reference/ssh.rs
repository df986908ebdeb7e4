/**
 * ssh.rs
 * SSH path reference variant
 *
 * Points at a file held on an SSH host: a file name plus the remote
 * directory path. Transfer itself is the caller's concern.
 */

use oxigraph::model::{vocab::rdfs, Graph, NamedNode, NamedNodeRef};

use crate::stage::ProcessorStage;
use crate::registry::ProcessorFactory;
use crate::vocab::ReferenceVocabulary;

use super::extractor::{find_parent, first_value, ExtractorFactory, ReferenceExtractor};
use super::{Reference, ReferenceKind};

pub struct SshReferenceExtractor {
    vocabulary: ReferenceVocabulary,
    types: Vec<NamedNode>,
}

impl SshReferenceExtractor {
    pub fn new(vocabulary: ReferenceVocabulary) -> Self {
        let types = vec![vocabulary.ssh_reference_class.clone()];
        Self { vocabulary, types }
    }
}

impl Default for SshReferenceExtractor {
    fn default() -> Self {
        Self::new(ReferenceVocabulary::default())
    }
}

impl ReferenceExtractor for SshReferenceExtractor {
    fn supported_types(&self) -> &[NamedNode] {
        &self.types
    }

    fn create_reference(&self, subject: NamedNodeRef<'_>, model: &Graph) -> Reference {
        let vocabulary = &self.vocabulary;
        let mut reference = Reference::new(ReferenceKind::Ssh {
            filename: first_value(model, subject, vocabulary.filename.as_ref()),
            path: first_value(model, subject, vocabulary.path.as_ref()),
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

/// Factory wiring the SSH reference extractor into the registry
pub struct SshReferenceFactory {
    vocabulary: ReferenceVocabulary,
    stages: Vec<ProcessorStage>,
}

impl SshReferenceFactory {
    pub const KEY: &'static str = "ssh-reference";

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

impl Default for SshReferenceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorFactory for SshReferenceFactory {
    fn key(&self) -> &str {
        Self::KEY
    }

    fn stages(&self) -> &[ProcessorStage] {
        &self.stages
    }
}

impl ExtractorFactory for SshReferenceFactory {
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
            self.vocabulary.ssh_reference_class
        )
    }

    fn create_extractor(&self) -> Box<dyn ReferenceExtractor> {
        Box::new(SshReferenceExtractor::new(self.vocabulary.clone()))
    }
}
