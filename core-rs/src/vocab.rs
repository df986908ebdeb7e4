/**
 * vocab.rs
 * Fixed vocabulary terms consumed by the extraction pipeline
 *
 * All predicates and class IRIs used to read and write reference
 * descriptions are configuration, not computed values. The constants
 * below are the canonical ArtifactRef terms; `ReferenceVocabulary`
 * bundles them so callers can inject an alternative vocabulary
 * (e.g. a deployment that maps references onto its own ontology).
 */

use oxigraph::model::{NamedNode, NamedNodeRef};

/// ArtifactRef ontology namespace
pub const ONTOLOGY_NS: &str = "https://artifactref.org/ontology#";

/// Default permanent namespace minted PURLs live under
pub const DEFAULT_PERMANENT_PREFIX: &str = "https://purl.artifactref.org/resource/";

/// Default temporary namespace for not-yet-persisted objects
pub const DEFAULT_TEMPORARY_PREFIX: &str = "urn:temp:";

/// arf:hasDataReference - edge from an artifact object to a reference
pub const HAS_DATA_REFERENCE: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://artifactref.org/ontology#hasDataReference");

/// arf:repositoryAlias - names the external repository config for a reference
pub const REPOSITORY_ALIAS: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://artifactref.org/ontology#repositoryAlias");

/// arf:graph - named graph locator of a SPARQL reference
pub const GRAPH: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://artifactref.org/ontology#graph");

/// arf:endpointURL - endpoint of a SPARQL reference
pub const ENDPOINT_URL: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://artifactref.org/ontology#endpointURL");

/// arf:filename - file name of an SSH reference
pub const FILENAME: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://artifactref.org/ontology#filename");

/// arf:path - remote path of an SSH reference
pub const PATH: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://artifactref.org/ontology#path");

/// arf:SparqlDataReference - class of SPARQL endpoint references
pub const SPARQL_REFERENCE_CLASS: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://artifactref.org/ontology#SparqlDataReference");

/// arf:SshDataReference - class of SSH path references
pub const SSH_REFERENCE_CLASS: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://artifactref.org/ontology#SshDataReference");

/// Injected vocabulary bundle for reference extraction and serialization
///
/// Extractors and the reference serializer read every IRI they touch from
/// this struct. The `Default` instance is the canonical ArtifactRef
/// vocabulary above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceVocabulary {
    pub has_data_reference: NamedNode,
    pub repository_alias: NamedNode,
    pub graph: NamedNode,
    pub endpoint_url: NamedNode,
    pub filename: NamedNode,
    pub path: NamedNode,
    pub sparql_reference_class: NamedNode,
    pub ssh_reference_class: NamedNode,
}

impl Default for ReferenceVocabulary {
    fn default() -> Self {
        Self {
            has_data_reference: HAS_DATA_REFERENCE.into_owned(),
            repository_alias: REPOSITORY_ALIAS.into_owned(),
            graph: GRAPH.into_owned(),
            endpoint_url: ENDPOINT_URL.into_owned(),
            filename: FILENAME.into_owned(),
            path: PATH.into_owned(),
            sparql_reference_class: SPARQL_REFERENCE_CLASS.into_owned(),
            ssh_reference_class: SSH_REFERENCE_CLASS.into_owned(),
        }
    }
}
