/**
 * extractor.rs
 * Reference extraction over in-memory RDF models
 *
 * The shared walk lives in the trait's default methods; variants only
 * declare their supported types and how to populate variant fields
 * from a subject's local slice. Extractors never mutate the input
 * model.
 */

use oxigraph::model::{vocab::rdf, Graph, NamedNode, NamedNodeRef, SubjectRef, TermRef};

use crate::registry::ProcessorFactory;
use crate::sparql::{ConstructQuery, SubjectScope};

use super::Reference;

/// Extracts typed references from RDF models
///
/// `can_handle` is a cheap probe; `create_references` runs the full
/// walk. A missing or empty model makes the probe false and the walk
/// return an empty collection - absent input is expected and frequent,
/// never an error.
pub trait ReferenceExtractor: Send + Sync {
    /// RDF classes this extractor is authoritative for; never empty
    fn supported_types(&self) -> &[NamedNode];

    /// Populate one reference from a subject and the full model
    ///
    /// `model` is the complete input, not just the subject's slice, so
    /// implementations can delegate the parent reverse-lookup to
    /// [`find_parent`].
    fn create_reference(&self, subject: NamedNodeRef<'_>, model: &Graph) -> Reference;

    /// True iff the model asserts `rdf:type T` for a supported type T
    fn can_handle(&self, model: Option<&Graph>) -> bool {
        match model {
            Some(model) if !model.is_empty() => self.supported_types().iter().any(|ty| {
                model
                    .iter()
                    .any(|t| t.predicate == rdf::TYPE && t.object == TermRef::from(ty.as_ref()))
            }),
            _ => false,
        }
    }

    /// Extract every reference of a supported type from the model
    ///
    /// Returns an empty collection for a missing or empty model. Each
    /// typed subject yields exactly one reference.
    fn create_references(&self, model: Option<&Graph>) -> Vec<Reference> {
        let model = match model {
            Some(model) if !model.is_empty() => model,
            _ => return Vec::new(),
        };

        let mut references = Vec::new();
        for ty in self.supported_types() {
            let subjects: Vec<NamedNode> = model
                .iter()
                .filter(|t| {
                    t.predicate == rdf::TYPE && t.object == TermRef::from(ty.as_ref())
                })
                .filter_map(|t| match t.subject {
                    SubjectRef::NamedNode(n) => Some(n.into_owned()),
                    _ => None,
                })
                .collect();

            for subject in subjects {
                references.push(self.create_reference(subject.as_ref(), model));
            }
        }
        references
    }
}

/// First value of `predicate` on `subject`, as a plain string
///
/// Source models carry at most one value per property in practice, so
/// "first encountered" is the only tie-break. Literals yield their
/// lexical form, IRIs their string.
pub fn first_value(model: &Graph, subject: NamedNodeRef<'_>, predicate: NamedNodeRef<'_>) -> Option<String> {
    model
        .iter()
        .filter(|t| t.subject == SubjectRef::from(subject) && t.predicate == predicate)
        .find_map(|t| match t.object {
            TermRef::Literal(l) => Some(l.value().to_string()),
            TermRef::NamedNode(n) => Some(n.as_str().to_string()),
            _ => None,
        })
}

/// Reverse lookup reattaching a reference to its containing object
///
/// The local slice of a subject excludes incoming edges by definition,
/// so the parent is found by scanning the whole model for the first
/// triple whose object is the subject. Returns `(parent, predicate)`.
pub fn find_parent(model: &Graph, subject: NamedNodeRef<'_>) -> Option<(NamedNode, NamedNode)> {
    model
        .iter()
        .filter(|t| t.object == TermRef::from(subject))
        .find_map(|t| match t.subject {
            SubjectRef::NamedNode(parent) => {
                Some((parent.into_owned(), t.predicate.into_owned()))
            }
            _ => None,
        })
}

/// Factory producing a reference extractor plus the query fragments
/// that select its subgraph
///
/// The lifecycle layer assembles one CONSTRUCT query per factory from
/// these fragments, evaluates it against the repository, and hands the
/// resulting model to the extractor.
pub trait ExtractorFactory: ProcessorFactory {
    /// Variable naming the candidate subject in the fragments
    fn subject_variable(&self) -> &str;

    /// Triple patterns for the CONSTRUCT template
    fn bgp_fragment(&self) -> String;

    /// Patterns for the WHERE clause
    fn where_fragment(&self) -> String;

    /// Optional GROUP BY fragment
    fn group_by_fragment(&self) -> Option<String> {
        None
    }

    /// Create the extractor this factory is responsible for
    fn create_extractor(&self) -> Box<dyn ReferenceExtractor>;

    /// Assemble this factory's CONSTRUCT query
    ///
    /// With a subject the query is scoped to that one candidate; without
    /// one it selects every match in the graph.
    fn construct_query(&self, subject: Option<&NamedNode>) -> ConstructQuery {
        let scope = subject.map(|s| SubjectScope::new(self.subject_variable(), s.clone()));
        ConstructQuery::assemble(
            &self.bgp_fragment(),
            &self.where_fragment(),
            scope.as_ref(),
            self.group_by_fragment().as_deref(),
        )
    }
}
