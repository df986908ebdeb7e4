/**
 * manager.rs
 * PURL resolution over a repository connection
 *
 * Discovery: scan subject and object positions of every statement in
 * the given contexts; the first registered processor whose probe
 * matches performs the translation, once per distinct temporary URI.
 * Predicates are fixed vocabulary terms and are never inspected.
 *
 * Conversion: all affected statements are collected before the first
 * write, so the rewrite never races its own result cursor.
 */

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use oxigraph::model::{NamedNode, Quad, Subject, Term};

use crate::errors::Result;
use crate::registry::FactoryRegistry;
use crate::repository::RepositoryConnection;

use super::{PurlProcessor, PurlReference};

/// Orchestrates a registry of PURL processors against a repository
pub struct PurlManager {
    processors: FactoryRegistry<dyn PurlProcessor>,
}

impl PurlManager {
    pub fn new() -> Self {
        Self {
            processors: FactoryRegistry::new(),
        }
    }

    pub fn from_processors(
        processors: impl IntoIterator<Item = Arc<dyn PurlProcessor>>,
    ) -> Self {
        Self {
            processors: FactoryRegistry::from_factories(processors),
        }
    }

    pub fn processors(&self) -> &FactoryRegistry<dyn PurlProcessor> {
        &self.processors
    }

    pub fn processors_mut(&mut self) -> &mut FactoryRegistry<dyn PurlProcessor> {
        &mut self.processors
    }

    /// Discover and translate every temporary URI in the contexts
    ///
    /// Each distinct temporary URI is translated exactly once, so the
    /// returned set never contains two pairs with the same temporary
    /// URI, and distinct temporaries map to distinct permanents.
    pub fn extract_purl_references(
        &self,
        conn: &dyn RepositoryConnection,
        contexts: &[NamedNode],
    ) -> Result<HashSet<PurlReference>> {
        self.extract(None, conn, contexts)
    }

    /// Like [`Self::extract_purl_references`], but every translation is
    /// offered `parent_uri`, colocating references under one namespace
    pub fn extract_purl_references_with_parent(
        &self,
        parent_uri: &NamedNode,
        conn: &dyn RepositoryConnection,
        contexts: &[NamedNode],
    ) -> Result<HashSet<PurlReference>> {
        self.extract(Some(parent_uri.as_str()), conn, contexts)
    }

    fn extract(
        &self,
        parent_uri: Option<&str>,
        conn: &dyn RepositoryConnection,
        contexts: &[NamedNode],
    ) -> Result<HashSet<PurlReference>> {
        let mut translated: HashMap<String, PurlReference> = HashMap::new();
        let mut minted: HashSet<String> = HashSet::new();

        for quad in conn.statements(contexts)? {
            let mut candidates: Vec<&NamedNode> = Vec::with_capacity(2);
            if let Subject::NamedNode(n) = &quad.subject {
                candidates.push(n);
            }
            if let Term::NamedNode(n) = &quad.object {
                candidates.push(n);
            }

            for candidate in candidates {
                let uri = candidate.as_str();
                if translated.contains_key(uri) {
                    continue;
                }
                let processor = match self.processors.get_all().find(|p| p.can_handle(uri)) {
                    Some(processor) => processor,
                    None => continue,
                };

                let mut reference = processor.handle_translation(uri, parent_uri)?;
                // distinct temporaries must yield distinct permanents;
                // a suffix clash under one parent falls back to minting
                if !minted.insert(reference.permanent_uri().as_str().to_string()) {
                    reference = processor.handle_translation(uri, None)?;
                    minted.insert(reference.permanent_uri().as_str().to_string());
                }
                translated.insert(uri.to_string(), reference);
            }
        }

        Ok(translated.into_values().collect())
    }

    /// Rewrite every occurrence of each temporary URI to its permanent
    /// counterpart
    ///
    /// Statements are replaced in subject and object positions only.
    /// An empty set or an empty repository is a no-op. The statement
    /// count of every touched context is unchanged afterwards, and no
    /// remaining statement references any temporary URI from the set.
    /// Transaction boundaries stay with the caller.
    pub fn convert_temporary_uris(
        &self,
        purls: &HashSet<PurlReference>,
        conn: &mut dyn RepositoryConnection,
        contexts: &[NamedNode],
    ) -> Result<()> {
        if purls.is_empty() {
            return Ok(());
        }

        let substitutions: HashMap<&str, &NamedNode> = purls
            .iter()
            .map(|r| (r.temporary_uri().as_str(), r.permanent_uri()))
            .collect();

        // read phase: every affected statement, before any mutation
        let mut replacements: Vec<(Quad, Quad)> = Vec::new();
        for quad in conn.statements(contexts)? {
            let mut changed = false;

            let subject = match &quad.subject {
                Subject::NamedNode(n) => match substitutions.get(n.as_str()) {
                    Some(permanent) => {
                        changed = true;
                        Subject::NamedNode((*permanent).clone())
                    }
                    None => quad.subject.clone(),
                },
                other => other.clone(),
            };

            let object = match &quad.object {
                Term::NamedNode(n) => match substitutions.get(n.as_str()) {
                    Some(permanent) => {
                        changed = true;
                        Term::NamedNode((*permanent).clone())
                    }
                    None => quad.object.clone(),
                },
                other => other.clone(),
            };

            if changed {
                let rewritten = Quad::new(
                    subject,
                    quad.predicate.clone(),
                    object,
                    quad.graph_name.clone(),
                );
                replacements.push((quad, rewritten));
            }
        }

        // write phase
        tracing::debug!(statements = replacements.len(), "converting temporary URIs");
        for (old, new) in &replacements {
            conn.remove(old)?;
            conn.add(new)?;
        }
        Ok(())
    }
}

impl Default for PurlManager {
    fn default() -> Self {
        Self::new()
    }
}
