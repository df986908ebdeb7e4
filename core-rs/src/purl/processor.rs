/**
 * processor.rs
 * Prefix-based PURL processors
 *
 * A processor owns a mutable set of temporary-URI prefixes it is
 * responsible for and one permanent namespace it mints into.
 * `can_handle` is the safe probe; `handle_translation` is the hard,
 * precondition-checked operation. The asymmetry is intentional.
 */

use std::sync::RwLock;

use once_cell::sync::Lazy;
use oxigraph::model::NamedNode;
use regex::Regex;
use uuid::Uuid;

use crate::registry::ProcessorFactory;
use crate::stage::ProcessorStage;
use crate::vocab::DEFAULT_PERMANENT_PREFIX;

use super::{PurlError, PurlReference, PurlResult};

// URIs must open with a scheme for prefix matching to be meaningful
static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme pattern"));

/// Translates temporary URIs under registered prefixes into permanent
/// ones
///
/// Processors register through the same factory-registry shape as the
/// extraction subsystem; `key` identifies the processor in not-handled
/// errors and `stages` gates when the lifecycle layer runs it.
pub trait PurlProcessor: ProcessorFactory {
    /// Register a temporary-URI prefix this processor handles
    ///
    /// Rejects empty prefixes, prefixes without a URI scheme, and
    /// prefixes that would match the processor's own permanent
    /// namespace (minted PURLs must never be re-translated).
    fn add_temporary_uri_handler(&self, prefix: &str) -> PurlResult<()>;

    /// Unregister a prefix; no-op when absent
    fn remove_temporary_uri_handler(&self, prefix: &str);

    /// Safe probe: true iff the URI starts with a registered prefix
    ///
    /// False for an empty URI or an empty prefix set; never fails.
    fn can_handle(&self, uri: &str) -> bool;

    /// Translate one temporary URI
    ///
    /// With a `parent_uri` that lives under this processor's permanent
    /// namespace, the permanent URI is `parent_uri` + the temporary
    /// URI's suffix after its matched prefix, colocating the reference
    /// under the caller's namespace. Otherwise a fresh token is minted
    /// under the permanent namespace.
    ///
    /// # Errors
    ///
    /// `NotHandled` when no registered prefix matches; `InvalidUri`
    /// when the input is empty or not an IRI.
    fn handle_translation(
        &self,
        uri: &str,
        parent_uri: Option<&str>,
    ) -> PurlResult<PurlReference>;
}

/// Standard prefix-substituting processor
pub struct DefaultPurlProcessor {
    key: String,
    stages: Vec<ProcessorStage>,
    permanent_prefix: String,
    temporary_prefixes: RwLock<Vec<String>>,
}

impl DefaultPurlProcessor {
    pub fn new(key: impl Into<String>, permanent_prefix: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            stages: vec![ProcessorStage::StoreConcrete, ProcessorStage::StoreInferred],
            permanent_prefix: permanent_prefix.into(),
            temporary_prefixes: RwLock::new(Vec::new()),
        }
    }

    /// Processor minting into the canonical ArtifactRef PURL namespace
    pub fn with_default_namespace(key: impl Into<String>) -> Self {
        Self::new(key, DEFAULT_PERMANENT_PREFIX)
    }

    pub fn permanent_prefix(&self) -> &str {
        &self.permanent_prefix
    }

    fn prefixes(&self) -> Vec<String> {
        match self.temporary_prefixes.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn mint_permanent(&self) -> String {
        format!("{}{}", self.permanent_prefix, Uuid::new_v4().simple())
    }
}

impl ProcessorFactory for DefaultPurlProcessor {
    fn key(&self) -> &str {
        &self.key
    }

    fn stages(&self) -> &[ProcessorStage] {
        &self.stages
    }
}

impl PurlProcessor for DefaultPurlProcessor {
    fn add_temporary_uri_handler(&self, prefix: &str) -> PurlResult<()> {
        if prefix.is_empty() {
            return Err(PurlError::InvalidPrefix(
                "temporary prefix must not be empty".to_string(),
            ));
        }
        if !SCHEME_RE.is_match(prefix) {
            return Err(PurlError::InvalidPrefix(format!(
                "temporary prefix has no URI scheme: {}",
                prefix
            )));
        }
        if self.permanent_prefix.starts_with(prefix) {
            return Err(PurlError::InvalidPrefix(format!(
                "temporary prefix matches permanent namespace: {}",
                prefix
            )));
        }

        let mut prefixes = match self.temporary_prefixes.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !prefixes.iter().any(|p| p == prefix) {
            prefixes.push(prefix.to_string());
        }
        Ok(())
    }

    fn remove_temporary_uri_handler(&self, prefix: &str) {
        let mut prefixes = match self.temporary_prefixes.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        prefixes.retain(|p| p != prefix);
    }

    fn can_handle(&self, uri: &str) -> bool {
        if uri.is_empty() {
            return false;
        }
        self.prefixes().iter().any(|p| uri.starts_with(p.as_str()))
    }

    fn handle_translation(
        &self,
        uri: &str,
        parent_uri: Option<&str>,
    ) -> PurlResult<PurlReference> {
        if uri.is_empty() {
            return Err(PurlError::InvalidUri("empty URI".to_string()));
        }

        let matched = self
            .prefixes()
            .into_iter()
            .find(|p| uri.starts_with(p.as_str()))
            .ok_or_else(|| PurlError::NotHandled {
                uri: uri.to_string(),
                processor: self.key.clone(),
            })?;

        let suffix = &uri[matched.len()..];
        let mut permanent = match parent_uri {
            Some(parent) if parent.starts_with(&self.permanent_prefix) => {
                format!("{}{}", parent, suffix)
            }
            _ => self.mint_permanent(),
        };
        // prefix substitution can collapse to the input when the caller
        // hands a degenerate parent; mint instead of violating t != p
        if permanent == uri {
            permanent = self.mint_permanent();
        }

        let temporary = NamedNode::new(uri).map_err(|e| PurlError::InvalidUri(e.to_string()))?;
        let permanent =
            NamedNode::new(permanent).map_err(|e| PurlError::InvalidUri(e.to_string()))?;
        PurlReference::new(temporary, permanent)
    }
}
