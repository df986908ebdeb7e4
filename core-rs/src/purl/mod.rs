/**
 * purl module
 *
 * Permanent-URL resolution: discovers temporary URIs in a stored graph
 * and substitutes permanent ones.
 *
 * - processor: PurlProcessor trait + prefix-based default implementation
 * - manager: orchestrates processors over a repository connection
 */

pub mod manager;
pub mod processor;

pub use manager::PurlManager;
pub use processor::{DefaultPurlProcessor, PurlProcessor};

use oxigraph::model::NamedNode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PurlError {
    /// No registered prefix matched the URI. Catchable: the caller may
    /// ask another processor or leave the URI temporary.
    #[error("URI not handled by processor '{processor}': {uri}")]
    NotHandled { uri: String, processor: String },

    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    #[error("Invalid prefix: {0}")]
    InvalidPrefix(String),

    /// Translation produced the input URI again
    #[error("Translation did not change URI: {0}")]
    IdentityTranslation(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type PurlResult<T> = std::result::Result<T, PurlError>;

/// An immutable temporary-to-permanent URI pair
///
/// Created only by a successful translation, so `temporary_uri` and
/// `permanent_uri` are guaranteed distinct. One extraction call
/// produces at most one pair per distinct temporary URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PurlReference {
    temporary_uri: NamedNode,
    permanent_uri: NamedNode,
}

impl PurlReference {
    /// Build a pair, enforcing the non-identity invariant
    pub fn new(temporary_uri: NamedNode, permanent_uri: NamedNode) -> PurlResult<Self> {
        if temporary_uri == permanent_uri {
            return Err(PurlError::IdentityTranslation(
                temporary_uri.as_str().to_string(),
            ));
        }
        Ok(Self {
            temporary_uri,
            permanent_uri,
        })
    }

    pub fn temporary_uri(&self) -> &NamedNode {
        &self.temporary_uri
    }

    pub fn permanent_uri(&self) -> &NamedNode {
        &self.permanent_uri
    }
}
