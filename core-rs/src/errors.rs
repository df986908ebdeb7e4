//! Error types for ArtifactRef Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArfError {
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    #[error("Invalid prefix: {0}")]
    InvalidPrefix(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Reference serialization error: {0}")]
    ReferenceSerialization(String),

    #[error("Repository config not found: {0}")]
    RepositoryConfigNotFound(String),

    #[error("Repository already registered: {0}")]
    RepositoryAlreadyRegistered(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Path error: {0}")]
    Path(String),
}

impl From<crate::purl::PurlError> for ArfError {
    fn from(err: crate::purl::PurlError) -> Self {
        match err {
            crate::purl::PurlError::InvalidPrefix(p) => ArfError::InvalidPrefix(p),
            other => ArfError::Store(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArfError>;
