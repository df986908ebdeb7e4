//! # ArtifactRef Core - RDF Artifact Ingestion Pipeline
//!
//! ArtifactRef ingests RDF graphs describing scientific-project
//! artifacts, extracts the typed references those graphs embed
//! (external files on SSH hosts, data behind SPARQL endpoints), and
//! rewrites temporary identifiers to permanent URLs before a graph is
//! persisted.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │   Artifact lifecycle (external collaborator) │
//! └──────────────┬───────────────────────────────┘
//!                │ get_by_stage(stage)
//!     ┌──────────┴──────────┐
//!     │  Factory registry   │── construct query ──► repository
//!     └──────────┬──────────┘                          │
//!        ┌───────┴────────┐                   ┌────────┴───────┐
//!        │   Reference    │                   │  PURL manager  │
//!        │   extractors   │                   │ (rewrite t→p)  │
//!        └────────────────┘                   └────────────────┘
//! ```
//!
//! The repository itself is an injected collaborator behind
//! [`repository::RepositoryConnection`]; both subsystems share the
//! factory-registry shape and the CONSTRUCT query assembler.

pub mod errors;
pub mod pipeline;
pub mod purl;
pub mod reference;
pub mod registry;
pub mod repository;
pub mod sparql;
pub mod stage;
pub mod vocab;

pub use errors::ArfError;
pub use pipeline::{default_registry, discover_factories, ExtractionPipeline, ExtractorRegistry};
pub use purl::{DefaultPurlProcessor, PurlError, PurlManager, PurlProcessor, PurlReference};
pub use reference::{
    ExtractorFactory, Reference, ReferenceExtractor, ReferenceKind, SparqlReferenceExtractor,
    SparqlReferenceFactory, SshReferenceExtractor, SshReferenceFactory,
};
pub use registry::{FactoryRegistry, ProcessorFactory};
pub use repository::{
    RepositoryConfig, RepositoryConfigRegistry, RepositoryConnection, RepositoryEntry,
    StoreConnection,
};
pub use sparql::{ConstructQuery, SubjectScope};
pub use stage::ProcessorStage;
pub use vocab::ReferenceVocabulary;

/// Version of the ArtifactRef core pipeline
pub const VERSION: &str = "0.4.2";
