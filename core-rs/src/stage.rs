/**
 * stage.rs
 * Artifact ingestion lifecycle stages
 *
 * A stage is a filter key: factories declare the stages they participate
 * in and the lifecycle layer asks the registry which factories run at
 * each phase. The set is closed and ordered; stages carry no payload.
 */

use std::fmt;
use std::str::FromStr;

use crate::errors::ArfError;

/// Ordered lifecycle phases of artifact ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProcessorStage {
    /// Raw RDF parsed into an in-memory model
    Parse,
    /// Structural axioms attached to the parsed model
    Axiomize,
    /// Profile conformance checked
    ProfileCheck,
    /// Logical consistency checked
    ConsistencyCheck,
    /// Concrete (asserted) statements persisted
    StoreConcrete,
    /// Inference run over the persisted statements
    Infer,
    /// Inferred statements persisted
    StoreInferred,
}

impl ProcessorStage {
    /// All stages in lifecycle order
    pub const ALL: [ProcessorStage; 7] = [
        ProcessorStage::Parse,
        ProcessorStage::Axiomize,
        ProcessorStage::ProfileCheck,
        ProcessorStage::ConsistencyCheck,
        ProcessorStage::StoreConcrete,
        ProcessorStage::Infer,
        ProcessorStage::StoreInferred,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessorStage::Parse => "parse",
            ProcessorStage::Axiomize => "axiomize",
            ProcessorStage::ProfileCheck => "profile-check",
            ProcessorStage::ConsistencyCheck => "consistency-check",
            ProcessorStage::StoreConcrete => "store-concrete",
            ProcessorStage::Infer => "infer",
            ProcessorStage::StoreInferred => "store-inferred",
        }
    }
}

impl fmt::Display for ProcessorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessorStage {
    type Err = ArfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parse" => Ok(ProcessorStage::Parse),
            "axiomize" => Ok(ProcessorStage::Axiomize),
            "profile-check" => Ok(ProcessorStage::ProfileCheck),
            "consistency-check" => Ok(ProcessorStage::ConsistencyCheck),
            "store-concrete" => Ok(ProcessorStage::StoreConcrete),
            "infer" => Ok(ProcessorStage::Infer),
            "store-inferred" => Ok(ProcessorStage::StoreInferred),
            other => Err(ArfError::InvalidStage(other.to_string())),
        }
    }
}
