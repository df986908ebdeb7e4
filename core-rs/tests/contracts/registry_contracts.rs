// Registry Contract Tests
//
// These tests verify INVARIANTS that MUST NEVER BREAK regardless of
// implementation. The artifact lifecycle layer dispatches entirely
// through the registry; a behavior change here silently changes which
// processors run at which ingestion phase.

use std::sync::Arc;

use arf_core::registry::{FactoryRegistry, ProcessorFactory};
use arf_core::stage::ProcessorStage;

struct FixedFactory {
    key: String,
    stages: Vec<ProcessorStage>,
}

impl FixedFactory {
    fn new(key: &str, stages: &[ProcessorStage]) -> Arc<Self> {
        Arc::new(Self {
            key: key.to_string(),
            stages: stages.to_vec(),
        })
    }
}

impl ProcessorFactory for FixedFactory {
    fn key(&self) -> &str {
        &self.key
    }

    fn stages(&self) -> &[ProcessorStage] {
        &self.stages
    }
}

/// WHY: duplicate keys are ALLOWED - add appends, never rejects or
/// replaces
/// REASON: plugin packs may legitimately ship two processors under one
/// key; exclusivity is the consumer's decision, not the registry's
/// BREAKS: changing this to reject-or-replace silently drops processors
/// at ingestion time
#[test]
fn duplicate_keys_append_and_first_wins_on_lookup() {
    let mut registry: FactoryRegistry<FixedFactory> = FactoryRegistry::new();
    registry.add(FixedFactory::new("shared", &[ProcessorStage::Parse]));
    registry.add(FixedFactory::new("shared", &[ProcessorStage::Infer]));

    // Both entries survive
    assert_eq!(registry.len(), 2);
    let keys: Vec<&str> = registry.get_all().map(|f| f.key()).collect();
    assert_eq!(keys, vec!["shared", "shared"]);

    // Keyed lookup is the FIRST registered entry
    let first = registry.get("shared").unwrap();
    assert_eq!(first.stages(), &[ProcessorStage::Parse]);

    // If this test fails:
    // - You changed the duplicate-key policy
    // - Callers that de-duplicate by key will observe different sets
}

/// WHY: get_by_stage(s) returns exactly the factories declaring s
/// REASON: stage gating is the only dispatch mechanism the lifecycle
/// layer has
/// BREAKS: a factory running at the wrong phase mutates graphs it was
/// never meant to see
#[test]
fn stage_filter_returns_exact_subset() {
    let mut registry: FactoryRegistry<FixedFactory> = FactoryRegistry::new();
    registry.add(FixedFactory::new(
        "a",
        &[ProcessorStage::Parse, ProcessorStage::StoreConcrete],
    ));
    registry.add(FixedFactory::new("b", &[ProcessorStage::StoreConcrete]));
    registry.add(FixedFactory::new("c", &[ProcessorStage::StoreInferred]));

    let keys_for = |stage: ProcessorStage| -> Vec<String> {
        registry
            .get_by_stage(Some(stage))
            .iter()
            .map(|f| f.key().to_string())
            .collect()
    };

    assert_eq!(keys_for(ProcessorStage::Parse), vec!["a"]);
    assert_eq!(keys_for(ProcessorStage::StoreConcrete), vec!["a", "b"]);
    assert_eq!(keys_for(ProcessorStage::StoreInferred), vec!["c"]);
    assert!(keys_for(ProcessorStage::Axiomize).is_empty());
    assert!(keys_for(ProcessorStage::Infer).is_empty());
}

/// WHY: get_by_stage(None) is an EMPTY LIST, never an error
/// REASON: the pipeline treats "no stage" as "match nothing"; callers
/// pass through optional stages without guarding
/// BREAKS: turning this into an error or into "match everything" either
/// crashes ingestion or runs every processor unconditionally
#[test]
fn missing_stage_matches_nothing() {
    let mut registry: FactoryRegistry<FixedFactory> = FactoryRegistry::new();
    registry.add(FixedFactory::new("a", &[ProcessorStage::Parse]));
    registry.add(FixedFactory::new("b", &[ProcessorStage::Infer]));

    assert!(registry.get_by_stage(None).is_empty());
}

/// WHY: iteration order is registration order and stable within a call
/// REASON: processor selection (e.g. first matching PURL processor)
/// depends on it; reordering changes which processor translates a URI
/// BREAKS: nondeterministic processor selection across runs
#[test]
fn iteration_order_is_registration_order() {
    let mut registry: FactoryRegistry<FixedFactory> = FactoryRegistry::new();
    for key in ["one", "two", "three", "four"] {
        registry.add(FixedFactory::new(key, &[ProcessorStage::Parse]));
    }

    let first_pass: Vec<String> = registry.get_all().map(|f| f.key().to_string()).collect();
    let second_pass: Vec<String> = registry.get_all().map(|f| f.key().to_string()).collect();

    assert_eq!(first_pass, vec!["one", "two", "three", "four"]);
    assert_eq!(first_pass, second_pass);
}

/// WHY: remove is keyed and total; clear empties; both tolerate absence
/// REASON: test fixtures rebuild registries between cases with
/// clear-then-add; a panicking remove breaks teardown paths
#[test]
fn remove_and_clear_are_tolerant() {
    let mut registry: FactoryRegistry<FixedFactory> = FactoryRegistry::new();
    registry.add(FixedFactory::new("x", &[ProcessorStage::Parse]));
    registry.add(FixedFactory::new("x", &[ProcessorStage::Infer]));

    assert_eq!(registry.remove("x"), 2);
    assert_eq!(registry.remove("x"), 0);

    registry.add(FixedFactory::new("y", &[ProcessorStage::Parse]));
    registry.clear();
    assert!(registry.is_empty());
    registry.clear();
    assert!(registry.is_empty());
}

/// WHY: the default registry is one shared instance, populated once
/// REASON: concurrent first-uses must not double-populate; the manifest
/// is scanned a single time per process
/// BREAKS: duplicate factories would run every processor twice per stage
#[test]
fn default_registry_is_populated_once() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| arf_core::default_registry().len()))
        .collect();

    let lengths: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for len in &lengths {
        assert_eq!(*len, lengths[0]);
    }
    assert!(std::ptr::eq(
        arf_core::default_registry(),
        arf_core::default_registry()
    ));
}
