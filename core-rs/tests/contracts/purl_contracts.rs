// PURL Contract Tests
//
// These tests verify INVARIANTS that MUST NEVER BREAK regardless of
// implementation. PURL conversion mutates persisted artifact graphs in
// place; a regression here corrupts stored data rather than failing a
// request.

use std::collections::HashSet;
use std::sync::Arc;

use arf_core::purl::{DefaultPurlProcessor, PurlError, PurlManager, PurlProcessor};
use arf_core::repository::{RepositoryConnection, StoreConnection};
use oxigraph::model::NamedNode;

fn manager() -> PurlManager {
    let processor = DefaultPurlProcessor::with_default_namespace("default-purl");
    processor.add_temporary_uri_handler("urn:temp:").unwrap();
    PurlManager::from_processors([Arc::new(processor) as Arc<dyn PurlProcessor>])
}

fn loaded_connection() -> StoreConnection {
    let mut conn = StoreConnection::new().unwrap();
    conn.load_turtle(
        r#"
        @prefix arf: <https://artifactref.org/ontology#> .
        <https://example.org/artifact/a1> arf:hasDataReference <urn:temp:r1> ;
            arf:hasDataReference <urn:temp:r2> .
        <urn:temp:r1> a arf:SshDataReference ;
            arf:filename "reads.fastq" .
        <urn:temp:r2> a arf:SparqlDataReference ;
            arf:graph "https://example.org/graphs/expr" .
        <urn:temp:r1> arf:path "/data/run42" .
        "#,
    )
    .unwrap();
    conn
}

/// WHY: distinct temporary URIs translate to DISTINCT permanent URIs
/// REASON: two artifact objects collapsing onto one PURL silently merge
/// their statements during conversion
/// BREAKS: data loss in the stored graph, unrecoverable after commit
#[test]
fn translation_is_injective() {
    let conn = loaded_connection();
    let purls = manager().extract_purl_references(&conn, &[]).unwrap();
    assert_eq!(purls.len(), 2);

    let permanents: HashSet<&str> = purls.iter().map(|r| r.permanent_uri().as_str()).collect();
    assert_eq!(permanents.len(), purls.len());
}

/// WHY: translation must CHANGE the value - temporary != permanent
/// REASON: an identity pair makes conversion rewrite a statement onto
/// itself and the re-scan loop never terminates
#[test]
fn translation_never_returns_identity() {
    let conn = loaded_connection();
    for reference in manager().extract_purl_references(&conn, &[]).unwrap() {
        assert_ne!(reference.temporary_uri(), reference.permanent_uri());
    }
}

/// WHY: one translation per distinct temporary URI per extraction
/// REASON: urn:temp:r1 appears in three statements above; three
/// translations would mint three different PURLs for one object
#[test]
fn one_translation_per_distinct_uri() {
    let conn = loaded_connection();
    let purls = manager().extract_purl_references(&conn, &[]).unwrap();

    let temporaries: Vec<&str> = purls.iter().map(|r| r.temporary_uri().as_str()).collect();
    let deduped: HashSet<&&str> = temporaries.iter().collect();
    assert_eq!(temporaries.len(), deduped.len());
}

/// WHY: conversion NEVER changes the statement count of any context
/// REASON: replacement is remove-old + add-new per affected statement;
/// anything else drops or fabricates data
/// BREAKS: artifact graphs shrink or grow on every ingestion
#[test]
fn conversion_preserves_statement_count() {
    let mut conn = loaded_connection();
    let manager = manager();

    let before = conn.size(&[]).unwrap();
    let purls = manager.extract_purl_references(&conn, &[]).unwrap();
    manager
        .convert_temporary_uris(&purls, &mut conn, &[])
        .unwrap();

    assert_eq!(conn.size(&[]).unwrap(), before);
}

/// WHY: a re-scan immediately after conversion finds NOTHING
/// REASON: conversion must be complete (no temporary URI survives in
/// any position) and permanent URIs must never match a temporary prefix
/// BREAKS: ingestion loops forever re-translating its own output
#[test]
fn rescan_after_conversion_is_empty() {
    let mut conn = loaded_connection();
    let manager = manager();

    let purls = manager.extract_purl_references(&conn, &[]).unwrap();
    manager
        .convert_temporary_uris(&purls, &mut conn, &[])
        .unwrap();

    assert!(manager.extract_purl_references(&conn, &[]).unwrap().is_empty());
}

/// WHY: a matching parent URI makes the permanent URI EXACTLY
/// parent + suffix-after-prefix
/// REASON: callers colocate all of an artifact's references under the
/// artifact's own namespace; any other construction scatters them
#[test]
fn parent_override_is_exact_concatenation() {
    let processor = DefaultPurlProcessor::with_default_namespace("default-purl");
    processor.add_temporary_uri_handler("urn:temp:").unwrap();

    let parent = "https://purl.artifactref.org/resource/a7/";
    let reference = processor
        .handle_translation("urn:temp:section3", Some(parent))
        .unwrap();
    assert_eq!(
        reference.permanent_uri().as_str(),
        "https://purl.artifactref.org/resource/a7/section3"
    );

    // a parent OUTSIDE the permanent namespace behaves as if absent
    let foreign = processor
        .handle_translation("urn:temp:section3", Some("https://elsewhere.example.org/"))
        .unwrap();
    let minted = processor.handle_translation("urn:temp:section3", None).unwrap();
    assert!(foreign
        .permanent_uri()
        .as_str()
        .starts_with(processor.permanent_prefix()));
    assert!(minted
        .permanent_uri()
        .as_str()
        .starts_with(processor.permanent_prefix()));
}

/// WHY: can_handle is a safe probe, handle_translation is a checked
/// operation - the asymmetry is intentional
/// REASON: callers probe before translating; the probe must never fail,
/// the operation must fail loudly with the URI and processor at fault
#[test]
fn probe_and_operation_asymmetry() {
    let processor = DefaultPurlProcessor::with_default_namespace("default-purl");

    // empty prefix set: probe false, never an error
    assert!(!processor.can_handle("urn:temp:x"));
    assert!(!processor.can_handle(""));

    // operation on the same input is a hard, catchable error
    match processor.handle_translation("urn:temp:x", None) {
        Err(PurlError::NotHandled { uri, processor }) => {
            assert_eq!(uri, "urn:temp:x");
            assert_eq!(processor, "default-purl");
        }
        _ => panic!("Expected NotHandled error"),
    }
}

/// WHY: conversion touches subject and object positions ONLY
/// REASON: predicates are fixed vocabulary terms; rewriting one would
/// change the meaning of every statement using it
#[test]
fn predicates_are_never_rewritten() {
    let mut conn = loaded_connection();
    let manager = manager();

    let predicates_before: HashSet<String> = conn
        .statements(&[])
        .unwrap()
        .iter()
        .map(|q| q.predicate.as_str().to_string())
        .collect();

    let purls = manager.extract_purl_references(&conn, &[]).unwrap();
    manager
        .convert_temporary_uris(&purls, &mut conn, &[])
        .unwrap();

    let predicates_after: HashSet<String> = conn
        .statements(&[])
        .unwrap()
        .iter()
        .map(|q| q.predicate.as_str().to_string())
        .collect();

    assert_eq!(predicates_before, predicates_after);
}

/// WHY: first matching processor translates; NO fallback to a second
/// REASON: two processors minting into different namespaces for the
/// same URI would make translation dependent on registration accidents;
/// order is the documented tie-break
#[test]
fn first_matching_processor_wins() {
    let first = DefaultPurlProcessor::new("first", "https://purl.one.example.org/");
    first.add_temporary_uri_handler("urn:temp:").unwrap();
    let second = DefaultPurlProcessor::new("second", "https://purl.two.example.org/");
    second.add_temporary_uri_handler("urn:temp:").unwrap();

    let manager = PurlManager::from_processors([
        Arc::new(first) as Arc<dyn PurlProcessor>,
        Arc::new(second) as Arc<dyn PurlProcessor>,
    ]);

    let mut conn = StoreConnection::new().unwrap();
    conn.load_turtle(
        r#"<urn:temp:x> <https://artifactref.org/ontology#filename> "x.bin" ."#,
    )
    .unwrap();

    let purls = manager.extract_purl_references(&conn, &[]).unwrap();
    assert_eq!(purls.len(), 1);
    let only = purls.iter().next().unwrap();
    assert!(only
        .permanent_uri()
        .as_str()
        .starts_with("https://purl.one.example.org/"));
}

/// WHY: extraction with a parent keeps injectivity across references
/// REASON: distinct suffixes concatenate onto one parent; a clash must
/// fall back to minting rather than collapsing two objects
#[test]
fn parent_extraction_stays_injective() {
    let mut conn = StoreConnection::new().unwrap();
    conn.load_turtle(
        r#"
        <urn:temp:a> <https://artifactref.org/ontology#filename> "a.bin" .
        <urn:temp:b> <https://artifactref.org/ontology#filename> "b.bin" .
        "#,
    )
    .unwrap();

    let parent = NamedNode::new("https://purl.artifactref.org/resource/a7/").unwrap();
    let purls = manager()
        .extract_purl_references_with_parent(&parent, &conn, &[])
        .unwrap();

    let permanents: HashSet<&str> = purls.iter().map(|r| r.permanent_uri().as_str()).collect();
    assert_eq!(permanents.len(), purls.len());
}
