/// Example: Extract references and resolve PURLs
///
/// This example loads a small artifact graph, extracts the typed data
/// references it embeds, then discovers and converts every temporary
/// URI to a permanent one.
///
/// Usage:
///   cargo run --example extract_references
///   cargo run --example extract_references path/to/artifact.ttl

use std::env;
use std::fs;
use std::sync::Arc;

use arf_core::purl::{DefaultPurlProcessor, PurlManager, PurlProcessor};
use arf_core::repository::{RepositoryConnection, StoreConnection};
use arf_core::vocab::DEFAULT_TEMPORARY_PREFIX;
use arf_core::{ExtractionPipeline, ProcessorStage, ReferenceKind};

const SAMPLE_ARTIFACT: &str = r#"
@prefix arf: <https://artifactref.org/ontology#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

<https://example.org/artifact/a1>
    rdfs:label "Barley phenotyping study" ;
    arf:hasDataReference <urn:temp:run42> .

<urn:temp:run42> a arf:SshDataReference ;
    rdfs:label "sequencing run 42" ;
    arf:repositoryAlias "cluster-store" ;
    arf:filename "reads.fastq" ;
    arf:path "/data/run42" .
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let turtle = match args.get(1) {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE_ARTIFACT.to_string(),
    };

    let mut conn = StoreConnection::new()?;
    conn.load_turtle(&turtle)?;
    println!("Loaded {} statements", conn.size(&[])?);

    // Extract typed references at the store-concrete stage
    let pipeline = ExtractionPipeline::with_defaults();
    let references = pipeline.run_stage(Some(ProcessorStage::StoreConcrete), &conn)?;

    println!("\nREFERENCES ({}):", references.len());
    for reference in &references {
        let kind = match &reference.kind {
            ReferenceKind::Ssh { filename, path } => format!(
                "ssh file={} path={}",
                filename.as_deref().unwrap_or("-"),
                path.as_deref().unwrap_or("-")
            ),
            ReferenceKind::Sparql {
                graph,
                endpoint_url,
            } => format!(
                "sparql graph={} endpoint={}",
                graph.as_deref().unwrap_or("-"),
                endpoint_url.as_deref().unwrap_or("-")
            ),
        };
        println!(
            "   {} [{}] alias={} parent={}",
            reference.label.as_deref().unwrap_or("<unlabeled>"),
            kind,
            reference.repository_alias.as_deref().unwrap_or("-"),
            reference
                .parent_iri
                .as_ref()
                .map(|p| p.as_str())
                .unwrap_or("-"),
        );
    }

    // Discover and convert temporary URIs
    let processor = DefaultPurlProcessor::with_default_namespace("default-purl");
    processor.add_temporary_uri_handler(DEFAULT_TEMPORARY_PREFIX)?;
    let manager = PurlManager::from_processors([Arc::new(processor) as Arc<dyn PurlProcessor>]);

    let purls = manager.extract_purl_references(&conn, &[])?;
    println!("\nPURL TRANSLATIONS ({}):", purls.len());
    for purl in &purls {
        println!("   {} -> {}", purl.temporary_uri(), purl.permanent_uri());
    }

    manager.convert_temporary_uris(&purls, &mut conn, &[])?;
    println!(
        "\nConverted. {} statements, re-scan finds {} temporary URIs.",
        conn.size(&[])?,
        manager.extract_purl_references(&conn, &[])?.len()
    );

    Ok(())
}
