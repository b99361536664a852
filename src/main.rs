// src/main.rs
mod utils;
mod documents;
mod extractors;
mod standards;
mod storage;

use std::path::{Path, PathBuf};
use clap::Parser;
use utils::AppError;
use documents::{client, DocumentSource, StandardKind};
use documents::models::{DEFAULT_A_STANDARDS_URL, DEFAULT_B_STANDARDS_URL};
use extractors::{extract_pdf_text, normalize_text, StandardRecord, StandardsExtractor};
use standards::OutputFormat;
use storage::{SourceSummary, StorageManager};

/// Builds a qualifying-totals table from the published A and B weightlifting standards
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the A standards PDF
    #[arg(long, default_value = DEFAULT_A_STANDARDS_URL)]
    a_url: String,

    /// URL of the B standards PDF
    #[arg(long, default_value = DEFAULT_B_STANDARDS_URL)]
    b_url: String,

    /// Output file (default: qualifyingTotals.<ts|json>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Typescript)]
    format: OutputFormat,

    /// Also write a JSON metadata sidecar next to the output
    #[arg(long)]
    metadata: bool,

    /// Debug mode - save normalized and annotated text of each document
    #[arg(short, long)]
    debug: bool,

    /// Directory for debug dumps
    #[arg(long, default_value = "./debug")]
    debug_dir: PathBuf,
}

/// Downloads one standards PDF and extracts its records.
async fn scrape_standards(
    source: &DocumentSource,
    extractor: &StandardsExtractor,
    debug_dir: Option<&Path>,
) -> Result<Vec<StandardRecord>, AppError> {
    tracing::info!("Scraping {} from {}", source.kind, source.url);

    let pdf = client::download_pdf(&source.url).await?;
    tracing::info!("Successfully downloaded document ({} bytes)", pdf.len());

    let text = normalize_text(&extract_pdf_text(&pdf)?);
    tracing::debug!("Full text: {}", text.chars().take(200).collect::<String>());

    if let Some(dir) = debug_dir {
        if let Err(e) = utils::text_debug::dump_document_text(dir, &source.debug_name(), &text, &extractor.debug_patterns()) {
            tracing::warn!("Failed to write debug dumps for {}: {}", source.kind, e);
        }
    }

    let records = extractor.extract_records(&text);
    tracing::info!("Extracted {} records from {}", records.len(), source.kind);
    Ok(records)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("qualifyingTotals.{}", args.format.extension())));
    let storage = StorageManager::new(&output)?;
    let debug_dir = args.debug.then_some(args.debug_dir.as_path());

    // 3. Fetch and parse both documents, one after the other
    let extractor = StandardsExtractor::new();
    let a_source = DocumentSource::new(StandardKind::A, args.a_url.as_str());
    let b_source = DocumentSource::new(StandardKind::B, args.b_url.as_str());

    let a_records = scrape_standards(&a_source, &extractor, debug_dir).await?;
    let b_records = scrape_standards(&b_source, &extractor, debug_dir).await?;

    // 4. Merge and render
    let table = standards::merge_standards(&a_records, &b_records)?;
    let rendered = standards::format_table(&table, args.format)?;

    // 5. Emit
    print!("{}", rendered);
    storage.save_table(&rendered)?;

    if args.metadata {
        let sources = [
            SourceSummary { source: a_source, record_count: a_records.len() },
            SourceSummary { source: b_source, record_count: b_records.len() },
        ];
        storage.save_table_metadata(&table, &sources, args.format)?;
    }

    tracing::info!(
        "Processing finished. {} A records, {} B records, {} merged weight classes",
        a_records.len(),
        b_records.len(),
        table.entry_count()
    );

    Ok(())
}
