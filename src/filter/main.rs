//! Pipeline A: filter airport rows into named bounding boxes.
//!
//! Reads an airport CSV and a box definition JSON, tests every row against
//! every box, deduplicates by code per box, and writes the sorted matches
//! table. Optionally also writes a per-box JSON index of matched codes.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use airbox::boxes::load_boxes;
use airbox::matching::FilterEngine;
use airbox::models::ColumnSpec;
use airbox::table::{read_airports, write_matches};

#[derive(Parser, Debug)]
#[command(name = "filter")]
#[command(about = "Filter airports by ICAO code into lat/lon bounding boxes")]
struct Args {
    /// Airport table (CSV with a header row)
    airports: PathBuf,

    /// Box definitions (JSON with a top-level "boxes" array)
    boxes: PathBuf,

    /// Output matches table
    #[arg(default_value = "icaos_in_boxes.csv")]
    output: PathBuf,

    /// Also write a JSON mapping of box name to sorted matched codes
    #[arg(long, value_name = "PATH")]
    index_out: Option<PathBuf>,

    /// Pass-through columns copied into the output when present
    #[arg(long, value_delimiter = ',', default_values = ["ident", "name"])]
    extra_cols: Vec<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let columns = ColumnSpec {
        extra: args.extra_cols.clone(),
        ..ColumnSpec::default()
    };

    let boxes = load_boxes(&args.boxes)?;
    let scan = read_airports(&args.airports, &columns)?;

    let mut engine = FilterEngine::new(&boxes, &columns);
    for record in &scan.records {
        engine.observe(record);
    }
    let outcome = engine.finish();

    write_matches(&args.output, &outcome.matches, &columns)?;

    if let Some(index_path) = &args.index_out {
        let file = File::create(index_path)
            .with_context(|| format!("Failed to create {}", index_path.display()))?;
        serde_json::to_writer_pretty(file, &outcome.per_box_index)
            .with_context(|| format!("Failed to write {}", index_path.display()))?;
        info!("Wrote per-box index: {}", index_path.display());
    }

    let total: usize = outcome.per_box_counts.iter().map(|(_, n)| n).sum();
    info!(
        "Done. Matched {} ICAO codes across {} boxes ({} rows read, {} skipped)",
        total,
        boxes.len(),
        scan.rows_read,
        scan.rows_skipped
    );
    for (name, count) in &outcome.per_box_counts {
        info!("  {}: {} ICAOs", name, count);
    }
    info!("Wrote: {}", args.output.display());

    Ok(())
}
