//! Pipeline B: merge filtered airport points into a polygon GeoJSON.
//!
//! Reads the matches table produced by `filter` plus an existing polygon
//! FeatureCollection, aggregates rows per ICAO code, and appends one point
//! feature per code after the polygons.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use airbox::aggregate::Aggregator;
use airbox::error::InputError;
use airbox::table::read_matches;

#[derive(Parser, Debug)]
#[command(name = "merge")]
#[command(about = "Append per-airport point features to a polygon GeoJSON")]
struct Args {
    /// Polygon FeatureCollection to extend
    geojson: PathBuf,

    /// Matches table produced by the filter pipeline
    matches: PathBuf,

    /// Output FeatureCollection
    #[arg(default_value = "corridors_with_icao_points.geojson")]
    output: PathBuf,
}

/// Load the polygon collection, verifying its top-level shape.
fn load_feature_collection(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let doc: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let is_collection = doc.get("type").and_then(Value::as_str) == Some("FeatureCollection")
        && doc.get("features").map_or(false, Value::is_array);
    if !is_collection {
        return Err(InputError::NotAFeatureCollection.into());
    }
    Ok(doc)
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut doc = load_feature_collection(&args.geojson)?;
    let rows = read_matches(&args.matches)?;

    let mut aggregator = Aggregator::new();
    let rows_read = rows.len();
    let mut rows_used = 0usize;
    for row in &rows {
        if aggregator.add_row(
            row.icao.as_deref(),
            row.box_name.as_deref(),
            row.lat.as_deref(),
            row.lon.as_deref(),
        ) {
            rows_used += 1;
        }
    }

    let features = aggregator.into_features();
    let added = features.len();

    // Points go after the existing polygons.
    let feature_array = doc
        .get_mut("features")
        .and_then(Value::as_array_mut)
        .ok_or(InputError::NotAFeatureCollection)?;
    for feature in features {
        feature_array.push(serde_json::to_value(feature)?);
    }

    let out = fs::File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    serde_json::to_writer_pretty(out, &doc)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("CSV rows read: {}", rows_read);
    info!("CSV rows used (box matches): {}", rows_used);
    info!("Unique ICAO points added: {}", added);
    info!("Wrote: {}", args.output.display());

    Ok(())
}
