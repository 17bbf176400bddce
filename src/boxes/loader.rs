//! Box definition loading and validation.
//!
//! The definition file is a JSON document with a top-level `boxes` array.
//! All validation failures here are fatal: a bad box set means the whole
//! run would produce garbage.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hashbrown::HashSet;
use serde::Deserialize;
use tracing::info;

use super::BoundingBox;
use crate::error::InputError;

#[derive(Debug, Deserialize)]
struct BoxDocument {
    boxes: Vec<BoundingBox>,
}

/// Parse and validate box definitions from a JSON string.
pub fn parse_boxes(input: &str) -> Result<Vec<BoundingBox>, InputError> {
    let doc: BoxDocument = serde_json::from_str(input)?;

    let mut names: HashSet<String> = HashSet::new();
    let mut boxes = Vec::with_capacity(doc.boxes.len());

    for (index, mut b) in doc.boxes.into_iter().enumerate() {
        b.name = b.name.trim().to_string();
        if b.name.is_empty() {
            return Err(InputError::EmptyBoxName { index });
        }
        if b.min_lat > b.max_lat {
            return Err(InputError::LatitudeOrder { name: b.name });
        }
        if !(-90.0..=90.0).contains(&b.min_lat) || !(-90.0..=90.0).contains(&b.max_lat) {
            return Err(InputError::LatitudeRange { name: b.name });
        }
        if !(-180.0..=180.0).contains(&b.min_lon) || !(-180.0..=180.0).contains(&b.max_lon) {
            return Err(InputError::LongitudeRange { name: b.name });
        }
        // min_lon > max_lon is deliberately allowed: antimeridian wrap.
        if !names.insert(b.name.clone()) {
            return Err(InputError::DuplicateBoxName { name: b.name });
        }
        boxes.push(b);
    }

    Ok(boxes)
}

/// Load box definitions from a file.
pub fn load_boxes<P: AsRef<Path>>(path: P) -> Result<Vec<BoundingBox>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read box definitions from {}", path.display()))?;
    let boxes = parse_boxes(&content)
        .with_context(|| format!("Invalid box definitions in {}", path.display()))?;
    info!("Loaded {} boxes from {}", boxes.len(), path.display());
    Ok(boxes)
}
