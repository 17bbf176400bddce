//! Merge-stage aggregation: collapse the matches table into one entry per
//! ICAO code, carrying the set of boxes the code appeared in.
//!
//! Pipeline A emits sanitized output, but this stage treats its own input
//! defensively: rows are re-validated and silently skipped when bad, the
//! same leniency policy the filter applies to raw airport rows.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{safe_float, PointFeature};

/// Per-code aggregate: first-seen coordinates plus the union of box names.
#[derive(Debug, Clone)]
pub struct AirportAggregate {
    pub lat: f64,
    pub lon: f64,
    pub boxes: BTreeSet<String>,
}

/// Accumulates matches-table rows into per-code aggregates.
///
/// Codes iterate lexicographically (BTreeMap), so output is deterministic.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: BTreeMap<String, AirportAggregate>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw row. Returns true if the row was used, false if skipped
    /// (empty code or box, unparsable coordinate, coordinate out of range).
    pub fn add_row(
        &mut self,
        icao: Option<&str>,
        box_name: Option<&str>,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> bool {
        let icao = icao.unwrap_or("").trim().to_uppercase();
        let box_name = box_name.unwrap_or("").trim().to_string();
        if icao.is_empty() || box_name.is_empty() {
            return false;
        }

        let (lat, lon) = match (safe_float(lat), safe_float(lon)) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return false,
        };
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return false;
        }

        // First row for a code fixes its coordinates; later rows only
        // contribute their box name.
        self.entries
            .entry(icao)
            .or_insert_with(|| AirportAggregate {
                lat,
                lon,
                boxes: BTreeSet::new(),
            })
            .boxes
            .insert(box_name);

        true
    }

    /// Number of distinct codes accumulated so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Emit one point feature per code, in lexicographic code order.
    pub fn into_features(self) -> Vec<PointFeature> {
        self.entries
            .into_iter()
            .map(|(icao, agg)| {
                let boxes: Vec<String> = agg.boxes.into_iter().collect();
                PointFeature::new(&icao, agg.lat, agg.lon, boxes)
            })
            .collect()
    }
}
