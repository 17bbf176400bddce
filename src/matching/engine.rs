//! Core filtering pass of Pipeline A.
//!
//! Records are fed in input order and tested against every box in
//! declaration order. Each box keeps its own seen set keyed by code, so a
//! code matches a given box at most once (first occurrence wins) while a
//! code sitting in two overlapping boxes legitimately produces two matches.

use std::collections::BTreeMap;

use hashbrown::HashSet;

use crate::boxes::BoundingBox;
use crate::models::{AirportRecord, ColumnSpec};

/// One row of the matches table.
#[derive(Debug, Clone)]
pub struct MatchRow {
    pub box_name: String,
    pub icao: String,
    pub lat: f64,
    pub lon: f64,
    /// Pass-through values in `ColumnSpec::extra` order
    pub extra: Vec<String>,
}

/// Everything the filter pass produces.
#[derive(Debug)]
pub struct FilterOutcome {
    /// Match table sorted by (box_name, icao)
    pub matches: Vec<MatchRow>,
    /// Box name -> lexicographically sorted matched codes
    pub per_box_index: BTreeMap<String, Vec<String>>,
    /// (box name, match count) in box declaration order, for the run summary
    pub per_box_counts: Vec<(String, usize)>,
}

/// Stateful filter pass over a fixed box set.
pub struct FilterEngine<'a> {
    boxes: &'a [BoundingBox],
    columns: &'a ColumnSpec,
    seen: Vec<HashSet<String>>,
    matches: Vec<MatchRow>,
}

impl<'a> FilterEngine<'a> {
    pub fn new(boxes: &'a [BoundingBox], columns: &'a ColumnSpec) -> Self {
        Self {
            boxes,
            columns,
            seen: vec![HashSet::new(); boxes.len()],
            matches: Vec::new(),
        }
    }

    /// Test one record against every box, recording first-seen matches.
    pub fn observe(&mut self, record: &AirportRecord) {
        for (i, b) in self.boxes.iter().enumerate() {
            if !b.contains(record.lat, record.lon) {
                continue;
            }
            if !self.seen[i].insert(record.icao.clone()) {
                // Already matched this box; dropped silently.
                continue;
            }
            let extra = self
                .columns
                .extra
                .iter()
                .map(|c| record.extra_value(c).to_string())
                .collect();
            self.matches.push(MatchRow {
                box_name: b.name.clone(),
                icao: record.icao.clone(),
                lat: record.lat,
                lon: record.lon,
                extra,
            });
        }
    }

    /// Sort and hand back the results.
    pub fn finish(self) -> FilterOutcome {
        let mut matches = self.matches;
        matches.sort_by(|a, b| {
            (a.box_name.as_str(), a.icao.as_str()).cmp(&(b.box_name.as_str(), b.icao.as_str()))
        });

        let mut per_box_index = BTreeMap::new();
        let mut per_box_counts = Vec::with_capacity(self.boxes.len());
        for (b, seen) in self.boxes.iter().zip(&self.seen) {
            let mut codes: Vec<String> = seen.iter().cloned().collect();
            codes.sort();
            per_box_counts.push((b.name.clone(), codes.len()));
            per_box_index.insert(b.name.clone(), codes);
        }

        FilterOutcome {
            matches,
            per_box_index,
            per_box_counts,
        }
    }
}
