//! Filter engine: tests every record against every box, with per-box
//! deduplication by ICAO code.

mod engine;

pub use engine::{FilterEngine, FilterOutcome, MatchRow};
