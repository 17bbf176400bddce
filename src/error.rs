//! Fatal input-validation errors.
//!
//! These are the errors that abort a run before any output is written:
//! malformed box definitions, a required CSV column missing from the header,
//! or a polygon input that is not a FeatureCollection. Per-row problems
//! (empty code, unparsable coordinates) are not errors; those rows are
//! skipped and only show up in the run counters.

use thiserror::Error;

/// Fatal problems with one of the input files.
#[derive(Debug, Error)]
pub enum InputError {
    /// Box definition document could not be parsed at all
    #[error("failed to parse box definitions: {0}")]
    BoxParse(#[from] serde_json::Error),

    /// Box entry with an empty (or whitespace-only) name
    #[error("box at index {index} has an empty name")]
    EmptyBoxName {
        /// Position of the entry in the `boxes` array
        index: usize,
    },

    /// Two boxes share a name
    #[error("box name '{name}' is not unique")]
    DuplicateBoxName { name: String },

    /// Latitude bounds are inverted (unlike longitude, this is never valid)
    #[error("box '{name}' has min_lat > max_lat")]
    LatitudeOrder { name: String },

    /// A latitude bound outside [-90, 90]
    #[error("box '{name}' has latitude outside [-90, 90]")]
    LatitudeRange { name: String },

    /// A longitude bound outside [-180, 180]
    #[error("box '{name}' has longitude outside [-180, 180]")]
    LongitudeRange { name: String },

    /// Required columns absent from a CSV header
    #[error("CSV missing required columns: {missing:?}. Found: {found:?}")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// Polygon input is not a FeatureCollection with a features array
    #[error("input geojson must be a FeatureCollection with a 'features' array")]
    NotAFeatureCollection,
}
