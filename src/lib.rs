//! Airbox - bounding-box filtering and GeoJSON merging for airport datasets
//!
//! This library provides the shared core for the `filter` and `merge` binaries.

pub mod aggregate;
pub mod boxes;
pub mod error;
pub mod matching;
pub mod models;
pub mod table;

pub use boxes::BoundingBox;
pub use error::InputError;
pub use models::{AirportRecord, ColumnSpec, PointFeature};
