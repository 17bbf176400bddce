//! Core data models for the filtering and merge pipelines.

pub mod feature;
pub mod record;

pub use feature::{PointFeature, PointGeometry, PointProperties};
pub use record::{safe_float, AirportRecord, ColumnSpec};
