//! Named latitude/longitude bounding boxes.
//!
//! The containment test is the one piece of real geometry in the system,
//! including support for boxes that wrap across the ±180° antimeridian.

mod bbox;
mod loader;

pub use bbox::BoundingBox;
pub use loader::{load_boxes, parse_boxes};
