//! Axis-aligned lat/lon bounding box.

use serde::Deserialize;

/// A named latitude/longitude rectangle.
///
/// An inverted longitude range (`min_lon > max_lon`) is a valid state and
/// means the box wraps across the antimeridian: min_lon=170, max_lon=-170
/// covers the wedge from 170° through ±180° to -170°.
#[derive(Debug, Clone, Deserialize)]
pub struct BoundingBox {
    pub name: String,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Test whether a point falls inside this box (closed intervals).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        if !(self.min_lat <= lat && lat <= self.max_lat) {
            return false;
        }

        // Normal box vs. antimeridian-crossing box
        if self.min_lon <= self.max_lon {
            self.min_lon <= lon && lon <= self.max_lon
        } else {
            lon >= self.min_lon || lon <= self.max_lon
        }
    }

    /// True if this box wraps across the ±180° antimeridian.
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> BoundingBox {
        BoundingBox {
            name: "test".to_string(),
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    #[test]
    fn test_normal_box() {
        let b = bbox(35.0, 60.0, -10.0, 40.0);
        assert!(b.contains(49.0, 2.5));
        assert!(!b.contains(40.6, -73.8));
        assert!(!b.contains(70.0, 0.0));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let b = bbox(35.0, 60.0, -10.0, 40.0);
        assert!(b.contains(35.0, -10.0));
        assert!(b.contains(60.0, 40.0));
        assert!(!b.contains(60.000001, 40.0));
    }

    #[test]
    fn test_antimeridian_box() {
        let b = bbox(-10.0, 10.0, 170.0, -170.0);
        assert!(b.crosses_antimeridian());
        assert!(b.contains(0.0, 175.0));
        assert!(b.contains(0.0, -175.0));
        assert!(b.contains(0.0, 180.0));
        assert!(b.contains(0.0, -180.0));
        assert!(!b.contains(0.0, 0.0));
    }

    #[test]
    fn test_antimeridian_box_latitude_still_applies() {
        let b = bbox(-10.0, 10.0, 170.0, -170.0);
        assert!(!b.contains(20.0, 175.0));
    }
}
