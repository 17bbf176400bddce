//! GeoJSON point feature emitted by the merge stage.

use serde::Serialize;

/// One point feature per distinct ICAO code.
#[derive(Debug, Clone, Serialize)]
pub struct PointFeature {
    #[serde(rename = "type")]
    pub feature_type: String,

    /// Deterministic feature id: `"ICAO_" + code`
    pub id: String,

    pub properties: PointProperties,
    pub geometry: PointGeometry,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointProperties {
    /// Fixed type tag for downstream styling
    #[serde(rename = "type")]
    pub kind: String,

    pub icao: String,

    /// Sorted names of the boxes this code matched
    pub boxes: Vec<String>,

    pub box_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,

    /// GeoJSON coordinate order is [lon, lat], not [lat, lon]
    pub coordinates: [f64; 2],
}

impl PointFeature {
    /// Build a feature for one code. `boxes` must already be sorted.
    pub fn new(icao: &str, lat: f64, lon: f64, boxes: Vec<String>) -> Self {
        let box_count = boxes.len();
        Self {
            feature_type: "Feature".to_string(),
            id: format!("ICAO_{}", icao),
            properties: PointProperties {
                kind: "airport".to_string(),
                icao: icao.to_string(),
                boxes,
                box_count,
            },
            geometry: PointGeometry {
                geometry_type: "Point".to_string(),
                coordinates: [lon, lat],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_are_lon_lat() {
        let f = PointFeature::new("LFPG", 49.0, 2.5, vec!["EU".to_string()]);
        assert_eq!(f.geometry.coordinates, [2.5, 49.0]);
    }

    #[test]
    fn test_serialized_shape() {
        let f = PointFeature::new("LFPG", 49.0, 2.5, vec!["EU".to_string(), "WEST".to_string()]);
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["type"], "Feature");
        assert_eq!(v["id"], "ICAO_LFPG");
        assert_eq!(v["properties"]["type"], "airport");
        assert_eq!(v["properties"]["icao"], "LFPG");
        assert_eq!(v["properties"]["box_count"], 2);
        assert_eq!(v["geometry"]["type"], "Point");
        assert_eq!(v["geometry"]["coordinates"][0], 2.5);
        assert_eq!(v["geometry"]["coordinates"][1], 49.0);
    }
}
