//! Airport row normalization.
//!
//! Raw CSV rows become [`AirportRecord`]s, or nothing at all: a row with an
//! empty code or a missing/unparsable coordinate is silently skipped. Bad
//! individual records must not abort a batch run; they only show up in the
//! rows-read vs. rows-used counters.

use hashbrown::HashMap;

/// Column configuration for the airport table.
///
/// Replaces fixed module-level column constants so the pipeline logic is
/// testable against any schema.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Column holding the ICAO code (default `icao_code`)
    pub icao: String,
    /// Column holding latitude in degrees (default `latitude_deg`)
    pub lat: String,
    /// Column holding longitude in degrees (default `longitude_deg`)
    pub lon: String,
    /// Pass-through columns copied verbatim into the matches table,
    /// empty string when absent (default `ident`, `name`)
    pub extra: Vec<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            icao: "icao_code".to_string(),
            lat: "latitude_deg".to_string(),
            lon: "longitude_deg".to_string(),
            extra: vec!["ident".to_string(), "name".to_string()],
        }
    }
}

impl ColumnSpec {
    /// The required column names (extras are optional).
    pub fn required(&self) -> [&str; 3] {
        [&self.icao, &self.lat, &self.lon]
    }
}

/// A sanitized airport row.
#[derive(Debug, Clone)]
pub struct AirportRecord {
    /// Trimmed, uppercased ICAO code (never empty)
    pub icao: String,
    pub lat: f64,
    pub lon: f64,
    /// Trimmed pass-through column values, keyed by column name
    pub extra: HashMap<String, String>,
}

impl AirportRecord {
    /// Build a record from raw column values, or `None` if the row should
    /// be skipped (empty code, missing or unparsable coordinate).
    pub fn normalize(
        icao: Option<&str>,
        lat: Option<&str>,
        lon: Option<&str>,
        extra: HashMap<String, String>,
    ) -> Option<Self> {
        let icao = icao.unwrap_or("").trim().to_uppercase();
        if icao.is_empty() {
            return None;
        }

        let lat = safe_float(lat)?;
        let lon = safe_float(lon)?;

        Some(Self {
            icao,
            lat,
            lon,
            extra,
        })
    }

    /// Pass-through value for a column, empty string when absent.
    pub fn extra_value(&self, column: &str) -> &str {
        self.extra.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Lenient float parsing: empty, whitespace-only, or unparsable input is
/// treated as absent rather than as an error.
pub fn safe_float(value: Option<&str>) -> Option<f64> {
    let s = value?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_float() {
        assert_eq!(safe_float(Some("49.0")), Some(49.0));
        assert_eq!(safe_float(Some("  -73.8  ")), Some(-73.8));
        assert_eq!(safe_float(Some("")), None);
        assert_eq!(safe_float(Some("   ")), None);
        assert_eq!(safe_float(Some("n/a")), None);
        assert_eq!(safe_float(None), None);
    }

    #[test]
    fn test_normalize_uppercases_and_trims_code() {
        let r =
            AirportRecord::normalize(Some(" lfpg "), Some("49.0"), Some("2.5"), HashMap::new())
                .unwrap();
        assert_eq!(r.icao, "LFPG");
        assert_eq!(r.lat, 49.0);
        assert_eq!(r.lon, 2.5);
    }

    #[test]
    fn test_normalize_skips_empty_code() {
        assert!(
            AirportRecord::normalize(Some("  "), Some("49.0"), Some("2.5"), HashMap::new())
                .is_none()
        );
        assert!(AirportRecord::normalize(None, Some("49.0"), Some("2.5"), HashMap::new()).is_none());
    }

    #[test]
    fn test_normalize_skips_bad_coordinates() {
        assert!(AirportRecord::normalize(Some("LFPG"), None, Some("2.5"), HashMap::new()).is_none());
        assert!(
            AirportRecord::normalize(Some("LFPG"), Some("abc"), Some("2.5"), HashMap::new())
                .is_none()
        );
        assert!(
            AirportRecord::normalize(Some("LFPG"), Some("49.0"), Some(""), HashMap::new())
                .is_none()
        );
    }

    #[test]
    fn test_extra_value_defaults_to_empty() {
        let mut extra = HashMap::new();
        extra.insert("ident".to_string(), "LFPG".to_string());
        let r = AirportRecord::normalize(Some("LFPG"), Some("49.0"), Some("2.5"), extra).unwrap();
        assert_eq!(r.extra_value("ident"), "LFPG");
        assert_eq!(r.extra_value("name"), "");
    }

    #[test]
    fn test_default_column_spec() {
        let spec = ColumnSpec::default();
        assert_eq!(spec.required(), ["icao_code", "latitude_deg", "longitude_deg"]);
        assert_eq!(spec.extra, vec!["ident", "name"]);
    }
}
