//! CSV plumbing for both pipelines.
//!
//! Columns are resolved by header name once per file; a missing required
//! column is fatal before any row is processed. Individual rows are handed
//! to the normalization layer, which decides whether to keep or skip them.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Writer};
use hashbrown::HashMap;
use tracing::{debug, info};

use crate::error::InputError;
use crate::matching::MatchRow;
use crate::models::{AirportRecord, ColumnSpec};

/// Fixed header of the matches table (extras follow these four).
pub const MATCH_COLUMNS: [&str; 4] = ["box_name", "icao_code", "latitude_deg", "longitude_deg"];

/// Result of scanning an airport table.
#[derive(Debug)]
pub struct RowScan {
    pub records: Vec<AirportRecord>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// One matches-table row read back for the merge stage, untrusted.
#[derive(Debug, Clone)]
pub struct RawMatch {
    pub box_name: Option<String>,
    pub icao: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Validate that every required column is present, returning its indices.
fn resolve_columns(headers: &StringRecord, required: &[&str]) -> Result<Vec<usize>, InputError> {
    let mut indices = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for col in required {
        match headers.iter().position(|h| h == *col) {
            Some(i) => indices.push(i),
            None => missing.push((*col).to_string()),
        }
    }
    if !missing.is_empty() {
        missing.sort();
        return Err(InputError::MissingColumns {
            missing,
            found: headers.iter().map(str::to_string).collect(),
        });
    }
    Ok(indices)
}

fn field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx)
}

/// Read and normalize the airport table.
pub fn read_airports<P: AsRef<Path>>(path: P, columns: &ColumnSpec) -> Result<RowScan> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open airport table {}", path.display()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let idx = resolve_columns(&headers, &columns.required())?;
    let (icao_idx, lat_idx, lon_idx) = (idx[0], idx[1], idx[2]);

    // Extras are optional; absent columns yield empty strings downstream.
    let extra_idx: Vec<(String, Option<usize>)> = columns
        .extra
        .iter()
        .map(|c| (c.clone(), headers.iter().position(|h| h == c)))
        .collect();

    let mut records = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        rows_read += 1;

        let mut extra = HashMap::new();
        for (name, i) in &extra_idx {
            if let Some(value) = i.and_then(|i| field(&record, i)) {
                extra.insert(name.clone(), value.trim().to_string());
            }
        }

        match AirportRecord::normalize(
            field(&record, icao_idx),
            field(&record, lat_idx),
            field(&record, lon_idx),
            extra,
        ) {
            Some(r) => records.push(r),
            None => {
                debug!("Skipping row {}: empty code or bad coordinates", rows_read);
                rows_skipped += 1;
            }
        }
    }

    info!(
        "Read {} rows from {} ({} skipped)",
        rows_read,
        path.display(),
        rows_skipped
    );

    Ok(RowScan {
        records,
        rows_read,
        rows_skipped,
    })
}

/// Write the matches table, sorted rows in, fixed header out.
pub fn write_matches<P: AsRef<Path>>(
    path: P,
    matches: &[MatchRow],
    columns: &ColumnSpec,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;

    let mut header: Vec<&str> = MATCH_COLUMNS.to_vec();
    header.extend(columns.extra.iter().map(String::as_str));
    writer.write_record(&header)?;

    for m in matches {
        let mut row = vec![
            m.box_name.clone(),
            m.icao.clone(),
            m.lat.to_string(),
            m.lon.to_string(),
        ];
        row.extend(m.extra.iter().cloned());
        writer.write_record(&row)?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Read the matches table back for the merge stage. Only the four fixed
/// columns are required; their order does not matter.
pub fn read_matches<P: AsRef<Path>>(path: P) -> Result<Vec<RawMatch>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open matches table {}", path.display()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let idx = resolve_columns(&headers, &MATCH_COLUMNS)?;
    let (box_idx, icao_idx, lat_idx, lon_idx) = (idx[0], idx[1], idx[2], idx[3]);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RawMatch {
            box_name: field(&record, box_idx).map(str::to_string),
            icao: field(&record, icao_idx).map(str::to_string),
            lat: field(&record, lat_idx).map(str::to_string),
            lon: field(&record, lon_idx).map(str::to_string),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_read_airports_counts_and_skips() {
        let f = write_temp(
            "ident,icao_code,latitude_deg,longitude_deg,name\n\
             LFPG,lfpg,49.0,2.5,Charles de Gaulle\n\
             ,,,,\n\
             KJFK,KJFK,not-a-number,-73.8,JFK\n",
        );
        let scan = read_airports(f.path(), &ColumnSpec::default()).unwrap();
        assert_eq!(scan.rows_read, 3);
        assert_eq!(scan.rows_skipped, 2);
        assert_eq!(scan.records.len(), 1);
        assert_eq!(scan.records[0].icao, "LFPG");
        assert_eq!(scan.records[0].extra_value("name"), "Charles de Gaulle");
    }

    #[test]
    fn test_read_airports_missing_column_is_fatal() {
        let f = write_temp("ident,latitude_deg,longitude_deg\nLFPG,49.0,2.5\n");
        let err = read_airports(f.path(), &ColumnSpec::default()).unwrap_err();
        let err = err.downcast::<InputError>().unwrap();
        match err {
            InputError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["icao_code"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_airports_absent_extra_column() {
        let f = write_temp("icao_code,latitude_deg,longitude_deg\nLFPG,49.0,2.5\n");
        let scan = read_airports(f.path(), &ColumnSpec::default()).unwrap();
        assert_eq!(scan.records[0].extra_value("ident"), "");
    }

    #[test]
    fn test_write_then_read_matches() {
        let columns = ColumnSpec::default();
        let matches = vec![MatchRow {
            box_name: "EU".to_string(),
            icao: "LFPG".to_string(),
            lat: 49.0,
            lon: 2.5,
            extra: vec!["LFPG".to_string(), "Charles de Gaulle".to_string()],
        }];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        write_matches(&path, &matches, &columns).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("box_name,icao_code,latitude_deg,longitude_deg,ident,name"));

        let rows = read_matches(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].box_name.as_deref(), Some("EU"));
        assert_eq!(rows[0].icao.as_deref(), Some("LFPG"));
        assert_eq!(rows[0].lat.as_deref(), Some("49"));
        assert_eq!(rows[0].lon.as_deref(), Some("2.5"));
    }

    #[test]
    fn test_read_matches_any_column_order() {
        let f = write_temp(
            "icao_code,longitude_deg,box_name,latitude_deg\nLFPG,2.5,EU,49.0\n",
        );
        let rows = read_matches(f.path()).unwrap();
        assert_eq!(rows[0].box_name.as_deref(), Some("EU"));
        assert_eq!(rows[0].lat.as_deref(), Some("49.0"));
    }

    #[test]
    fn test_read_matches_missing_column_is_fatal() {
        let f = write_temp("icao_code,latitude_deg,longitude_deg\nLFPG,49.0,2.5\n");
        assert!(read_matches(f.path()).is_err());
    }
}
