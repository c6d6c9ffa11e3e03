// src/report/writer.rs
// =============================================================================
// Writes a Table to a timestamped CSV file.
//
// File names look like `canvas_report_202306221.csv`: the prefix plus the
// first `width` characters of a yyyyMMddHHMMSS timestamp. With width 9 the
// name only changes every ten hours, so a second run in the same window
// overwrites the first report. Existing tooling globs for these names, so
// the truncation stays.
// =============================================================================

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};

use super::table::Table;
use crate::error::{ReportError, Result};

/// Timestamp characters kept in catalog report names (yyyyMMddH)
pub const CATALOG_TIMESTAMP_WIDTH: usize = 9;
/// Timestamp characters kept in reading-time report names (yyyyMMddHHMM)
pub const READING_TIMESTAMP_WIDTH: usize = 12;

pub fn report_filename(prefix: &str, at: NaiveDateTime, width: usize) -> String {
    let timestamp = at.format("%Y%m%d%H%M%S").to_string();
    let width = width.min(timestamp.len());
    format!("{}_{}.csv", prefix, &timestamp[..width])
}

// Writes `table` (header row first) into `dir`, creating it if needed
//
// Returns the path of the written file.
pub fn write_report(table: &Table, dir: &Path, prefix: &str, width: usize) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;

    let filename = report_filename(prefix, Local::now().naive_local(), width);
    let path = dir.join(filename);

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| ReportError::io(&path, e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, 22)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_filename_truncates_timestamp() {
        assert_eq!(
            report_filename("canvas_report", at(), CATALOG_TIMESTAMP_WIDTH),
            "canvas_report_202306221.csv"
        );
        assert_eq!(
            report_filename("reading_time_estimates", at(), READING_TIMESTAMP_WIDTH),
            "reading_time_estimates_202306221405.csv"
        );
        assert_eq!(report_filename("r", at(), 99), "r_20230622140509.csv");
    }

    #[test]
    fn test_write_report_creates_directory_and_header() {
        let scratch = tempfile::tempdir().unwrap();
        let dir = scratch.path().join("nested").join("reports");

        let mut table = Table::new(["phase", "canvas_page_title"]);
        table
            .push_row(vec!["0".to_string(), "Intro, part 1".to_string()])
            .unwrap();

        let path = write_report(&table, &dir, "canvas_report", CATALOG_TIMESTAMP_WIDTH).unwrap();

        assert!(path.starts_with(&dir));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("canvas_report_"));
        assert_eq!(name.len(), "canvas_report_".len() + 9 + ".csv".len());

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "phase,canvas_page_title\n0,\"Intro, part 1\"\n");
    }
}
