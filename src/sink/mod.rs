use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::debug;

use crate::errors::ScrapeError;
use crate::process::frame::{Cell, Frame};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Receives finished frames for persistence.
pub trait Sink {
    fn write(&self, rel_path: &Path, frame: &Frame) -> Result<(), ScrapeError>;
}

/// Writes one CSV file per collected frame under a root directory,
/// creating partition directories on demand. An existing file from a
/// previous run is truncated, never appended to.
pub struct CsvSink {
    root: PathBuf,
}

impl CsvSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CsvSink { root: root.into() }
    }
}

impl Sink for CsvSink {
    fn write(&self, rel_path: &Path, frame: &Frame) -> Result<(), ScrapeError> {
        let path = self.root.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut wtr = Writer::from_path(&path)?;
        let mut header = Vec::with_capacity(frame.columns.len() + 1);
        header.push("date".to_string());
        header.extend(frame.columns.iter().cloned());
        wtr.write_record(&header)?;

        for row in &frame.rows {
            let mut record = Vec::with_capacity(header.len());
            record.push(row.date.format(DATE_FORMAT).to_string());
            record.extend(row.cells.iter().map(render_cell));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;

        debug!(path = %path.display(), rows = frame.rows.len(), "csv written");
        Ok(())
    }
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Num(Some(v)) => v.to_string(),
        Cell::Time(Some(ts)) => ts.format(DATE_FORMAT).to_string(),
        Cell::Num(None) | Cell::Time(None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::frame::Row;
    use anyhow::Result;
    use chrono::NaiveDate;

    fn sample_frame() -> Frame {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut frame = Frame::new(vec!["EE".into(), "LT".into()]);
        frame.rows.push(Row {
            date: date.and_hms_opt(0, 0, 0).unwrap(),
            cells: vec![Cell::Num(Some(43.21)), Cell::Num(None)],
        });
        frame.rows.push(Row {
            date: date.and_hms_opt(1, 0, 0).unwrap(),
            cells: vec![
                Cell::Num(Some(44.0)),
                Cell::Time(date.and_hms_opt(0, 30, 15)),
            ],
        });
        frame
    }

    #[test]
    fn frames_land_as_csv_with_empty_missing_fields() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let sink = CsvSink::new(dir.path());
        let rel = Path::new("auctions/day_ahead/prices/2024-01-05_h.csv");

        sink.write(rel, &sample_frame())?;

        let written = fs::read_to_string(dir.path().join(rel))?;
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "date,EE,LT");
        assert_eq!(lines[1], "2024-01-01 00:00:00,43.21,");
        assert_eq!(lines[2], "2024-01-01 01:00:00,44,2024-01-01 00:30:15");
        Ok(())
    }

    #[test]
    fn a_rerun_truncates_the_previous_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let sink = CsvSink::new(dir.path());
        let rel = Path::new("intraday/FI/FI_2024-01-05_h.csv");

        sink.write(rel, &sample_frame())?;
        let mut shorter = sample_frame();
        shorter.rows.truncate(1);
        sink.write(rel, &shorter)?;

        let written = fs::read_to_string(dir.path().join(rel))?;
        assert_eq!(written.lines().count(), 2);
        Ok(())
    }
}
