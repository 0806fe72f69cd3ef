use chrono::{Duration, NaiveDateTime};

use crate::errors::ScrapeError;

/// A single typed value; `None` is a missing value, never zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Num(Option<f64>),
    Time(Option<NaiveDateTime>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub date: NaiveDateTime,
    pub cells: Vec<Cell>,
}

/// An ordered time-series table: named value columns plus a leading `date`
/// key per row. Rows keep source order.
#[derive(Debug, Default, Clone)]
pub struct Frame {
    /// Value column names; the `date` key is not listed here.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Frame {
    pub fn new(columns: Vec<String>) -> Self {
        Frame {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append another frame's rows in order. An empty frame adopts the
    /// incoming columns; after that the column lists must match exactly.
    pub fn append(&mut self, other: Frame) -> Result<(), ScrapeError> {
        if self.columns.is_empty() && self.rows.is_empty() {
            self.columns = other.columns;
            self.rows = other.rows;
            return Ok(());
        }
        if self.columns != other.columns {
            return Err(ScrapeError::ColumnMismatch {
                left: self.columns.clone(),
                right: other.columns,
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Infer the sampling interval from the timestamp column. Only a
    /// uniformly spaced index of at least three rows gets a label; gaps or
    /// mixed spacing yield `None`.
    pub fn infer_freq(&self) -> Option<String> {
        if self.rows.len() < 3 {
            return None;
        }
        let mut deltas = self.rows.windows(2).map(|w| w[1].date - w[0].date);
        let first = deltas.next()?;
        if first <= Duration::zero() || !deltas.all(|d| d == first) {
            return None;
        }
        Some(freq_label(first.num_seconds()))
    }
}

fn freq_label(secs: i64) -> String {
    let unit = |n: i64, label: &str| {
        if n == 1 {
            label.to_string()
        } else {
            format!("{}{}", n, label)
        }
    };
    if secs % 86_400 == 0 {
        unit(secs / 86_400, "D")
    } else if secs % 3_600 == 0 {
        unit(secs / 3_600, "h")
    } else if secs % 60 == 0 {
        unit(secs / 60, "min")
    } else {
        format!("{}s", secs)
    }
}
