use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::errors::ScrapeError;

/// Format of the first/last trade columns in the hourly statistics grid.
const TRADE_TS_FORMAT: &str = "%d.%M.%Y %H:%M:%S";

/// Combine an hour-range label like `"13:00 - 14:00"` with the delivery
/// date into a timestamp at the range start. The label keys every record,
/// so a label that does not parse is an error rather than a missing value.
pub fn parse_hour_range(label: &str, date: NaiveDate) -> Result<NaiveDateTime, ScrapeError> {
    let start = label.split(" - ").next().unwrap_or("").trim();
    let time = NaiveTime::parse_from_str(start, "%H:%M").map_err(|_| ScrapeError::BadTimeLabel {
        value: label.to_string(),
    })?;
    Ok(date.and_time(time))
}

/// Parse a first/last trade timestamp cell. Cells that do not match the
/// export format are logged and left missing; trading never stops for them.
pub fn parse_trade_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(trimmed, TRADE_TS_FORMAT) {
        Ok(ts) => Some(ts),
        Err(err) => {
            warn!(value = trimmed, %err, "trade timestamp left empty");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn hour_range_keeps_the_start_time() {
        let ts = parse_hour_range("13:00 - 14:00", date()).unwrap();
        assert_eq!(ts, date().and_hms_opt(13, 0, 0).unwrap());
    }

    #[test]
    fn midnight_range_lands_on_the_delivery_date() {
        let ts = parse_hour_range("00:00 - 01:00", date()).unwrap();
        assert_eq!(ts, date().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn bad_label_is_an_error() {
        let err = parse_hour_range("not a slot", date()).unwrap_err();
        assert!(matches!(err, ScrapeError::BadTimeLabel { .. }));
        let err = parse_hour_range("", date()).unwrap_err();
        assert!(matches!(err, ScrapeError::BadTimeLabel { .. }));
    }

    #[test]
    fn empty_trade_timestamp_is_missing() {
        assert_eq!(parse_trade_timestamp(""), None);
        assert_eq!(parse_trade_timestamp("   "), None);
    }

    #[test]
    fn trade_timestamp_parse_failures_are_missing() {
        assert_eq!(parse_trade_timestamp("garbage"), None);
        assert_eq!(parse_trade_timestamp("05.08.2024 14:30:00"), None);
    }
}
