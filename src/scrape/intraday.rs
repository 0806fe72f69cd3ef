use chrono::NaiveDate;
use tracing::instrument;

use crate::errors::ScrapeError;
use crate::fetch::urls;
use crate::fetch::PageFetcher;
use crate::process::frame::{Cell, Frame, Row};
use crate::process::{convert, date_parser, timeshift};

/// Column schema of the hourly statistics grid, in rendering order. The
/// two trailing columns are timestamps, everything else is numeric.
/// Trade times are quoted in CET, not UTC.
pub const INTRADAY_COLUMNS: [&str; 12] = [
    "high",
    "low",
    "VWAP",
    "open",
    "close",
    "VWAP1H",
    "VWAP3H",
    "buy_volume",
    "sell_volume",
    "transaction_volume",
    "first_trade_date",
    "last_trade_date",
];

const TRADE_DATE_COLUMNS: usize = 2;

/// Scrape one day of hourly intraday statistics for a single delivery
/// area. Hours without trades keep their slot with every value missing.
#[instrument(level = "info", skip_all, fields(date = %delivery_date, area))]
pub async fn scrape_intraday<F: PageFetcher>(
    fetcher: &F,
    delivery_date: NaiveDate,
    area: &str,
) -> Result<Frame, ScrapeError> {
    let url = urls::intraday_url(delivery_date, area);
    let rows = super::fetch_grid(fetcher, &url).await?;

    let columns: Vec<String> = INTRADAY_COLUMNS.iter().map(|c| c.to_string()).collect();
    let value_cols = rows[0].len() - 1;
    if columns.len() != value_cols {
        return Err(ScrapeError::SchemaMismatch {
            expected: columns.len(),
            actual: value_cols,
        });
    }

    let mut frame = Frame::new(columns);
    for row in rows {
        let date = date_parser::parse_hour_range(&row[0], delivery_date)?;
        let cells = row[1..]
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i >= value_cols - TRADE_DATE_COLUMNS {
                    Cell::Time(date_parser::parse_trade_timestamp(s))
                } else {
                    Cell::Num(convert::parse_decimal(s))
                }
            })
            .collect();
        frame.rows.push(Row { date, cells });
    }

    Ok(timeshift::fix_timeshift(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::stubs::{shifted_grid, FixedPage};
    use anyhow::Result;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn statistics_day_has_the_fixed_schema() -> Result<()> {
        let page = FixedPage(shifted_grid(12, |_, col| {
            if col >= 10 {
                "05.08.2024 14:30:00".to_string()
            } else {
                "7,25".to_string()
            }
        }));
        let frame = scrape_intraday(&page, date(), "FI").await?;

        assert_eq!(frame.columns, INTRADAY_COLUMNS.to_vec());
        assert_eq!(frame.rows.len(), 24);
        assert_eq!(frame.rows[0].date, date().and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(frame.rows[0].cells[0], Cell::Num(Some(7.25)));
        // trade times never match the export format and stay missing
        assert_eq!(frame.rows[0].cells[10], Cell::Time(None));
        assert_eq!(frame.rows[0].cells[11], Cell::Time(None));
        Ok(())
    }

    #[tokio::test]
    async fn day_without_trades_still_yields_24_slots() -> Result<()> {
        let page = FixedPage(shifted_grid(12, |_, _| String::new()));
        let frame = scrape_intraday(&page, date(), "FI").await?;

        assert_eq!(frame.rows.len(), 24);
        for row in &frame.rows {
            for (i, cell) in row.cells.iter().enumerate() {
                if i >= 10 {
                    assert_eq!(cell, &Cell::Time(None));
                } else {
                    assert_eq!(cell, &Cell::Num(None));
                }
            }
        }
        assert_eq!(
            frame.rows.last().unwrap().date,
            date().and_hms_opt(23, 0, 0).unwrap()
        );
        Ok(())
    }

    #[tokio::test]
    async fn wrong_grid_width_is_a_schema_error() {
        let page = FixedPage(shifted_grid(9, |_, _| "1,0".to_string()));
        let err = scrape_intraday(&page, date(), "FI").await.unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::SchemaMismatch {
                expected: 12,
                actual: 9
            }
        ));
    }
}
