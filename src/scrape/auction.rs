use chrono::NaiveDate;
use tracing::instrument;

use crate::errors::ScrapeError;
use crate::fetch::urls::{self, AuctionCategory, DataType};
use crate::fetch::PageFetcher;
use crate::process::frame::{Cell, Frame, Row};
use crate::process::{convert, date_parser, timeshift};

/// Scrape one auction page into a daily frame: numeric value columns named
/// after the delivery areas, keyed by the slot start timestamp, with the
/// rendering timeshift repaired.
#[instrument(level = "info", skip_all, fields(
    date = %delivery_date,
    category = category.segment(),
    data_type = data_type.segment(),
))]
pub async fn scrape_auction<F: PageFetcher>(
    fetcher: &F,
    delivery_date: NaiveDate,
    category: AuctionCategory,
    data_type: DataType,
    areas: &[&str],
) -> Result<Frame, ScrapeError> {
    let url = urls::auction_url(category, data_type, delivery_date, areas);
    let rows = super::fetch_grid(fetcher, &url).await?;

    // Volumes render as a buy/sell column pair per area.
    let columns: Vec<String> = match data_type {
        DataType::Prices => areas.iter().map(|a| a.to_string()).collect(),
        DataType::Volumes => areas
            .iter()
            .flat_map(|a| [format!("{}_buy", a), format!("{}_sell", a)])
            .collect(),
    };

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
            .map(|s| Cell::Num(convert::parse_decimal(s)))
            .collect();
        frame.rows.push(Row { date, cells });
    }

    Ok(timeshift::fix_timeshift(frame))
}
