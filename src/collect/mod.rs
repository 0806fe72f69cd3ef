use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::errors::ScrapeError;
use crate::fetch::urls::{AuctionCategory, DataType};
use crate::fetch::PageFetcher;
use crate::process::frame::Frame;
use crate::scrape::{scrape_auction, scrape_intraday};
use crate::sink::Sink;

/// Auction delivery areas, Baltic first, SYS last. SYS is a synthetic
/// system area that only publishes day-ahead prices.
pub const AUCTION_AREAS: [&str; 22] = [
    "EE", "LT", "LV", // Baltic
    "AT", "BE", "FR", "GER", "NL", "PL", // CWE
    "DK1", "DK2", "FI", "NO1", "NO2", "NO3", "NO4", "NO5", "SE1", "SE2", "SE3", "SE4", // Nordic
    "SYS",
];

/// Intraday delivery areas, including the German TSO zones.
pub const INTRADAY_AREAS: [&str; 25] = [
    "EE", "LT", "LV", // Baltic
    "50HZ", "AMP", "AT", "BE", "FR", "GER", "NL", "PL", "TBW", "TTG", // CWE
    "DK1", "DK2", "FI", "NO1", "NO2", "NO3", "NO4", "NO5", "SE1", "SE2", "SE3", "SE4", // Nordic
];

/// Pause between intraday areas so the portal does not start rejecting
/// the session for request frequency.
const INTER_AREA_PAUSE: Duration = Duration::from_secs(10);

/// Inclusive range of delivery dates.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The window ending at `end` and reaching `days` days back.
    pub fn trailing_days(end: NaiveDate, days: i64) -> Self {
        DateRange {
            start: end - chrono::Duration::days(days),
            end,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Collect every auction sub-market and data type over the date range and
/// hand one combined frame per combination to the sink. A day whose fetch
/// is exhausted leaves a gap; anything else aborts the run.
pub async fn collect_auction_data<F: PageFetcher, S: Sink>(
    fetcher: &F,
    sink: &S,
    range: &DateRange,
) -> Result<()> {
    let market = "auctions";

    for category in AuctionCategory::ALL {
        for data_type in DataType::ALL {
            let areas = auction_areas(category, data_type);
            let mut combined = Frame::default();

            for date in range.iter() {
                info!(
                    market,
                    sub_market = category.dir_name(),
                    data_type = data_type.segment(),
                    %date,
                    "fetching"
                );
                match scrape_auction(fetcher, date, category, data_type, areas).await {
                    Ok(daily) => combined.append(daily)?,
                    Err(ScrapeError::FetchExhausted { url, attempts }) => {
                        warn!(url, attempts, %date, "skipping day, leaving a gap");
                    }
                    Err(err) => {
                        return Err(err).with_context(|| {
                            format!(
                                "collecting {} {} for {}",
                                category.dir_name(),
                                data_type.segment(),
                                date
                            )
                        });
                    }
                }
            }

            let rel = PathBuf::from(market)
                .join(category.dir_name())
                .join(data_type.segment())
                .join(output_name(None, &combined));
            sink.write(&rel, &combined).context("writing auction csv")?;
            info!(path = %rel.display(), rows = combined.rows.len(), "saved");
        }
    }
    Ok(())
}

/// Collect hourly intraday statistics per delivery area over the range.
pub async fn collect_intraday_data<F: PageFetcher, S: Sink>(
    fetcher: &F,
    sink: &S,
    range: &DateRange,
) -> Result<()> {
    let market = "intraday";

    for area in INTRADAY_AREAS {
        sleep(INTER_AREA_PAUSE).await;
        let mut combined = Frame::default();

        for date in range.iter() {
            info!(market, area, %date, "fetching");
            match scrape_intraday(fetcher, date, area).await {
                Ok(daily) => combined.append(daily)?,
                Err(ScrapeError::FetchExhausted { url, attempts }) => {
                    warn!(url, attempts, %date, "skipping day, leaving a gap");
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("collecting intraday {} for {}", area, date));
                }
            }
        }

        let rel = PathBuf::from(market)
            .join(area)
            .join(output_name(Some(area), &combined));
        sink.write(&rel, &combined).context("writing intraday csv")?;
        info!(path = %rel.display(), rows = combined.rows.len(), "saved");
    }
    Ok(())
}

/// SYS only participates in day-ahead prices; every other combination
/// uses the roster without it.
fn auction_areas(category: AuctionCategory, data_type: DataType) -> &'static [&'static str] {
    if category == AuctionCategory::DayAhead && data_type == DataType::Prices {
        &AUCTION_AREAS
    } else {
        &AUCTION_AREAS[..AUCTION_AREAS.len() - 1]
    }
}

/// `{run_date}_{freq}.csv`, prefixed with the area for intraday files. A
/// range with gaps has no inferable frequency and is labelled `None`, so
/// incomplete collections are visible from the file name alone.
fn output_name(area: Option<&str>, frame: &Frame) -> String {
    let run_date = Local::now().format("%Y-%m-%d");
    let freq = frame.infer_freq().unwrap_or_else(|| "None".to_string());
    match area {
        Some(area) => format!("{}_{}_{}.csv", area, run_date, freq),
        None => format!("{}_{}.csv", run_date, freq),
    }
}
