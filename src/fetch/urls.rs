use chrono::NaiveDate;
use url::Url;

pub const BASE_URL: &str = "https://data.nordpoolgroup.com";

/// Category slug of the hourly intraday statistics page.
pub const INTRADAY_STATISTICS: &str = "intraday-hourly-statistics";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionCategory {
    DayAhead,
    IntradayAuction1,
    IntradayAuction2,
    IntradayAuction3,
}

impl AuctionCategory {
    pub const ALL: [AuctionCategory; 4] = [
        AuctionCategory::DayAhead,
        AuctionCategory::IntradayAuction1,
        AuctionCategory::IntradayAuction2,
        AuctionCategory::IntradayAuction3,
    ];

    /// Path segment on the data portal.
    pub fn segment(self) -> &'static str {
        match self {
            AuctionCategory::DayAhead => "day-ahead",
            AuctionCategory::IntradayAuction1 => "intraday-auction-1",
            AuctionCategory::IntradayAuction2 => "intraday-auction-2",
            AuctionCategory::IntradayAuction3 => "intraday-auction-3",
        }
    }

    /// Directory name in the output tree.
    pub fn dir_name(self) -> &'static str {
        match self {
            AuctionCategory::DayAhead => "day_ahead",
            AuctionCategory::IntradayAuction1 => "intraday_auction_1",
            AuctionCategory::IntradayAuction2 => "intraday_auction_2",
            AuctionCategory::IntradayAuction3 => "intraday_auction_3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Prices,
    Volumes,
}

impl DataType {
    pub const ALL: [DataType; 2] = [DataType::Prices, DataType::Volumes];

    pub fn segment(self) -> &'static str {
        match self {
            DataType::Prices => "prices",
            DataType::Volumes => "volumes",
        }
    }
}

/// Auction page for one delivery date and a comma-joined area list. The
/// portal expects the commas literally, so the query is assembled by hand
/// and only validated by the `Url` parse.
pub fn auction_url(
    category: AuctionCategory,
    data_type: DataType,
    delivery_date: NaiveDate,
    areas: &[&str],
) -> Url {
    let raw = format!(
        "{}/auction/{}/{}?deliveryDate={}&currency=EUR&aggregation=Hourly&deliveryAreas={}",
        BASE_URL,
        category.segment(),
        data_type.segment(),
        delivery_date.format("%Y-%m-%d"),
        areas.join(","),
    );
    Url::parse(&raw).expect("assembled auction URL should be valid")
}

/// Hourly intraday statistics page for one delivery date and area.
pub fn intraday_url(delivery_date: NaiveDate, area: &str) -> Url {
    let raw = format!(
        "{}/intraday/{}?deliveryDate={}&deliveryArea={}",
        BASE_URL,
        INTRADAY_STATISTICS,
        delivery_date.format("%Y-%m-%d"),
        area,
    );
    Url::parse(&raw).expect("assembled intraday URL should be valid")
}
