use anyhow::Result;
use chrono::Local;
use nordscraper::{
    collect::{collect_auction_data, collect_intraday_data, DateRange},
    fetch::HttpPageFetcher,
    sink::CsvSink,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) collection window ────────────────────────────────────────
    // The portal keeps the last few days fresh, so every run refetches
    // the trailing window and overwrites its output.
    let today = Local::now().date_naive();
    let range = DateRange::trailing_days(today, 4);
    info!(start = %range.start, end = %range.end, "collection window");

    // ─── 3) wire the fetcher and the sink ────────────────────────────
    let fetcher = HttpPageFetcher::new();
    let sink = CsvSink::new("data");

    // ─── 4) run both markets sequentially ────────────────────────────
    collect_auction_data(&fetcher, &sink, &range).await?;
    collect_intraday_data(&fetcher, &sink, &range).await?;

    info!("all done");
    Ok(())
}
