use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

use crate::errors::ScrapeError;

pub mod urls;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

const MAX_ATTEMPTS: usize = 5;
const POLL_BUDGET: usize = 1000;
const POLL_PAUSE: Duration = Duration::from_millis(500);

static GRID_TABLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table.dx-datagrid-table-fixed").expect("valid selector for the data grid")
});
static TBODY_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody tr").expect("valid selector for grid rows"));

/// Hands back the rendered markup of the data grid for a portal URL, once
/// the page has populated it.
#[async_trait]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Wait budget for attempt `n` (0-based): 10s, 20s, 30s, 40s, 50s.
fn attempt_timeout(n: usize) -> Duration {
    Duration::from_secs(10 * (n as u64 + 1))
}

/// Polls the portal over HTTP until the grid's table body shows up in the
/// served markup. Each attempt runs with a fresh client and a linearly
/// growing wait budget; a URL that never renders rows is reported as
/// exhausted and skipped by the caller.
#[derive(Debug, Default)]
pub struct HttpPageFetcher;

impl HttpPageFetcher {
    pub fn new() -> Self {
        HttpPageFetcher
    }

    async fn load_page(&self, url: &str, budget: Duration) -> anyhow::Result<String> {
        // One client per attempt so cookies and pooled connections never
        // leak into the next try.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(budget)
            .build()?;
        let deadline = Instant::now() + budget;

        for iteration in 0..POLL_BUDGET {
            let html = client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            // The page re-renders while loading, so the grid is located
            // from scratch on every poll.
            if let Some(grid) = locate_grid(&html) {
                info!(iteration, len = grid.len(), "data grid populated");
                return Ok(grid);
            }
            if Instant::now() + POLL_PAUSE >= deadline {
                anyhow::bail!("table body still empty after {:?}", budget);
            }
            sleep(POLL_PAUSE).await;
        }
        anyhow::bail!("table body still empty after {} polls", POLL_BUDGET)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        for attempt in 0..MAX_ATTEMPTS {
            let budget = attempt_timeout(attempt);
            match self.load_page(url, budget).await {
                Ok(html) => return Ok(html),
                Err(err) => {
                    warn!(
                        url,
                        attempt = attempt + 1,
                        max = MAX_ATTEMPTS,
                        wait = ?budget,
                        %err,
                        "fetch attempt failed"
                    );
                }
            }
        }
        Err(ScrapeError::FetchExhausted {
            url: url.to_string(),
            attempts: MAX_ATTEMPTS,
        })
    }
}

/// The portal serializes the grid as two fixed tables, a header grid and a
/// body grid; only the body grid carries `tbody` rows, and that is the one
/// worth returning.
fn locate_grid(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    doc.select(&GRID_TABLE)
        .find(|table| table.select(&TBODY_ROW).next().is_some())
        .map(|table| table.html())
}
