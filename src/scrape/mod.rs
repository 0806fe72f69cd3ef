use url::Url;

use crate::errors::ScrapeError;
use crate::fetch::PageFetcher;
use crate::process::extract;

pub mod auction;
pub mod intraday;

pub use auction::scrape_auction;
pub use intraday::scrape_intraday;

/// Fetch a page and flatten every table on it into one rectangular grid.
/// Rows without cells are discarded; ragged rows are padded with empty
/// cells so every row has the same width.
pub(crate) async fn fetch_grid<F: PageFetcher>(
    fetcher: &F,
    url: &Url,
) -> Result<Vec<Vec<String>>, ScrapeError> {
    let html = fetcher.fetch(url.as_str()).await?;
    let mut rows: Vec<Vec<String>> = extract::extract_tables(&html)
        .rows
        .into_iter()
        .filter(|row| !row.is_empty())
        .collect();
    if rows.is_empty() {
        return Err(ScrapeError::EmptyTable {
            url: url.to_string(),
        });
    }
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }
    Ok(rows)
}

#[cfg(test)]
pub(crate) mod stubs {
    use async_trait::async_trait;

    use crate::errors::ScrapeError;
    use crate::fetch::PageFetcher;

    /// Serves one canned grid for every URL.
    pub struct FixedPage(pub String);

    #[async_trait]
    impl PageFetcher for FixedPage {
        async fn fetch(&self, _url: &str) -> Result<String, ScrapeError> {
            Ok(self.0.clone())
        }
    }

    /// Render a body grid with 24 hourly slots. The portal draws the day
    /// shifted, so the first slot label is `23:00 - 00:00`. `cell` decides
    /// the text of value column `col` for slot `slot`.
    pub fn shifted_grid(value_cols: usize, cell: impl Fn(usize, usize) -> String) -> String {
        let mut body = String::from("<table class=\"dx-datagrid-table-fixed\"><tbody>");
        for slot in 0..24 {
            let label = if slot == 0 {
                "23:00 - 00:00".to_string()
            } else {
                format!("{:02}:00 - {:02}:00", slot - 1, slot)
            };
            body.push_str("<tr>");
            body.push_str(&format!("<td>{}</td>", label));
            for col in 0..value_cols {
                body.push_str(&format!("<td>{}</td>", cell(slot, col)));
            }
            body.push_str("</tr>");
        }
        body.push_str("</tbody></table>");
        body
    }
}
