use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("valid selector"));
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("valid selector"));

/// Every table on a page flattened into one grid of cell strings, rows in
/// document order.
#[derive(Debug, Default)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

/// Walk all `table` elements and collect their rows. Data cells (`td`) are
/// preferred; a row without any falls back to header cells (`th`). A page
/// without tables yields an empty grid, which the schema check downstream
/// rejects.
pub fn extract_tables(html: &str) -> RawTable {
    let doc = Html::parse_document(html);
    let mut rows = Vec::new();
    for table in doc.select(&TABLE) {
        for tr in table.select(&TR) {
            let mut cells: Vec<String> = tr.select(&TD).map(cell_text).collect();
            if cells.is_empty() {
                cells = tr.select(&TH).map(cell_text).collect();
            }
            rows.push(cells);
        }
    }
    RawTable { rows }
}

/// All descendant text of a cell joined by single spaces, with
/// non-breaking spaces and newlines removed.
fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\u{a0}', "")
        .replace('\n', "")
}
