use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("gave up fetching {url} after {attempts} attempts")]
    FetchExhausted { url: String, attempts: usize },

    #[error("{expected} column names for {actual} value columns")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("no table rows extracted from {url}")]
    EmptyTable { url: String },

    #[error("unparseable time label {value:?}")]
    BadTimeLabel { value: String },

    #[error("appended frame columns {right:?} do not match {left:?}")]
    ColumnMismatch { left: Vec<String>, right: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
