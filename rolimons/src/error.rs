use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to deserialize response: {0}")]
    Deserialize(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timestamp out of range: {0}")]
    Timestamp(#[from] time::error::ComponentRange),

    #[error("Failed to format timestamp: {0}")]
    TimestampFormat(#[from] time::error::Format),

    #[error("Malformed ledger row {row}: expected 5 columns, found {found}")]
    MalformedRow { row: u64, found: usize },

    #[error("Config error: {0}")]
    Config(String),
}
