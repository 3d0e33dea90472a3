use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeyError {
    #[error("Bill key {0:?} has no '/' separator")]
    MissingSeparator(String),

    #[error("Bill key {0:?} has an empty bill number")]
    EmptyNumber(String),

    #[error("Bill key {0:?} has an empty or undefined bill year")]
    InvalidYear(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Page size must be greater than zero")]
    ZeroPageSize,
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upstream returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed upstream payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode favourites: {0}")]
    Encode(#[from] serde_json::Error),
}
