use thiserror::Error;

#[derive(Error, Debug)]
pub enum TributaryError {
    /// Caller-supplied source options are absent or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The fetched feed is missing data every adapter relies on (its title).
    #[error("Invalid feed: {0}")]
    InvalidFeed(String),

    #[error("Feed fetch error: {0}")]
    FeedFetch(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Icon upload error: {0}")]
    IconUpload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl TributaryError {
    /// Whether the same ingestion may succeed on a later run without the
    /// caller changing the source.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TributaryError::InvalidFeed(_)
                | TributaryError::FeedFetch(_)
                | TributaryError::Http(_)
                | TributaryError::FeedParse(_)
                | TributaryError::IconUpload(_)
        )
    }
}

impl From<crate::config::ConfigError> for TributaryError {
    fn from(e: crate::config::ConfigError) -> Self {
        TributaryError::Configuration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TributaryError>;
