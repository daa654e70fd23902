pub mod http_fetcher;
pub mod loader;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use loader::{FeedLoader, LoadedFeed};

#[derive(Debug)]
pub enum FetchResult {
    /// New content fetched successfully
    Content {
        body: Vec<u8>,
        etag: Option<String>,
        last_modified: Option<String>,
    },
    /// Content not modified (HTTP 304)
    NotModified,
}

/// Adapter-specific request options, e.g. an Authorization header for a
/// shared instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn basic_auth(credential: &str) -> Self {
        Self {
            headers: vec![("Authorization".into(), format!("Basic {}", credential))],
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
pub trait Fetcher {
    async fn fetch(
        &self,
        url: &str,
        etag: Option<&str>,
        last_modified: Option<&str>,
        options: &RequestOptions,
    ) -> Result<FetchResult>;
}
