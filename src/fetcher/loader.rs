use std::sync::Arc;

use crate::app::Result;
use crate::domain::Source;
use crate::fetcher::{FetchResult, Fetcher, RequestOptions};
use crate::normalizer::{parse_feed, ParsedFeed};

#[derive(Debug)]
pub enum LoadedFeed {
    Parsed {
        feed: ParsedFeed,
        etag: Option<String>,
        last_modified: Option<String>,
    },
    /// The stored validators still match upstream.
    NotModified,
}

/// Fetch-and-parse step used by every adapter.
#[derive(Clone)]
pub struct FeedLoader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl FeedLoader {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    /// Loads `url`, sending the source's conditional-fetch validators. A
    /// `cached` payload is parsed as-is and no request is made.
    pub async fn load(
        &self,
        url: &str,
        source: &Source,
        cached: Option<&[u8]>,
        options: &RequestOptions,
    ) -> Result<LoadedFeed> {
        if let Some(body) = cached {
            tracing::debug!(url, "Parsing cached feed payload");
            return Ok(LoadedFeed::Parsed {
                feed: parse_feed(body)?,
                etag: source.etag.clone(),
                last_modified: source.last_modified.clone(),
            });
        }

        let result = self
            .fetcher
            .fetch(
                url,
                source.etag.as_deref(),
                source.last_modified.as_deref(),
                options,
            )
            .await?;

        match result {
            FetchResult::NotModified => {
                tracing::debug!(url, "Feed not modified");
                Ok(LoadedFeed::NotModified)
            }
            FetchResult::Content {
                body,
                etag,
                last_modified,
            } => Ok(LoadedFeed::Parsed {
                feed: parse_feed(&body)?,
                etag,
                last_modified,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::SourceOptions;

    const RSS: &str = r#"<?xml version="1.0"?><rss version="2.0"><channel><title>T</title></channel></rss>"#;

    #[derive(Default)]
    struct RecordingFetcher {
        calls: Mutex<Vec<(String, Option<String>)>>,
        not_modified: bool,
    }

    #[async_trait]
    impl Fetcher for RecordingFetcher {
        async fn fetch(
            &self,
            url: &str,
            etag: Option<&str>,
            _last_modified: Option<&str>,
            _options: &RequestOptions,
        ) -> Result<FetchResult> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), etag.map(String::from)));
            if self.not_modified {
                return Ok(FetchResult::NotModified);
            }
            Ok(FetchResult::Content {
                body: RSS.as_bytes().to_vec(),
                etag: Some("\"v2\"".into()),
                last_modified: None,
            })
        }
    }

    fn source() -> Source {
        let mut source = Source::new("u", "c", SourceOptions::Nitter("@alice".into()));
        source.etag = Some("\"v1\"".into());
        source
    }

    #[tokio::test]
    async fn test_cached_payload_skips_fetch() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let loader = FeedLoader::new(fetcher.clone());

        let loaded = loader
            .load("https://x/rss", &source(), Some(RSS.as_bytes()), &RequestOptions::none())
            .await
            .unwrap();

        assert!(matches!(loaded, LoadedFeed::Parsed { .. }));
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_sends_stored_etag() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let loader = FeedLoader::new(fetcher.clone());

        let loaded = loader
            .load("https://x/rss", &source(), None, &RequestOptions::none())
            .await
            .unwrap();

        match loaded {
            LoadedFeed::Parsed { feed, etag, .. } => {
                assert_eq!(feed.title, Some("T".into()));
                assert_eq!(etag, Some("\"v2\"".into()));
            }
            LoadedFeed::NotModified => panic!("expected content"),
        }
        let calls = fetcher.calls.lock().unwrap();
        assert_eq!(calls[0], ("https://x/rss".to_string(), Some("\"v1\"".to_string())));
    }

    #[tokio::test]
    async fn test_not_modified() {
        let fetcher = Arc::new(RecordingFetcher {
            not_modified: true,
            ..Default::default()
        });
        let loader = FeedLoader::new(fetcher);

        let loaded = loader
            .load("https://x/rss", &source(), None, &RequestOptions::none())
            .await
            .unwrap();
        assert!(matches!(loaded, LoadedFeed::NotModified));
    }
}
