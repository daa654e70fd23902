//! Tumblr blog sources.

use async_trait::async_trait;
use url::Url;

use crate::adapters::entries::map_entries;
use crate::adapters::{check_source_type, complete_identity, require_title, Adapter, Ingestion, FEED_SUFFIX};
use crate::app::{Result, TributaryError};
use crate::domain::{Source, SourceOptions, SourceType};
use crate::fetcher::{FeedLoader, LoadedFeed, RequestOptions};
use crate::normalizer::media;

fn invalid_options() -> TributaryError {
    TributaryError::Configuration("Invalid source options".into())
}

/// Whether `url` points at tumblr.com.
pub fn is_tumblr_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|host| host.ends_with("tumblr.com")))
        .unwrap_or(false)
}

/// Normalizes a blog URL to its feed URL.
///
/// The hostname must split into exactly three dot-separated parts.
/// `https://<blog>.tumblr.com/...` becomes `https://<blog>.tumblr.com/rss`,
/// `https://www.tumblr.com/<blog>` becomes `https://<blog>.tumblr.com/rss`.
/// Hostnames like `www.<blog>.tumblr.com` have four parts and are rejected.
pub fn normalize_url(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(invalid_options());
    }

    let url = Url::parse(raw.trim()).map_err(|_| invalid_options())?;
    let hostname = url.host_str().ok_or_else(invalid_options)?;

    let hostname_parts: Vec<&str> = hostname.split('.').collect();
    if hostname_parts.len() != 3 {
        return Err(invalid_options());
    }

    if hostname_parts[0] == "www" {
        let path_parts: Vec<&str> = url.path().split('/').collect();
        if path_parts.len() < 2 {
            return Err(invalid_options());
        }
        return Ok(format!("https://{}.tumblr.com/{}", path_parts[1], FEED_SUFFIX));
    }

    Ok(format!("https://{}/{}", hostname, FEED_SUFFIX))
}

pub struct TumblrAdapter {
    loader: FeedLoader,
}

impl TumblrAdapter {
    pub fn new(loader: FeedLoader) -> Self {
        Self { loader }
    }

    /// Returns the normalized options for `source`. The caller persists them
    /// through the returned [`Ingestion`].
    pub fn normalize_options(&self, source: &Source) -> Result<SourceOptions> {
        match &source.options {
            SourceOptions::Tumblr(raw) => Ok(SourceOptions::Tumblr(normalize_url(raw)?)),
            other => Err(TributaryError::Configuration(format!(
                "Expected tumblr options, got {}",
                other.source_type()
            ))),
        }
    }
}

#[async_trait]
impl Adapter for TumblrAdapter {
    fn source_type(&self) -> SourceType {
        SourceType::Tumblr
    }

    async fn ingest(&self, source: &Source, cached: Option<&[u8]>) -> Result<Ingestion> {
        check_source_type(source, SourceType::Tumblr)?;
        let options = self.normalize_options(source)?;
        let feed_url = options.value().to_string();

        let loaded = self
            .loader
            .load(&feed_url, source, cached, &RequestOptions::none())
            .await?;

        let (feed, etag, last_modified) = match loaded {
            LoadedFeed::NotModified => return Ok(Ingestion::unchanged(source)),
            LoadedFeed::Parsed {
                feed,
                etag,
                last_modified,
            } => (feed, etag, last_modified),
        };
        let title = require_title(&feed, &feed_url)?;

        let mut updated = source.clone();
        updated.options = options;
        complete_identity(&mut updated, SourceType::Tumblr, &feed_url, &feed);
        updated.title = title;
        updated.icon = None;
        updated.etag = etag;
        updated.last_modified = last_modified;

        let items = map_entries(&updated, &feed.entries, |_, mut item| {
            item.media = item.description.as_deref().and_then(media::first_https_image);
            item
        });

        tracing::info!(
            source_id = %updated.id,
            url = %feed_url,
            items = items.len(),
            "Ingested tumblr source"
        );

        Ok(Ingestion {
            source: updated,
            items,
        })
    }
}
