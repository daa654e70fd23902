//! Nitter (Twitter mirror) sources.
//!
//! The option string is one of:
//!
//! - the RSS URL of a self-hosted instance (`https://host/alice/rss`)
//! - any other self-hosted instance URL, usually a search feed
//! - `@username`, served from the shared instance
//! - a search term, served from the shared instance

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::adapters::entries::map_entries;
use crate::adapters::{check_source_type, complete_identity, require_title, Adapter, Ingestion, FEED_SUFFIX};
use crate::app::{Result, TributaryError};
use crate::config::NitterConfig;
use crate::domain::{ItemOptions, Source, SourceOptions, SourceType};
use crate::fetcher::{FeedLoader, LoadedFeed, RequestOptions};
use crate::icons::IconStore;
use crate::normalizer::media;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NitterOptions {
    pub feed_url: String,
    /// Title shown for the source; the user's input rather than the feed's.
    pub source_title: String,
    pub is_username: bool,
    pub is_custom_instance: bool,
}

/// Resolves a Nitter option string against the shared `instance`.
pub fn parse_options(raw: &str, instance: &str) -> Result<NitterOptions> {
    if raw.is_empty() {
        return Err(TributaryError::Configuration("Invalid source options".into()));
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        let suffix = format!("/{}", FEED_SUFFIX);
        if let Some(base) = raw.strip_suffix(suffix.as_str()) {
            let name = base.rsplit('/').next().unwrap_or_default();
            return Ok(NitterOptions {
                feed_url: raw.to_string(),
                source_title: format!("@{}", name),
                is_username: true,
                is_custom_instance: true,
            });
        }

        let url = Url::parse(raw)
            .map_err(|e| TributaryError::Configuration(format!("Invalid source options: {}", e)))?;
        let query = url
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());

        return Ok(NitterOptions {
            feed_url: raw.to_string(),
            source_title: query.unwrap_or_else(|| raw.to_string()),
            is_username: false,
            is_custom_instance: true,
        });
    }

    let instance = instance.trim_end_matches('/');

    if let Some(name) = raw.strip_prefix('@') {
        if name.is_empty() {
            return Err(TributaryError::Configuration("Invalid source options: empty username".into()));
        }
        return Ok(NitterOptions {
            feed_url: format!("{}/{}/{}", instance, name, FEED_SUFFIX),
            source_title: raw.to_string(),
            is_username: true,
            is_custom_instance: false,
        });
    }

    Ok(NitterOptions {
        feed_url: format!(
            "{}/search/{}?f=tweets&q={}",
            instance,
            FEED_SUFFIX,
            urlencoding::encode(raw)
        ),
        source_title: raw.to_string(),
        is_username: false,
        is_custom_instance: false,
    })
}

pub struct NitterAdapter {
    loader: FeedLoader,
    icons: Arc<dyn IconStore + Send + Sync>,
    config: NitterConfig,
}

impl NitterAdapter {
    pub fn new(loader: FeedLoader, icons: Arc<dyn IconStore + Send + Sync>, config: NitterConfig) -> Self {
        Self { loader, icons, config }
    }

    /// Resolves the options of `source` against the configured instance.
    pub fn resolve(&self, source: &Source) -> Result<NitterOptions> {
        match &source.options {
            SourceOptions::Nitter(raw) => parse_options(raw, self.config.instance_url()),
            other => Err(TributaryError::Configuration(format!(
                "Expected nitter options, got {}",
                other.source_type()
            ))),
        }
    }

    /// The shared instance gets the Basic-Auth credential; self-hosted
    /// instances get no extra headers.
    fn request_options(&self, options: &NitterOptions) -> RequestOptions {
        if options.is_custom_instance || self.config.basic_auth.is_empty() {
            RequestOptions::none()
        } else {
            RequestOptions::basic_auth(&self.config.basic_auth)
        }
    }
}

#[async_trait]
impl Adapter for NitterAdapter {
    fn source_type(&self) -> SourceType {
        SourceType::Nitter
    }

    async fn ingest(&self, source: &Source, cached: Option<&[u8]>) -> Result<Ingestion> {
        check_source_type(source, SourceType::Nitter)?;
        let options = self.resolve(source)?;

        let loaded = self
            .loader
            .load(&options.feed_url, source, cached, &self.request_options(&options))
            .await?;

        let (feed, etag, last_modified) = match loaded {
            LoadedFeed::NotModified => return Ok(Ingestion::unchanged(source)),
            LoadedFeed::Parsed {
                feed,
                etag,
                last_modified,
            } => (feed, etag, last_modified),
        };
        require_title(&feed, &options.feed_url)?;

        let mut updated = source.clone();
        complete_identity(&mut updated, SourceType::Nitter, &options.feed_url, &feed);
        updated.title = options.source_title.clone();
        updated.etag = etag;
        updated.last_modified = last_modified;

        let has_icon = updated.icon.as_deref().is_some_and(|icon| !icon.is_empty());
        if !has_icon && options.is_username {
            if let Some(image) = &feed.image {
                updated.icon = Some(image.clone());
                updated.icon = self
                    .icons
                    .upload_source_icon(&updated)
                    .await
                    .map_err(|e| match e {
                        TributaryError::IconUpload(_) => e,
                        other => TributaryError::IconUpload(other.to_string()),
                    })?;
            }
        }

        let items = map_entries(&updated, &feed.entries, |entry, mut item| {
            let images = item
                .description
                .as_deref()
                .map(media::all_secure_images)
                .unwrap_or_default();
            if !images.is_empty() {
                item.options = Some(ItemOptions { media: images });
            }
            if !entry.creators.is_empty() {
                item.author = Some(entry.creators.join(", "));
            }
            item
        });

        tracing::info!(
            source_id = %updated.id,
            url = %options.feed_url,
            items = items.len(),
            "Ingested nitter source"
        );

        Ok(Ingestion {
            source: updated,
            items,
        })
    }
}
