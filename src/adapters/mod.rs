//! Platform adapters.
//!
//! Every adapter follows the same pipeline: validate the source's options,
//! resolve the feed URL, fetch and parse it, complete the source's identity
//! and map the admitted entries to items.

pub mod entries;
pub mod nitter;
pub mod parallel;
pub mod registry;
pub mod tumblr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::app::{Result, TributaryError};
use crate::domain::{id, Item, Source, SourceType};
use crate::normalizer::ParsedFeed;

pub use nitter::NitterAdapter;
pub use parallel::ParallelIngestor;
pub use registry::AdapterRegistry;
pub use tumblr::TumblrAdapter;

/// Fixed feed path suffix of both platforms.
pub const FEED_SUFFIX: &str = "rss";

/// Outcome of one ingestion run: the completed source and its new items,
/// in feed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingestion {
    pub source: Source,
    pub items: Vec<Item>,
}

impl Ingestion {
    /// Nothing changed upstream since the last run.
    pub fn unchanged(source: &Source) -> Self {
        Self {
            source: source.clone(),
            items: Vec::new(),
        }
    }
}

#[async_trait]
pub trait Adapter: Send + Sync {
    fn source_type(&self) -> SourceType;

    /// Ingests `source`. A `cached` payload replaces the network fetch.
    ///
    /// The input source is never modified; every change, including
    /// normalized options, is carried by the returned [`Ingestion`].
    async fn ingest(&self, source: &Source, cached: Option<&[u8]>) -> Result<Ingestion>;
}

/// Rejects sources already claimed by another platform.
pub(crate) fn check_source_type(source: &Source, expected: SourceType) -> Result<()> {
    match source.source_type {
        Some(actual) if actual != expected => Err(TributaryError::Configuration(format!(
            "Source {} has type {}, expected {}",
            source.id, actual, expected
        ))),
        _ => Ok(()),
    }
}

/// Fails when the parsed feed has no title.
pub(crate) fn require_title(feed: &ParsedFeed, url: &str) -> Result<String> {
    feed.title
        .clone()
        .ok_or_else(|| TributaryError::InvalidFeed(format!("Feed at {} has no title", url)))
}

/// Assigns the id (first run only), type and link shared by all platforms.
pub(crate) fn complete_identity(source: &mut Source, source_type: SourceType, feed_url: &str, feed: &ParsedFeed) {
    if source.is_new() {
        source.id = id::source_id(source_type, &source.user_id, &source.column_id, feed_url);
    }
    if source.source_type.is_none() {
        source.source_type = Some(source_type);
    }
    if let Some(link) = feed.links.first() {
        source.link = Some(link.clone());
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceOptions;

    fn feed() -> ParsedFeed {
        ParsedFeed {
            title: Some("Feed".into()),
            links: vec!["https://example.com/".into(), "https://example.com/rss".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_identity_on_first_run() {
        let mut source = Source::new("u", "c", SourceOptions::Tumblr("https://a.tumblr.com/rss".into()));
        complete_identity(&mut source, SourceType::Tumblr, "https://a.tumblr.com/rss", &feed());

        assert_eq!(
            source.id,
            id::source_id(SourceType::Tumblr, "u", "c", "https://a.tumblr.com/rss")
        );
        assert_eq!(source.source_type, Some(SourceType::Tumblr));
        assert_eq!(source.link, Some("https://example.com/".into()));
    }

    #[test]
    fn test_complete_identity_keeps_existing_id() {
        let mut source = Source::new("u", "c", SourceOptions::Tumblr("https://a.tumblr.com/rss".into()));
        source.id = "tumblr-u-c-existing".into();
        complete_identity(&mut source, SourceType::Tumblr, "https://b.tumblr.com/rss", &feed());

        assert_eq!(source.id, "tumblr-u-c-existing");
    }

    #[test]
    fn test_complete_identity_keeps_link_without_feed_links() {
        let mut source = Source::new("u", "c", SourceOptions::Tumblr("https://a.tumblr.com/rss".into()));
        source.link = Some("https://a.tumblr.com/".into());
        let feed = ParsedFeed {
            title: Some("Feed".into()),
            ..Default::default()
        };
        complete_identity(&mut source, SourceType::Tumblr, "https://a.tumblr.com/rss", &feed);

        assert_eq!(source.link, Some("https://a.tumblr.com/".into()));
    }

    #[test]
    fn test_check_source_type_mismatch() {
        let mut source = Source::new("u", "c", SourceOptions::Nitter("@alice".into()));
        source.source_type = Some(SourceType::Tumblr);

        assert!(check_source_type(&source, SourceType::Tumblr).is_ok());
        let err = check_source_type(&source, SourceType::Nitter).unwrap_err();
        assert!(matches!(err, TributaryError::Configuration(_)));
    }

    #[test]
    fn test_require_title() {
        let err = require_title(&ParsedFeed::default(), "https://x/rss").unwrap_err();
        assert!(matches!(err, TributaryError::InvalidFeed(_)));
        assert_eq!(require_title(&feed(), "https://x/rss").unwrap(), "Feed");
    }
}
