//! End-to-end ingestion through the registry with replayed payloads.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use tributary::app::{AppContext, Result, TributaryError};
use tributary::config::Config;
use tributary::domain::{id, Source, SourceOptions, SourceType};
use tributary::fetcher::{FetchResult, Fetcher, RequestOptions};
use tributary::icons::PassthroughIconStore;
use tributary::normalizer::admission::{GRACE_SECS, WINDOW};

const BASE: i64 = 1_700_000_000;

/// Every ingestion in this file replays a payload; the network is never used.
struct Offline;

#[async_trait]
impl Fetcher for Offline {
    async fn fetch(
        &self,
        url: &str,
        _etag: Option<&str>,
        _last_modified: Option<&str>,
        _options: &RequestOptions,
    ) -> Result<FetchResult> {
        Err(TributaryError::FeedFetch(format!("offline: {}", url)))
    }
}

fn context() -> AppContext {
    let mut config = Config::default();
    config.nitter.instance = "https://inst.example".into();
    AppContext::with_parts(config, Arc::new(Offline), Arc::new(PassthroughIconStore))
}

/// A Nitter-style feed whose entry `n` is published at `BASE + n`.
fn nitter_feed(entries: usize) -> String {
    let mut items = String::new();
    for n in 0..entries {
        let published = Utc.timestamp_opt(BASE + n as i64, 0).unwrap().to_rfc2822();
        items.push_str(&format!(
            r#"<item>
  <title>Post {n}</title>
  <description>&lt;p&gt;post {n}&lt;/p&gt;&lt;img src="http://inst.example/pic/{n}.jpg"/&gt;</description>
  <pubDate>{published}</pubDate>
  <guid>https://inst.example/alice/status/{n}#m</guid>
  <link>https://inst.example/alice/status/{n}#m</link>
</item>
"#
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
<title>Alice / Twitter</title>
<link>https://inst.example/alice</link>
<description>Twitter feed for: @alice</description>
<image><url>https://inst.example/pic/alice.jpg</url><title>Alice</title><link>https://inst.example/alice</link></image>
{items}</channel>
</rss>"#
    )
}

fn alice() -> Source {
    Source::new("user-1", "column-1", SourceOptions::Nitter("@alice".into()))
}

#[tokio::test]
async fn first_run_completes_source() {
    let ctx = context();
    let payload = nitter_feed(3);

    let ingestion = ctx
        .registry
        .ingest(&alice(), Some(payload.as_bytes()))
        .await
        .unwrap();

    let source = &ingestion.source;
    assert_eq!(
        source.id,
        id::source_id(SourceType::Nitter, "user-1", "column-1", "https://inst.example/alice/rss")
    );
    assert_eq!(source.source_type, Some(SourceType::Nitter));
    assert_eq!(source.title, "@alice");
    assert_eq!(source.icon, Some("https://inst.example/pic/alice.jpg".into()));

    assert_eq!(ingestion.items.len(), 3);
    for item in &ingestion.items {
        assert_eq!(item.source_id, source.id);
        assert_eq!(item.user_id, "user-1");
        assert_eq!(item.column_id, "column-1");
        assert_eq!(item.media_urls().len(), 1);
        assert!(item.media_urls()[0].starts_with("https://"));
    }
}

#[tokio::test]
async fn reingestion_is_idempotent() {
    let ctx = context();
    let payload = nitter_feed(10);

    let first = ctx
        .registry
        .ingest(&alice(), Some(payload.as_bytes()))
        .await
        .unwrap();
    let second = ctx
        .registry
        .ingest(&alice(), Some(payload.as_bytes()))
        .await
        .unwrap();

    let first_ids: HashSet<_> = first.items.iter().map(|i| i.id.clone()).collect();
    let second_ids: HashSet<_> = second.items.iter().map(|i| i.id.clone()).collect();
    assert_eq!(first_ids.len(), 10);
    assert_eq!(first_ids, second_ids);
}

#[tokio::test]
async fn completed_source_keeps_its_identity() {
    let ctx = context();
    let payload = nitter_feed(2);

    let first = ctx
        .registry
        .ingest(&alice(), Some(payload.as_bytes()))
        .await
        .unwrap();
    let second = ctx
        .registry
        .ingest(&first.source, Some(payload.as_bytes()))
        .await
        .unwrap();

    assert_eq!(second.source.id, first.source.id);
    assert_eq!(second.source.source_type, first.source.source_type);
    assert_eq!(second.source.icon, first.source.icon);
}

#[tokio::test]
async fn only_first_window_of_entries_admitted() {
    let ctx = context();
    let payload = nitter_feed(WINDOW + 15);

    let ingestion = ctx
        .registry
        .ingest(&alice(), Some(payload.as_bytes()))
        .await
        .unwrap();

    assert_eq!(ingestion.items.len(), WINDOW);
    let titles: Vec<_> = ingestion.items.iter().map(|i| i.title.clone()).collect();
    let expected: Vec<_> = (0..WINDOW).map(|n| format!("Post {}", n)).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn watermark_grace_boundary() {
    let ctx = context();
    let payload = nitter_feed(20);

    // Post n is published at BASE + n; with the watermark at BASE + 19 the
    // cutoff is BASE + 9, so posts 10..20 are admitted.
    let mut source = alice();
    source.updated_at = Some(BASE + 19);
    let ingestion = ctx
        .registry
        .ingest(&source, Some(payload.as_bytes()))
        .await
        .unwrap();

    let cutoff = BASE + 19 - GRACE_SECS;
    assert_eq!(ingestion.items.len(), 10);
    assert!(ingestion.items.iter().all(|i| i.published_at > cutoff));
    assert_eq!(ingestion.items[0].title, "Post 10");
}

#[tokio::test]
async fn tumblr_replay_normalizes_options() {
    let ctx = context();
    let payload = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>Staff</title><link>https://staff.tumblr.com/</link>
<item><title>Hello</title><link>https://staff.tumblr.com/post/1</link><guid>https://staff.tumblr.com/post/1</guid>
<pubDate>Tue, 14 Nov 2023 22:13:20 GMT</pubDate>
<description>&lt;img src="http://64.media.tumblr.com/a.jpg"/&gt;</description></item>
</channel></rss>"#;

    let mut source = Source::new("u", "c", SourceOptions::Tumblr("https://www.tumblr.com/staff".into()));
    source.icon = Some("https://storage.example/old.png".into());
    let ingestion = ctx
        .registry
        .ingest(&source, Some(payload.as_bytes()))
        .await
        .unwrap();

    assert_eq!(
        ingestion.source.options,
        SourceOptions::Tumblr("https://staff.tumblr.com/rss".into())
    );
    assert_eq!(ingestion.source.icon, None);
    assert_eq!(ingestion.items.len(), 1);
    assert_eq!(ingestion.items[0].media, None);
    assert!(ingestion.items[0].media_urls().is_empty());
}

#[tokio::test]
async fn fetch_errors_surface_to_caller() {
    let ctx = context();

    let err = ctx.registry.ingest(&alice(), None).await.unwrap_err();
    assert!(matches!(err, TributaryError::FeedFetch(_)));
    assert!(err.is_retryable());
}
