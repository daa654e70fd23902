//! # Tributary
//!
//! Normalizes platform-specific syndication feeds into one canonical
//! [`Source`](domain::Source) record and its [`Item`](domain::Item)s.
//!
//! ## Architecture
//!
//! Every source runs through the same pipeline:
//!
//! ```text
//! Registry → Adapter → FeedLoader (fetch + parse) → identity → Admission → Media → Items
//! ```
//!
//! - [`adapters`]: per-platform ingestion behind the [`Adapter`](adapters::Adapter) trait
//! - [`normalizer`]: uniform feed model, admission filter, media extraction
//! - [`fetcher`]: HTTP client with ETag/conditional request support
//! - [`domain`]: sources, items and their deterministic ids
//!
//! ## Quick Start
//!
//! ```bash
//! # Where would "@alice" be fetched from?
//! tributary resolve nitter @alice
//!
//! # Ingest a list of sources
//! tributary ingest sources.json
//!
//! # Replay a saved payload for one source
//! tributary ingest source.json --feed alice.xml
//! ```

/// Platform adapters and dispatch.
///
/// - [`NitterAdapter`](adapters::NitterAdapter): Twitter mirror feeds
/// - [`TumblrAdapter`](adapters::TumblrAdapter): Tumblr blogs
/// - [`AdapterRegistry`](adapters::AdapterRegistry): routes a source to its adapter
/// - [`ParallelIngestor`](adapters::ParallelIngestor): concurrent ingestion with a semaphore
pub mod adapters;

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// fetcher, icon store, adapters.
pub mod app;

/// Command-line interface using clap.
///
/// - `resolve <type> <options>` - Print the resolved feed URL
/// - `ingest <sources.json>` - Ingest sources and print JSON results
pub mod cli;

/// Configuration loaded from `~/.config/tributary/config.toml` and the
/// environment.
pub mod config;

/// Core domain models.
///
/// - [`Source`](domain::Source): a subscription to one feed
/// - [`Item`](domain::Item): one normalized post
/// - [`id`](domain::id): deterministic source and item ids
pub mod domain;

/// HTTP fetching with conditional request support.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`FeedLoader`](fetcher::FeedLoader): fetch + parse, with cached payload replay
pub mod fetcher;

/// Source icon upload boundary.
pub mod icons;

/// Feed parsing and the shared entry policies.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0, and JSON Feed 1.0 into
/// [`ParsedFeed`](normalizer::ParsedFeed).
pub mod normalizer;
