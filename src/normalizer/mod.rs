//! Uniform feed model and the parser that produces it.
//!
//! Adapters never look at feed-rs types directly: [`parse_feed`] flattens
//! RSS/Atom/JSON Feed documents into [`ParsedFeed`], and the shared
//! [`admission`] and [`media`] helpers work on that model.

pub mod admission;
pub mod media;

use chrono::{DateTime, Utc};
use feed_rs::model::{Link, Person};
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{Result, TributaryError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub links: Vec<String>,
    pub image: Option<String>,
    pub entries: Vec<ParsedEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedEntry {
    /// Native entry id, empty when the feed has none.
    pub id: String,
    pub links: Vec<String>,
    pub title: Option<String>,
    /// Raw (still escaped) description markup.
    pub description: Option<String>,
    pub published: Option<DateTime<Utc>>,
    /// Multi-valued creator extension (e.g. `dc:creator`).
    pub creators: Vec<String>,
}

impl ParsedEntry {
    /// The entry's primary link, if it has a non-empty href.
    pub fn primary_link(&self) -> Option<&str> {
        self.links.first().map(String::as_str).filter(|href| !href.is_empty())
    }

    /// Stable identifier used for item ids: the native id, falling back to
    /// the primary link.
    pub fn identifier(&self) -> Option<&str> {
        if self.id.is_empty() {
            self.primary_link()
        } else {
            Some(&self.id)
        }
    }

    /// Unescaped description text.
    pub fn unescaped_description(&self) -> Option<String> {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(unescape)
    }
}

/// Decodes HTML entities in `text`.
pub fn unescape(text: &str) -> String {
    decode_html_entities(text).to_string()
}

/// Parses RSS 0.9x/1.0/2.0, Atom and JSON Feed payloads.
///
/// Entries without a native id keep an empty `id`; no id is synthesized.
pub fn parse_feed(body: &[u8]) -> Result<ParsedFeed> {
    let feed = parser::Builder::new()
        .id_generator(|_, _, _| String::new())
        .build()
        .parse(body)
        .map_err(|e| TributaryError::FeedParse(e.to_string()))?;

    let image = feed
        .logo
        .map(|i| i.uri)
        .or_else(|| feed.icon.map(|i| i.uri))
        .filter(|uri| !uri.is_empty());

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| ParsedEntry {
            id: entry.id,
            links: entry.links.into_iter().map(|l| l.href).collect(),
            title: entry.title.map(|t| t.content),
            description: entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body)),
            published: entry.published.or(entry.updated),
            creators: entry
                .authors
                .into_iter()
                .filter(is_creator)
                .map(|a| a.name)
                .collect(),
        })
        .collect();

    Ok(ParsedFeed {
        title: feed.title.map(|t| t.content).filter(|t| !t.is_empty()),
        links: feed
            .links
            .into_iter()
            .filter(|l| !is_self_link(l))
            .map(|l| l.href)
            .collect(),
        image,
        entries,
    })
}

/// `rel="self"` points back at the feed document, not the site.
fn is_self_link(link: &Link) -> bool {
    link.rel.as_deref() == Some("self")
}

/// feed-rs reports an RSS `<author>` as a person named "author" carrying the
/// address; only `dc:creator` style names count as creators.
fn is_creator(person: &Person) -> bool {
    person.email.is_none() && !person.name.is_empty() && person.name != "author"
}
