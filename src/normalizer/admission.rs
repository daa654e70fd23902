//! Entry admission policy shared by every adapter.
//!
//! An entry becomes an item only when it sits inside the first [`WINDOW`]
//! entries of the feed, carries a title, a primary link and a publication
//! date, and was published after the source's watermark minus
//! [`GRACE_SECS`].

use crate::normalizer::ParsedEntry;

/// Number of leading feed entries that may become items. Matches the number
/// of items kept per source by retention.
pub const WINDOW: usize = 50;

/// Slack applied to the watermark so items published right at the last
/// ingestion are not lost to clock skew.
pub const GRACE_SECS: i64 = 10;

/// The fields of an admitted entry every item needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admitted<'a> {
    pub title: &'a str,
    pub link: &'a str,
    /// Epoch seconds, floored.
    pub published_at: i64,
}

/// Returns the required fields when the entry at `index` may become an item.
pub fn admit(index: usize, entry: &ParsedEntry, watermark: i64) -> Option<Admitted<'_>> {
    if index >= WINDOW {
        return None;
    }

    let title = entry.title.as_deref().filter(|t| !t.is_empty())?;
    let link = entry.primary_link()?;
    let published_at = entry.published?.timestamp();

    if published_at <= watermark - GRACE_SECS {
        return None;
    }

    Some(Admitted {
        title,
        link,
        published_at,
    })
}

pub fn should_skip(index: usize, entry: &ParsedEntry, watermark: i64) -> bool {
    admit(index, entry, watermark).is_none()
}
