use serde::{Deserialize, Serialize};

use crate::domain::id;
use crate::domain::Source;

/// Generic per-item options; carries media for platforms that can attach
/// several images to one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOptions {
    #[serde(default)]
    pub media: Vec<String>,
}

/// One normalized post belonging to a [`Source`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub user_id: String,
    pub column_id: String,
    pub source_id: String,
    pub title: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ItemOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Epoch seconds.
    pub published_at: i64,
}

impl Item {
    /// Creates an item owned by `source`, with its id derived from
    /// `identifier` (the entry's native id or its primary link).
    pub fn new(source: &Source, identifier: &str, title: String, link: String, published_at: i64) -> Self {
        Self {
            id: id::item_id(&source.id, identifier),
            user_id: source.user_id.clone(),
            column_id: source.column_id.clone(),
            source_id: source.id.clone(),
            title,
            link,
            media: None,
            options: None,
            description: None,
            author: None,
            published_at,
        }
    }

    /// All media URLs regardless of which field the adapter used.
    pub fn media_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = self.media.as_deref().into_iter().collect();
        if let Some(options) = &self.options {
            urls.extend(options.media.iter().map(String::as_str));
        }
        urls
    }
}
