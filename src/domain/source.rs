use serde::{Deserialize, Serialize};

use crate::domain::{SourceOptions, SourceType};

/// A user's subscription to one feed.
///
/// Created by the caller with an empty `id`; adapters complete it on the
/// first successful ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub column_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub options: SourceOptions,
    /// Epoch seconds of the last successful ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl Source {
    pub fn new(user_id: impl Into<String>, column_id: impl Into<String>, options: SourceOptions) -> Self {
        Self {
            id: String::new(),
            user_id: user_id.into(),
            column_id: column_id.into(),
            source_type: None,
            title: String::new(),
            link: None,
            icon: None,
            options,
            updated_at: None,
            etag: None,
            last_modified: None,
        }
    }

    /// True until the first successful ingestion assigned an id.
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// Staleness watermark for the admission filter.
    pub fn watermark(&self) -> i64 {
        self.updated_at.unwrap_or(0)
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            self.options.value()
        } else {
            &self.title
        }
    }
}
