use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::TributaryError;

/// Platform tag of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Nitter,
    Tumblr,
}

impl SourceType {
    pub const ALL: [SourceType; 2] = [SourceType::Nitter, SourceType::Tumblr];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Nitter => "nitter",
            SourceType::Tumblr => "tumblr",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = TributaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nitter" => Ok(SourceType::Nitter),
            "tumblr" => Ok(SourceType::Tumblr),
            other => Err(TributaryError::Configuration(format!(
                "Unknown source type: {}",
                other
            ))),
        }
    }
}

/// Per-platform options supplied by the caller, one payload shape per
/// source type. Serialized as `{"nitter": "@alice"}` / `{"tumblr": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOptions {
    /// A `@username`, a search term, or the RSS URL of a self-hosted instance.
    Nitter(String),
    /// A blog URL, normalized to the blog's feed URL on ingestion.
    Tumblr(String),
}

impl SourceOptions {
    pub fn source_type(&self) -> SourceType {
        match self {
            SourceOptions::Nitter(_) => SourceType::Nitter,
            SourceOptions::Tumblr(_) => SourceType::Tumblr,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SourceOptions::Nitter(v) | SourceOptions::Tumblr(v) => v,
        }
    }

    pub fn new(source_type: SourceType, value: impl Into<String>) -> Self {
        match source_type {
            SourceType::Nitter => SourceOptions::Nitter(value.into()),
            SourceType::Tumblr => SourceOptions::Tumblr(value.into()),
        }
    }
}
