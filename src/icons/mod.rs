//! Source icon upload boundary.

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Source;

#[async_trait]
pub trait IconStore {
    /// Stores the image referenced by `source.icon` and returns the URL the
    /// source should use from now on, or `None` when it has no usable icon.
    async fn upload_source_icon(&self, source: &Source) -> Result<Option<String>>;
}

/// Keeps the upstream icon URL as-is.
#[derive(Debug, Clone, Default)]
pub struct PassthroughIconStore;

#[async_trait]
impl IconStore for PassthroughIconStore {
    async fn upload_source_icon(&self, source: &Source) -> Result<Option<String>> {
        Ok(source.icon.clone())
    }
}
