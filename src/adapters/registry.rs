use std::sync::Arc;

use crate::adapters::{Adapter, Ingestion, NitterAdapter, TumblrAdapter};
use crate::app::Result;
use crate::config::Config;
use crate::domain::{Source, SourceType};
use crate::fetcher::FeedLoader;
use crate::icons::IconStore;

/// One adapter per [`SourceType`].
pub struct AdapterRegistry {
    nitter: Arc<NitterAdapter>,
    tumblr: Arc<TumblrAdapter>,
}

impl AdapterRegistry {
    pub fn new(config: &Config, loader: FeedLoader, icons: Arc<dyn IconStore + Send + Sync>) -> Self {
        Self {
            nitter: Arc::new(NitterAdapter::new(loader.clone(), icons, config.nitter.clone())),
            tumblr: Arc::new(TumblrAdapter::new(loader)),
        }
    }

    pub fn get(&self, source_type: SourceType) -> Arc<dyn Adapter> {
        match source_type {
            SourceType::Nitter => self.nitter.clone(),
            SourceType::Tumblr => self.tumblr.clone(),
        }
    }

    pub fn nitter(&self) -> &NitterAdapter {
        &self.nitter
    }

    pub fn tumblr(&self) -> &TumblrAdapter {
        &self.tumblr
    }

    /// Routes `source` to the adapter matching its options.
    pub async fn ingest(&self, source: &Source, cached: Option<&[u8]>) -> Result<Ingestion> {
        let adapter = self.get(source.options.source_type());
        tracing::debug!(source_type = %adapter.source_type(), source_id = %source.id, "Dispatching source");
        adapter.ingest(source, cached).await
    }
}
