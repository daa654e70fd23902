use std::sync::Arc;

use crate::adapters::{AdapterRegistry, ParallelIngestor};
use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{FeedLoader, Fetcher, HttpFetcher};
use crate::icons::{IconStore, PassthroughIconStore};

pub struct AppContext {
    pub config: Config,
    pub registry: Arc<AdapterRegistry>,
    pub ingestor: ParallelIngestor,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.http)?);
        let icons: Arc<dyn IconStore + Send + Sync> = Arc::new(PassthroughIconStore);
        Ok(Self::with_parts(config, fetcher, icons))
    }

    pub fn with_parts(
        config: Config,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        icons: Arc<dyn IconStore + Send + Sync>,
    ) -> Self {
        let loader = FeedLoader::new(fetcher);
        let registry = Arc::new(AdapterRegistry::new(&config, loader, icons));
        let ingestor = ParallelIngestor::with_workers(registry.clone(), config.ingest.workers);

        Self {
            config,
            registry,
            ingestor,
        }
    }
}
