use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::adapters::{AdapterRegistry, Ingestion};
use crate::app::{Result, TributaryError};
use crate::domain::Source;

pub const DEFAULT_WORKERS: usize = 10;

/// Ingests many independent sources concurrently.
pub struct ParallelIngestor {
    registry: Arc<AdapterRegistry>,
    semaphore: Arc<Semaphore>,
}

impl ParallelIngestor {
    pub fn with_workers(registry: Arc<AdapterRegistry>, workers: usize) -> Self {
        Self {
            registry,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Returns one result per source, in input order. A failing source never
    /// affects the others.
    pub async fn ingest_all(&self, sources: Vec<Source>) -> Vec<(Source, Result<Ingestion>)> {
        let mut inputs = Vec::new();
        let mut handles = Vec::new();

        for source in sources {
            let registry = self.registry.clone();
            let semaphore = self.semaphore.clone();
            inputs.push(source.clone());

            handles.push(tokio::spawn(async move {
                let result = match semaphore.acquire().await {
                    Ok(_permit) => registry.ingest(&source, None).await,
                    Err(e) => Err(TributaryError::Other(format!("Worker pool closed: {}", e))),
                };
                (source, result)
            }));
        }

        let joined = join_all(handles).await;

        let mut results = Vec::with_capacity(joined.len());
        for (input, outcome) in inputs.into_iter().zip(joined) {
            match outcome {
                Ok((source, result)) => {
                    if let Err(e) = &result {
                        tracing::warn!(source = %source.display_title(), "Ingestion failed: {}", e);
                    }
                    results.push((source, result));
                }
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                    results.push((input, Err(TributaryError::Other(format!("Ingestion task failed: {}", e)))));
                }
            }
        }

        results
    }
}
