use std::path::Path;

use serde::Serialize;

use crate::app::{AppContext, Result, TributaryError};
use crate::domain::{Source, SourceOptions, SourceType};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Resolved {
    feed_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_username: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_custom_instance: Option<bool>,
}

#[derive(Serialize)]
struct Failure {
    source: Source,
    error: String,
    retryable: bool,
}

pub fn resolve(ctx: &AppContext, source_type: SourceType, options: &str) -> Result<()> {
    let source = Source::new("", "", SourceOptions::new(source_type, options));

    let resolved = match source_type {
        SourceType::Nitter => {
            let nitter = ctx.registry.nitter().resolve(&source)?;
            Resolved {
                feed_url: nitter.feed_url,
                source_title: Some(nitter.source_title),
                is_username: Some(nitter.is_username),
                is_custom_instance: Some(nitter.is_custom_instance),
            }
        }
        SourceType::Tumblr => Resolved {
            feed_url: ctx.registry.tumblr().normalize_options(&source)?.value().to_string(),
            source_title: None,
            is_username: None,
            is_custom_instance: None,
        },
    };

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

pub async fn ingest(ctx: &AppContext, sources_path: &Path, feed_path: Option<&Path>) -> Result<()> {
    let sources: Vec<Source> = serde_json::from_slice(&std::fs::read(sources_path)?)?;

    if let Some(feed_path) = feed_path {
        let [source] = sources.as_slice() else {
            return Err(TributaryError::Configuration(
                "--feed replays exactly one source".into(),
            ));
        };
        let payload = std::fs::read(feed_path)?;
        let ingestion = ctx.registry.ingest(source, Some(&payload)).await?;
        println!("{}", serde_json::to_string_pretty(&ingestion)?);
        return Ok(());
    }

    let total = sources.len();
    let results = ctx.ingestor.ingest_all(sources).await;

    let mut ingestions = Vec::new();
    let mut failures = Vec::new();
    for (source, result) in results {
        match result {
            Ok(ingestion) => ingestions.push(ingestion),
            Err(e) => failures.push(Failure {
                source,
                retryable: e.is_retryable(),
                error: e.to_string(),
            }),
        }
    }

    tracing::info!(
        sources = total,
        failed = failures.len(),
        items = ingestions.iter().map(|i| i.items.len()).sum::<usize>(),
        "Ingestion complete"
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "ingestions": ingestions,
            "failures": failures,
        }))?
    );
    Ok(())
}
