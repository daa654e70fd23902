use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tributary::app::AppContext;
use tributary::cli::{commands, Cli, Commands};
use tributary::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(workers) = cli.workers {
        config.ingest.workers = workers;
    }

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Resolve {
            source_type,
            options,
        } => {
            commands::resolve(&ctx, source_type, &options)?;
        }
        Commands::Ingest { sources, feed } => {
            commands::ingest(&ctx, &sources, feed.as_deref()).await?;
        }
    }

    Ok(())
}
