pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::SourceType;

#[derive(Parser)]
#[command(name = "tributary")]
#[command(about = "Normalize platform feeds into sources and items", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/tributary/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of sources ingested concurrently
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the feed URL a source option resolves to
    Resolve {
        /// Source type (nitter, tumblr)
        #[arg(value_parser = parse_source_type)]
        source_type: SourceType,
        /// Raw option value, e.g. "@alice" or a blog URL
        options: String,
    },
    /// Ingest sources from a JSON file and print the results as JSON
    Ingest {
        /// JSON array of sources
        sources: PathBuf,
        /// Replay a local feed payload instead of fetching (single source only)
        #[arg(long)]
        feed: Option<PathBuf>,
    },
}

fn parse_source_type(s: &str) -> Result<SourceType, String> {
    s.parse().map_err(|e: crate::app::TributaryError| e.to_string())
}
