use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "media3p")]
#[command(author, version, about = "Browse third-party media the way the story editor does")]
pub struct Cli {
    /// Path to config file (RON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List media from a provider, optionally filtered and paginated
    Browse {
        /// Provider to browse (unsplash, coverr, ...)
        #[arg(short, long, default_value = "unsplash")]
        provider: String,

        /// Free-text search term
        #[arg(short, long)]
        search: Option<String>,

        /// Category id; takes precedence over the search term
        #[arg(long)]
        category: Option<String>,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// List the categories a provider offers
    Categories {
        /// Provider to query
        #[arg(short, long, default_value = "unsplash")]
        provider: String,
    },
}
