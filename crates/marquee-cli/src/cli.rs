use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Search OMDb from the terminal and keep a watchlist for the session.
///
/// Requires an OMDb API key in `OMDB_API_KEY`.
#[derive(Debug, Parser)]
#[command(name = "marquee", version)]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for log files.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// One-shot command. Without one, an interactive session starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search titles and print the results.
    Search {
        /// Search text. Empty searches the default term.
        query: Option<String>,

        /// Keep only results whose genre contains this text.
        #[arg(short, long)]
        genre: Option<String>,

        /// Number of pages to fetch.
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Print the full record of one title.
    Show {
        /// IMDb id, e.g. tt0111161.
        id: String,
    },
}
