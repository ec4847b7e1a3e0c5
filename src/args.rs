//! Command-line argument definition and processing.

use clap::Parser;

/// tunescout - search the iTunes music catalog from the command line
#[derive(Parser, Debug)]
#[command(name = "tunescout")]
#[command(version)]
#[command(about = "Search the iTunes music catalog from the command line", long_about = None)]
pub struct Args {
    /// Search term (omit together with --history to just list recent searches)
    pub term: Option<String>,

    /// Entity to search for (album, artist, song, video, podcast)
    #[arg(short, long, default_value = "album")]
    pub entity: String,

    /// Requested result count, 1-200 (values above 200 are clamped).
    /// Queries the catalog directly, bypassing the session cache and history.
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Bypass the result cache and fetch fresh results
    #[arg(short = 'f', long)]
    pub refresh: bool,

    /// Print recent searches and exit
    #[arg(long)]
    pub history: bool,

    /// Emit results as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Effective log level after the `--verbose` override.
#[must_use]
pub fn determine_log_level(args: &Args) -> &str {
    if args.verbose { "debug" } else { &args.log_level }
}
