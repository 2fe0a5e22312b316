//! Configuration for Marquee
//!
//! CLI arguments and environment variable handling using clap. Holds the
//! storage handle coordinates (URI + database name) that get passed
//! explicitly into the store and reporter at startup.

use clap::Parser;

/// Marquee - comment store and commenter-activity reporting
#[derive(Parser, Debug, Clone)]
#[command(name = "marquee")]
#[command(about = "Comment store and commenter-activity reporting for the Marquee movie-review service")]
pub struct Args {
    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "marquee")]
    pub mongodb_db: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
