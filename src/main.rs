//! Marquee admin CLI
//!
//! Runs the most-active-commenters report against the comment collection
//! and prints one JSON line per critic.

use clap::Parser;
use futures_util::TryStreamExt;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee::{ActivityReporter, Args, Critic, MongoClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("marquee={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("======================================");
    info!("  Marquee - commenter activity report");
    info!("======================================");
    info!("MongoDB: {}", args.mongodb_uri);
    info!("Database: {}", args.mongodb_db);

    // Connect to MongoDB
    let mongo = match MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await {
        Ok(client) => client,
        Err(e) => {
            error!("MongoDB connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let reporter = ActivityReporter::new(&mongo).await?;

    let critics: Vec<Critic> = reporter.most_active_commenters().await?.try_collect().await?;
    info!("Report produced {} critic(s)", critics.len());

    for critic in &critics {
        println!("{}", serde_json::to_string(critic)?);
    }

    Ok(())
}
