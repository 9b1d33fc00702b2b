//! Millionaire question importer entry point.

use std::error::Error;

use millionaire_importer::config::ImportConfig;
use millionaire_importer::import;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ImportConfig::from_env()?;
    tracing::info!(path = %config.questions_path.display(), "Starting question import");

    let summary = import::run(&config).await?;
    tracing::info!(
        parsed = summary.parsed,
        inserted = summary.inserted,
        "Question import finished"
    );

    Ok(())
}
