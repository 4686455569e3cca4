//! CLI entry point for the firecrawl tool.

use anyhow::{Context, Result};
use clap::Parser;
use firecrawl_client::{ClientConfig, FirecrawlClient};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout carries the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // args carries the API key; log only the command
    debug!(command = ?args.command, version = %args.api_version, "CLI arguments parsed");

    let config = ClientConfig::new(args.api_key.as_deref(), args.api_url.as_deref())
        .context("invalid client configuration")?
        .with_version(args.api_version);
    info!(base_url = %config.base_url(), version = %config.version(), "Firecrawl client starting");

    let client = FirecrawlClient::new(config)?;
    let operation = args.command.into_operation();
    let name = operation.name();

    let outcome = client
        .execute(operation)
        .await
        .with_context(|| format!("{name} failed"))?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    info!(operation = name, "Done");

    Ok(())
}
