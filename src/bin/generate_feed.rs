//! Writes the static chef feed the gallery reads by default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use insta_gallery::source::directory::{chef_feed, CHEF_DIRECTORY};

#[derive(Parser, Debug)]
#[command(name = "generate-feed", version, about = "Generate the chef photo feed")]
struct Args {
    /// Output file
    #[arg(short, long, default_value = "api/chefs.json")]
    out: PathBuf,

    /// Number of chefs to include
    #[arg(short, long, default_value_t = CHEF_DIRECTORY.len())]
    count: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    if args.count > CHEF_DIRECTORY.len() {
        tracing::warn!(
            requested = args.count,
            available = CHEF_DIRECTORY.len(),
            "not enough chefs, writing all of them"
        );
    }

    let photos = chef_feed(args.count, chrono::Utc::now().date_naive());
    let json = serde_json::to_string_pretty(&photos).context("failed to serialize feed")?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&args.out, json)
        .with_context(|| format!("failed to write {}", args.out.display()))?;

    tracing::info!(path = %args.out.display(), photos = photos.len(), "feed written");
    Ok(())
}
