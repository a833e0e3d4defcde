// latest-video
// Keeps a site's "latest video" embed in sync with a YouTube uploads playlist

mod api;
mod features;
mod models;
mod utils;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use crate::features::fetcher;
use crate::features::page_loader::{
    load_latest_video, Document, FileRecordSource, HttpRecordSource, LoadOutcome,
};
use crate::utils::config::{FetcherConfig, FALLBACK_VIDEO_ID, USER_AGENT};
use crate::utils::retry::RetryPolicy;
use crate::utils::video_id::parse_video_id;

#[derive(Parser)]
#[command(name = "latest-video")]
#[command(about = "Fetch the newest upload into data/latest.json and preview the embed")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the YouTube API and rewrite data/latest.json
    Fetch,

    /// Run the page loader against a deployed site or a local latest.json
    Preview {
        /// Site or page URL the record path is resolved against
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        site: Option<Url>,

        /// Read the record from a file instead
        #[arg(long)]
        file: Option<PathBuf>,

        /// Video the page shows before the loader runs
        #[arg(long, default_value = FALLBACK_VIDEO_ID, value_parser = parse_video_id)]
        fallback: String,
    },
}

fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

async fn run_fetch() -> ExitCode {
    let config = match FetcherConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match http_client() {
        Ok(client) => client,
        Err(e) => {
            error!("Update failed: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match fetcher::run(&client, &config, &RetryPolicy::default()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Update failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_preview(site: Option<Url>, file: Option<PathBuf>, fallback: &str) -> Result<ExitCode> {
    let mut doc = Document::with_fallback(fallback);

    let outcome = match (file, site) {
        (Some(path), _) => load_latest_video(&mut doc, &FileRecordSource::new(path)).await,
        (None, Some(site)) => {
            let source = HttpRecordSource::new(http_client()?, &site)
                .with_context(|| format!("Cannot resolve latest.json against {}", site))?;
            info!("Loading {}", source.url());
            load_latest_video(&mut doc, &source).await
        }
        (None, None) => anyhow::bail!("preview needs --site or --file"),
    };

    println!("src:    {}", doc.frame_src().unwrap_or_default());
    println!("status: {}", doc.status_text().unwrap_or_default());

    Ok(match outcome {
        LoadOutcome::Updated(_) | LoadOutcome::Skipped => ExitCode::SUCCESS,
        LoadOutcome::Fallback => ExitCode::FAILURE,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "latest_video=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Fetch) {
        Commands::Fetch => run_fetch().await,
        Commands::Preview {
            site,
            file,
            fallback,
        } => match run_preview(site, file, &fallback).await {
            Ok(code) => code,
            Err(e) => {
                error!("Preview failed: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}
