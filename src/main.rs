//! # newsnst
//!
//! The data layer of a news portal: fetch articles for a topic, normalize
//! them into one uniform shape, infer a category for each, and fall back to
//! a fixed article list whenever live data cannot be obtained.
//!
//! ## Features
//!
//! - Three article backends: the news API directly (server side only), a
//!   same-origin proxy, or the bundled mock catalog
//! - Keyword-priority category inference and relative-time labels
//! - Configurable completeness filter and date policy
//! - A proxy service that keeps the API key off clients
//! - JSON snapshots and Markdown rendering of fetched pages
//!
//! ## Usage
//!
//! ```sh
//! newsnst fetch technology --page-size 6
//! newsnst desks breaking world
//! NEWS_API_KEY=... newsnst serve
//! ```

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod catalog;
mod category;
mod cli;
mod config;
mod error;
mod fallback;
mod models;
mod normalize;
mod outputs;
mod proxy;
mod source;
mod utils;

use api::{ArticleFeed, MockFeed, ProxyFeed, UpstreamFeed};
use catalog::{Desk, TRENDING};
use cli::{Cli, Command, OutputFormat};
use config::{BackendKind, NewsConfig};
use outputs::{json, markdown};
use source::{NewsSource, random_home_topic};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args.command, "Parsed CLI arguments");

    let mut config = NewsConfig::load(args.config.as_deref())?;
    args.source.apply(&mut config);
    debug!(?config, "Effective configuration");

    let client = reqwest::Client::new();

    match args.command {
        Command::Serve { bind } => {
            let Some(api_key) = config.api_key.clone().filter(|k| !k.is_empty()) else {
                return Err("serve needs an upstream key (--api-key or NEWS_API_KEY)".into());
            };
            let state = proxy::ProxyState::new(client, config.base_url.clone(), api_key);
            proxy::serve(bind, state).await?;
        }
        Command::Trending => {
            print!("{}", markdown::trending_to_markdown(TRENDING));
        }
        command => {
            let normalizer = config.normalizer();
            match config.resolved_backend() {
                BackendKind::Upstream => {
                    let feed = UpstreamFeed::from_config(client, &config)?;
                    run(NewsSource::new(feed, normalizer), command).await?;
                }
                BackendKind::Proxy => {
                    let Some(endpoint) = config.proxy_url.clone() else {
                        return Err("proxy backend needs --proxy-url or NEWSNST_PROXY_URL".into());
                    };
                    run(NewsSource::new(ProxyFeed::new(client, endpoint), normalizer), command)
                        .await?;
                }
                BackendKind::Mock => {
                    run(NewsSource::new(MockFeed, normalizer), command).await?;
                }
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

/// Run a fetching command against whichever backend was configured.
#[instrument(level = "info", skip_all)]
async fn run<F: ArticleFeed>(source: NewsSource<F>, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Fetch {
            query,
            page_size,
            page,
            pages,
            format,
            json_output_dir,
        } => {
            let query = query.unwrap_or_else(|| random_home_topic().to_string());
            info!(%query, page_size, page, pages, "Fetching articles");

            let feed_page = source.load_pages(&query, page_size, page, pages).await;
            if feed_page.fallback {
                warn!(%query, "Serving fallback articles");
            }

            match format {
                OutputFormat::Markdown => {
                    print!("{}", markdown::feed_to_markdown(&feed_page, Utc::now()));
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&feed_page)?);
                }
            }

            if let Some(dir) = json_output_dir {
                let path = json::write_feed(&feed_page, &dir).await?;
                info!(path = %path.display(), "Snapshot written");
            }
        }
        Command::Desks { desks, page_size } => {
            let desks = if desks.is_empty() {
                Desk::ALL.to_vec()
            } else {
                desks
            };
            let loaded = source.fetch_desks(&desks, page_size).await;
            print!("{}", markdown::desks_to_markdown(&loaded, Utc::now()));
        }
        Command::Trending | Command::Serve { .. } => {}
    }
    Ok(())
}
