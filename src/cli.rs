//! Command-line interface definitions for newsnst.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Connection settings can be provided via flags, environment variables, or
//! the YAML config file; flags and environment win over the file.

use crate::catalog::Desk;
use crate::config::{BackendKind, NewsConfig};
use crate::normalize::{Completeness, DatePolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command-line arguments for the newsnst application.
///
/// # Examples
///
/// ```sh
/// # Home feed from the bundled catalog
/// newsnst fetch
///
/// # Live search through a running proxy
/// newsnst --proxy-url http://localhost:8888/news fetch climate --page-size 6
///
/// # Run the proxy with a server-held key
/// NEWS_API_KEY=... newsnst serve --bind 0.0.0.0:8888
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long, env = "NEWSNST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for [`NewsConfig`].
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Where articles come from (default: proxy if a proxy URL is set, upstream if a key is set, else mock)
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendKind>,

    /// News API key (only ever used server side)
    #[arg(long, env = "NEWS_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// News API base URL
    #[arg(long, env = "NEWS_API_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Proxy endpoint, e.g. http://localhost:8888/news
    #[arg(long, env = "NEWSNST_PROXY_URL", global = true)]
    pub proxy_url: Option<String>,

    /// Which records survive normalization
    #[arg(long, global = true, value_enum)]
    pub completeness: Option<Completeness>,

    /// Keep raw timestamps or pre-format them as relative labels
    #[arg(long, global = true, value_enum)]
    pub dates: Option<DatePolicy>,
}

impl SourceArgs {
    /// Apply flag/env overrides on top of file configuration.
    pub fn apply(&self, config: &mut NewsConfig) {
        if let Some(backend) = self.backend {
            config.backend = Some(backend);
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(url) = &self.proxy_url {
            config.proxy_url = Some(url.clone());
        }
        if let Some(completeness) = self.completeness {
            config.completeness = completeness;
        }
        if let Some(dates) = self.dates {
            config.dates = dates;
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch one page of articles for a topic
    Fetch {
        /// Topic query; a random home topic when omitted
        query: Option<String>,

        #[arg(long, default_value_t = 20)]
        page_size: u32,

        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Number of consecutive pages to load and merge
        #[arg(long, default_value_t = 1)]
        pages: u32,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Also write a JSON snapshot under this directory
        #[arg(short, long)]
        json_output_dir: Option<PathBuf>,
    },

    /// Fetch the stories page: several desks at once
    Desks {
        /// Desks to load (default: all)
        #[arg(value_enum)]
        desks: Vec<Desk>,

        #[arg(long, default_value_t = 12)]
        page_size: u32,
    },

    /// List trending topics
    Trending,

    /// Run the credential-holding proxy
    Serve {
        #[arg(long, env = "NEWSNST_BIND", default_value = "127.0.0.1:8888")]
        bind: SocketAddr,
    },
}
