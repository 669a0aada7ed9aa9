//! Transports that produce one page of raw articles.
//!
//! The module uses a trait-based design so the source logic is independent
//! of where articles come from:
//! - [`ArticleFeed`]: core trait, "give me the envelope for this request"
//! - [`UpstreamFeed`]: the news API's `/everything` search, called with a key
//!   held by this process (server side only)
//! - [`ProxyFeed`]: the same-origin proxy endpoint, no key involved
//! - [`MockFeed`]: the bundled catalog
//!
//! # Failure classification
//!
//! | Condition | Error |
//! |-----------|-------|
//! | connect / DNS / TLS / read failure | [`NewsError::Transport`] |
//! | HTTP 426 | [`NewsError::CorsRejected`] |
//! | other non-2xx | [`NewsError::Rejected`] |
//! | body not a JSON envelope | [`NewsError::Malformed`] |
//! | envelope `status != "ok"` | [`NewsError::UpstreamStatus`] |
//!
//! There are no retries and no explicit timeout; reqwest's defaults apply.

use crate::catalog::{self, Desk};
use crate::config::{DEFAULT_BASE_URL, NewsConfig};
use crate::error::NewsError;
use crate::models::NewsEnvelope;
use crate::utils::truncate_for_log;
use chrono::{Duration, NaiveDate, Utc};
use reqwest::{Client, Response, StatusCode};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use url::Url;

/// What the caller wants: a topic and a page of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub query: String,
    pub page_size: u32,
    pub page: u32,
}

impl FeedRequest {
    /// Zero sizes and pages are clamped to 1.
    pub fn new(query: impl Into<String>, page_size: u32, page: u32) -> Self {
        Self {
            query: query.into(),
            page_size: page_size.max(1),
            page: page.max(1),
        }
    }
}

/// Source of raw article pages.
pub trait ArticleFeed {
    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Fetch one page. Errors are classified, never panics.
    async fn fetch_page(&self, request: &FeedRequest) -> Result<NewsEnvelope, NewsError>;
}

/// Map a non-2xx status to its error class.
fn check_status(status: StatusCode) -> Result<(), NewsError> {
    if status == StatusCode::UPGRADE_REQUIRED {
        return Err(NewsError::CorsRejected);
    }
    if !status.is_success() {
        return Err(NewsError::Rejected {
            status: status.as_u16(),
        });
    }
    Ok(())
}

/// Status check, body read, envelope decode, `status == "ok"` check.
async fn read_envelope(response: Response) -> Result<NewsEnvelope, NewsError> {
    check_status(response.status())?;
    let body = response.text().await?;

    let envelope: NewsEnvelope = serde_json::from_str(&body).map_err(|e| {
        warn!(
            error = %e,
            body_preview = %truncate_for_log(&body, 300),
            "Upstream body is not a news envelope"
        );
        e
    })?;

    if !envelope.is_ok() {
        return Err(NewsError::UpstreamStatus {
            status: envelope.status,
            code: envelope.code.unwrap_or_else(|| "unknown".to_string()),
            message: envelope
                .message
                .unwrap_or_else(|| "Unknown error".to_string()),
        });
    }
    Ok(envelope)
}

/// Inclusive `(from, to)` date window ending on `today`. Lookbacks past the
/// calendar's range start at [`NaiveDate::MIN`].
pub fn date_window(today: NaiveDate, lookback_days: i64) -> (NaiveDate, NaiveDate) {
    let from = Duration::try_days(lookback_days.max(0))
        .and_then(|span| today.checked_sub_signed(span))
        .unwrap_or(NaiveDate::MIN);
    (from, today)
}

/// Direct access to the news API's `/everything` endpoint.
#[derive(Clone)]
pub struct UpstreamFeed {
    client: Client,
    base_url: String,
    api_key: String,
    sort_by: String,
    lookback_days: i64,
}

impl std::fmt::Debug for UpstreamFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamFeed")
            .field("base_url", &self.base_url)
            .field("sort_by", &self.sort_by)
            .field("lookback_days", &self.lookback_days)
            .finish_non_exhaustive()
    }
}

impl UpstreamFeed {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        sort_by: impl Into<String>,
        lookback_days: i64,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            sort_by: sort_by.into(),
            lookback_days,
        }
    }

    /// Build from configuration; fails if no key is configured.
    pub fn from_config(client: Client, config: &NewsConfig) -> Result<Self, NewsError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(NewsError::MissingApiKey)?;
        let base_url = if config.base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            config.base_url.as_str()
        };
        Ok(Self::new(
            client,
            base_url,
            api_key,
            config.sort_by.clone(),
            config.lookback_days,
        ))
    }

    /// The full request URL, key included.
    pub fn request_url(&self, request: &FeedRequest, today: NaiveDate) -> Result<Url, NewsError> {
        let (from, to) = date_window(today, self.lookback_days);
        let mut url = Url::parse(&format!(
            "{}/everything",
            self.base_url.trim_end_matches('/')
        ))?;
        url.query_pairs_mut()
            .append_pair("q", &request.query)
            .append_pair("from", &from.to_string())
            .append_pair("to", &to.to_string())
            .append_pair("sortBy", &self.sort_by)
            .append_pair("pageSize", &request.page_size.to_string())
            .append_pair("page", &request.page.to_string())
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    /// Send the search request and hand back the raw response.
    #[instrument(level = "debug", skip(self), fields(query = %request.query, page = request.page))]
    pub async fn send(&self, request: &FeedRequest) -> Result<Response, NewsError> {
        let url = self.request_url(request, Utc::now().date_naive())?;
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        debug!(
            status = response.status().as_u16(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Upstream responded"
        );
        Ok(response)
    }
}

impl ArticleFeed for UpstreamFeed {
    fn name(&self) -> &'static str {
        "upstream"
    }

    async fn fetch_page(&self, request: &FeedRequest) -> Result<NewsEnvelope, NewsError> {
        let response = self.send(request).await?;
        read_envelope(response).await
    }
}

/// The same-origin proxy endpoint (`GET /news?q=&pageSize=&page=`).
#[derive(Debug, Clone)]
pub struct ProxyFeed {
    client: Client,
    endpoint: String,
}

impl ProxyFeed {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn request_url(&self, request: &FeedRequest) -> Result<Url, NewsError> {
        let mut url = Url::parse(&self.endpoint)?;
        url.query_pairs_mut()
            .append_pair("q", &request.query)
            .append_pair("pageSize", &request.page_size.to_string())
            .append_pair("page", &request.page.to_string());
        Ok(url)
    }
}

impl ArticleFeed for ProxyFeed {
    fn name(&self) -> &'static str {
        "proxy"
    }

    #[instrument(level = "debug", skip(self), fields(query = %request.query, page = request.page))]
    async fn fetch_page(&self, request: &FeedRequest) -> Result<NewsEnvelope, NewsError> {
        let url = self.request_url(request)?;
        let response = self.client.get(url).send().await?;
        read_envelope(response).await
    }
}

/// Answers from the bundled catalog.
///
/// `latest` (or an empty query) lists the whole catalog, a desk query lists
/// that desk, anything else is a substring search. Pages are cut from the
/// match list.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockFeed;

impl ArticleFeed for MockFeed {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_page(&self, request: &FeedRequest) -> Result<NewsEnvelope, NewsError> {
        let query = request.query.trim();
        let matches = if query.is_empty() || query.eq_ignore_ascii_case("latest") {
            catalog::all(None)
        } else if let Some(desk) = Desk::from_query(query) {
            catalog::by_desk(desk, None)
        } else {
            catalog::search(query, None)
        };
        let total = matches.len() as u64;
        let size = request.page_size.max(1) as usize;
        let skip = (request.page.saturating_sub(1) as usize).saturating_mul(size);
        let page = matches.into_iter().skip(skip).take(size).collect();
        Ok(NewsEnvelope::ok(page, total))
    }
}
