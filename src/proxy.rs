//! Credential-holding proxy in front of the news API.
//!
//! Browsers call `GET /news?q=&pageSize=&page=` on this service. It searches a
//! yesterday-through-today window sorted by `publishedAt`, signs the request
//! with the key from its own configuration, and returns the upstream JSON
//! unchanged. Clients never see the key.
//!
//! | Outcome | Response |
//! |---------|----------|
//! | upstream answered with JSON (any status) | `200`, upstream body verbatim |
//! | network failure or non-JSON body | `500`, `{"error": "Failed to fetch news", "details": ...}` |

use crate::api::{FeedRequest, UpstreamFeed};
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{NewsError, ProxyError};
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

/// Search window the proxy always uses: yesterday through today.
const PROXY_LOOKBACK_DAYS: i64 = 1;
const PROXY_SORT_BY: &str = "publishedAt";
const DEFAULT_QUERY: &str = "latest";

#[derive(Debug, Clone)]
pub struct ProxyState {
    upstream: UpstreamFeed,
}

impl ProxyState {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            upstream: UpstreamFeed::new(
                client,
                base_url,
                api_key,
                PROXY_SORT_BY,
                PROXY_LOOKBACK_DAYS,
            ),
        }
    }
}

/// Query string of `/news`. Values arrive as text so a bad number falls
/// back to its default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    q: Option<String>,
    #[serde(rename = "pageSize")]
    page_size: Option<String>,
    page: Option<String>,
}

impl NewsParams {
    fn into_request(self) -> FeedRequest {
        let query = self
            .q
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUERY.to_string());
        let page_size = self
            .page_size
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let page = self.page.and_then(|s| s.parse().ok()).unwrap_or(1);
        FeedRequest::new(query, page_size, page)
    }
}

#[instrument(level = "info", skip(state))]
async fn news(
    State(state): State<Arc<ProxyState>>,
    Query(params): Query<NewsParams>,
) -> Result<Json<Value>, ProxyError> {
    let request = params.into_request();
    let body = async {
        let response = state.upstream.send(&request).await?;
        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text)?;
        Ok::<_, NewsError>(value)
    }
    .await
    .map_err(|e| {
        error!(error = %e, query = %request.query, "Proxy failed to fetch news");
        ProxyError::Upstream(e)
    })?;

    Ok(Json(body))
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/news", get(news))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Serve on an already-bound listener until the task is dropped.
pub async fn serve_on(listener: TcpListener, state: ProxyState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

#[instrument(level = "info", skip(state))]
pub async fn serve(addr: SocketAddr, state: ProxyState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "News proxy listening");
    serve_on(listener, state).await
}
