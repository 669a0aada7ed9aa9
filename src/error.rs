//! Failure taxonomy for the feed transports and the proxy service.
//!
//! Every [`NewsError`] is non-fatal to callers of
//! [`NewsSource::fetch_articles`](crate::source::NewsSource::fetch_articles):
//! it is logged and replaced by the fallback list. The classified error is
//! still available from `try_fetch_articles` for callers that want it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    /// Network unreachable, DNS, TLS, connection reset.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream refused a browser-originated request (HTTP 426).
    #[error("upstream rejected the request with 426 (CORS restriction)")]
    CorsRejected,

    /// Any other non-2xx status.
    #[error("upstream request failed with status {status}")]
    Rejected { status: u16 },

    /// The body was not JSON or did not have the envelope shape.
    #[error("malformed upstream response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A well-formed envelope whose status is not `ok`.
    #[error("upstream returned status {status:?} ({code}): {message}")]
    UpstreamStatus {
        status: String,
        code: String,
        message: String,
    },

    /// The request could not be built (bad base URL in configuration).
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Direct upstream access was configured without a key.
    #[error("no upstream api key configured")]
    MissingApiKey,
}

/// Errors surfaced by the proxy endpoint.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Failed to fetch news")]
    Upstream(#[source] NewsError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let details = match &self {
            ProxyError::Upstream(inner) => inner.to_string(),
        };
        let body = json!({
            "error": self.to_string(),
            "details": details,
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            NewsError::Rejected { status: 503 }.to_string(),
            "upstream request failed with status 503"
        );
        assert!(NewsError::CorsRejected.to_string().contains("426"));
        let err = NewsError::UpstreamStatus {
            status: "error".to_string(),
            code: "rateLimited".to_string(),
            message: "slow down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "upstream returned status \"error\" (rateLimited): slow down"
        );
    }

    #[test]
    fn test_proxy_error_is_500() {
        let response = ProxyError::Upstream(NewsError::MissingApiKey).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
