//! Data models for upstream articles and their normalized representation.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawArticle`] / [`RawSource`]: article records exactly as the news API sends them
//! - [`NewsEnvelope`]: the `{status, totalResults, articles}` wrapper around a page
//! - [`NormalizedArticle`]: the uniform, ready-to-render article shape
//! - [`VerificationStatus`]: display-only trust label
//!
//! The upstream does not enforce any invariant, so every raw field is optional.
//! The normalized shape uses camelCase on the wire to match what renderers
//! consume, hence the serde `rename_all` attributes.

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// The publisher block of a raw article.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A single article as returned by the upstream news API.
///
/// Any field may be `null` or missing; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl RawArticle {
    /// Publisher display name, if the upstream supplied a non-empty one.
    pub fn source_name(&self) -> Option<&str> {
        self.source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}

/// The envelope wrapping one page of upstream results.
///
/// Error envelopes come back as `{"status": "error", "code": ..., "message": ...}`
/// without an `articles` array.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEnvelope {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<RawArticle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewsEnvelope {
    /// Build a successful envelope around a page of articles.
    pub fn ok(articles: Vec<RawArticle>, total_results: u64) -> Self {
        Self {
            status: "ok".to_string(),
            total_results: Some(total_results),
            articles: Some(articles),
            code: None,
            message: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Display-only trust label attached to each article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationStatus {
    Verified,
    UnderVerification,
    #[allow(dead_code, reason = "wire value; only reached through deserialized pages")]
    Unverified,
}

/// An article in the application's uniform shape.
///
/// `title` and `description` are always non-empty. `source` carries the
/// article URL and doubles as its identifier.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedArticle {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: Category,
    pub source: String,
    pub source_name: String,
    pub is_crowdsourced: bool,
    pub verification_status: VerificationStatus,
    /// Raw upstream timestamp, or a relative label when the source is
    /// configured with `DatePolicy::Relative`.
    pub published_at: String,
}

/// One fetched page together with the request that produced it.
///
/// This is what the JSON and Markdown outputs write.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub query: String,
    pub page: u32,
    pub page_size: u32,
    /// `true` when live data could not be obtained and the fallback list was served.
    pub fallback: bool,
    pub fetched_at: String,
    pub articles: Vec<NormalizedArticle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_status_wire_values() {
        let statuses: Vec<VerificationStatus> =
            serde_json::from_str(r#"["verified", "under-verification", "unverified"]"#).unwrap();
        assert_eq!(statuses[2], VerificationStatus::Unverified);
        assert_eq!(
            serde_json::to_string(&VerificationStatus::Unverified).unwrap(),
            "\"unverified\""
        );
    }

    #[test]
    fn test_raw_article_tolerates_nulls_and_missing_fields() {
        let json = r#"{
            "source": {"id": null, "name": "Wired"},
            "author": null,
            "title": "Headline",
            "description": null,
            "url": "https://example.com/a",
            "urlToImage": null,
            "publishedAt": "2025-09-18T10:00:00Z",
            "extra": 42
        }"#;

        let raw: RawArticle = serde_json::from_str(json).unwrap();
        assert_eq!(raw.title.as_deref(), Some("Headline"));
        assert_eq!(raw.description, None);
        assert_eq!(raw.content, None);
        assert_eq!(raw.source_name(), Some("Wired"));
        assert_eq!(raw.published_at.as_deref(), Some("2025-09-18T10:00:00Z"));
    }

    #[test]
    fn test_raw_article_without_source() {
        let raw: RawArticle = serde_json::from_str(r#"{"title": "t"}"#).unwrap();
        assert!(raw.source.is_none());
        assert_eq!(raw.source_name(), None);
    }

    #[test]
    fn test_blank_source_name_is_none() {
        let raw = RawArticle {
            source: Some(RawSource {
                id: None,
                name: Some("  ".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(raw.source_name(), None);
    }

    #[test]
    fn test_error_envelope_deserialization() {
        let json = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let env: NewsEnvelope = serde_json::from_str(json).unwrap();
        assert!(!env.is_ok());
        assert!(env.articles.is_none());
        assert_eq!(env.code.as_deref(), Some("apiKeyInvalid"));
    }

    #[test]
    fn test_normalized_article_wire_shape() {
        let article = NormalizedArticle {
            title: "Title".to_string(),
            description: "Desc".to_string(),
            image: None,
            category: Category::Health,
            source: "https://example.com/a".to_string(),
            source_name: "Reuters".to_string(),
            is_crowdsourced: false,
            verification_status: VerificationStatus::UnderVerification,
            published_at: "2025-09-18T10:00:00Z".to_string(),
        };

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["sourceName"], "Reuters");
        assert_eq!(value["isCrowdsourced"], false);
        assert_eq!(value["verificationStatus"], "under-verification");
        assert_eq!(value["category"], "Health");
        assert!(value.get("image").is_none());
    }
}
