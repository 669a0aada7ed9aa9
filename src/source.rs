//! `NewsSource`: fetch, normalize, and fall back.
//!
//! A source pairs one [`ArticleFeed`] with a [`Normalizer`]. Each call is an
//! independent request: nothing is cached, retried, or deduplicated across
//! calls, and concurrent calls are not sequenced. Callers that care about
//! stale responses must track their own latest request.

use crate::api::{ArticleFeed, FeedRequest};
use crate::catalog::Desk;
use crate::error::NewsError;
use crate::fallback::fallback_articles;
use crate::models::{FeedPage, NormalizedArticle};
use crate::normalize::Normalizer;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use rand::seq::IndexedRandom;
use tracing::{info, instrument, warn};

/// Topics the home feed rotates through.
pub const HOME_TOPICS: &[&str] = &[
    "technology",
    "sports",
    "politics",
    "business",
    "health",
    "science",
    "entertainment",
    "world",
    "finance",
    "education",
];

/// Pick a home-feed topic at random.
pub fn random_home_topic() -> &'static str {
    HOME_TOPICS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("technology")
}

/// Drop repeated articles (same `source` URL), keeping the first.
pub fn dedupe_by_url(articles: Vec<NormalizedArticle>) -> Vec<NormalizedArticle> {
    articles
        .into_iter()
        .unique_by(|a| a.source.clone())
        .collect()
}

#[derive(Debug, Clone)]
pub struct NewsSource<F> {
    feed: F,
    normalizer: Normalizer,
}

impl<F: ArticleFeed> NewsSource<F> {
    pub fn new(feed: F, normalizer: Normalizer) -> Self {
        Self { feed, normalizer }
    }

    /// Fetch and normalize one page, surfacing the classified error.
    pub async fn try_fetch_articles(
        &self,
        query: &str,
        page_size: u32,
        page: u32,
    ) -> Result<Vec<NormalizedArticle>, NewsError> {
        let request = FeedRequest::new(query, page_size, page);
        let envelope = self.feed.fetch_page(&request).await?;
        let raw = envelope.articles.unwrap_or_default();
        let articles = self.normalizer.normalize(&raw, Utc::now());
        info!(
            feed = self.feed.name(),
            received = raw.len(),
            kept = articles.len(),
            "Normalized articles"
        );
        Ok(articles)
    }

    /// Fetch one page. Never fails: any error is logged and the fallback
    /// list is returned instead.
    pub async fn fetch_articles(
        &self,
        query: &str,
        page_size: u32,
        page: u32,
    ) -> Vec<NormalizedArticle> {
        self.fetch_page(query, page_size, page).await.articles
    }

    /// Like [`fetch_articles`](Self::fetch_articles), but also records the
    /// request and whether the fallback list was served.
    #[instrument(level = "info", skip(self), fields(feed = self.feed.name()))]
    pub async fn fetch_page(&self, query: &str, page_size: u32, page: u32) -> FeedPage {
        let now = Utc::now();
        let (articles, fallback) = match self.try_fetch_articles(query, page_size, page).await {
            Ok(articles) => (articles, false),
            Err(NewsError::CorsRejected) => {
                warn!("News API CORS restriction detected, using fallback data");
                (fallback_articles(now, self.normalizer.dates), true)
            }
            Err(e) => {
                warn!(error = %e, "Error fetching news, using fallback data");
                (fallback_articles(now, self.normalizer.dates), true)
            }
        };

        FeedPage {
            query: query.to_string(),
            page: page.max(1),
            page_size: page_size.max(1),
            fallback,
            fetched_at: now.to_rfc3339(),
            articles,
        }
    }

    /// "Load more": fetch `pages` consecutive pages starting at `first_page`
    /// and concatenate them, dropping repeats. Pages are requested one after
    /// another so they come back in order; page numbers stop at `u32::MAX`.
    pub async fn load_pages(
        &self,
        query: &str,
        page_size: u32,
        first_page: u32,
        pages: u32,
    ) -> FeedPage {
        let first_page = first_page.max(1);
        let last_page = first_page.saturating_add(pages.max(1) - 1);
        let mut combined = self.fetch_page(query, page_size, first_page).await;
        for page in (first_page..=last_page).skip(1) {
            let next = self.fetch_page(query, page_size, page).await;
            combined.fallback |= next.fallback;
            combined.articles.extend(next.articles);
        }
        combined.articles = dedupe_by_url(combined.articles);
        combined
    }

    /// Fetch several desks concurrently; results come back in `desks` order.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_desks(
        &self,
        desks: &[Desk],
        page_size: u32,
    ) -> Vec<(Desk, Vec<NormalizedArticle>)> {
        stream::iter(desks.iter().copied())
            .map(|desk| async move {
                let articles = self.fetch_articles(desk.query(), page_size, 1).await;
                (desk, articles)
            })
            .buffered(desks.len().max(1))
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockFeed, UpstreamFeed};
    use crate::category::Category;
    use crate::fallback::FALLBACK_SOURCE;
    use crate::normalize::{Completeness, DatePolicy};
    use serde_json::{Value, json};
    use std::collections::HashSet;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upstream_source(server: &MockServer, normalizer: Normalizer) -> NewsSource<UpstreamFeed> {
        let feed = UpstreamFeed::new(reqwest::Client::new(), server.uri(), "k", "popularity", 0);
        NewsSource::new(feed, normalizer)
    }

    fn ten_articles() -> Value {
        let mut articles: Vec<Value> = (1..=7)
            .map(|i| {
                json!({
                    "source": {"id": null, "name": format!("Outlet {i}")},
                    "title": format!("Software story {i}"),
                    "description": "A digital roundup",
                    "url": format!("https://news.example/{i}"),
                    "urlToImage": null,
                    "publishedAt": "2025-09-18T10:00:00Z"
                })
            })
            .collect();
        articles.push(json!({"title": "No description", "url": "https://news.example/8"}));
        articles.push(json!({"description": "No title", "url": "https://news.example/9"}));
        articles.push(json!({"title": "[Removed]", "description": "[Removed]", "url": "https://removed.com"}));
        json!({"status": "ok", "totalResults": 10, "articles": articles})
    }

    fn assert_fallback(articles: &[NormalizedArticle]) {
        assert!(!articles.is_empty());
        assert!(articles.iter().all(|a| a.source.starts_with(FALLBACK_SOURCE)));
    }

    #[tokio::test]
    async fn test_filters_incomplete_records_and_categorizes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .and(query_param("q", "technology"))
            .and(query_param("pageSize", "6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ten_articles()))
            .mount(&server)
            .await;

        let source = upstream_source(&server, Normalizer::default());
        let articles = source.fetch_articles("technology", 6, 1).await;
        assert_eq!(articles.len(), 7);
        assert!(articles.iter().all(|a| a.category == Category::Technology));
        assert!(articles.iter().all(|a| !a.is_crowdsourced));
        assert_eq!(articles[0].source, "https://news.example/1");
    }

    #[tokio::test]
    async fn test_require_title_policy_keeps_more() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ten_articles()))
            .mount(&server)
            .await;

        let normalizer = Normalizer::new(Completeness::RequireTitle, DatePolicy::Raw);
        let articles = upstream_source(&server, normalizer)
            .fetch_articles("technology", 10, 1)
            .await;
        assert_eq!(articles.len(), 8);
        assert_eq!(articles[7].category, Category::General);
    }

    #[tokio::test]
    async fn test_every_failure_returns_fallback() {
        let responses = [
            ResponseTemplate::new(426),
            ResponseTemplate::new(500),
            ResponseTemplate::new(200).set_body_string("{not json"),
            ResponseTemplate::new(200).set_body_json(json!({"status": "error", "code": "apiKeyInvalid"})),
        ];
        for response in responses {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(response)
                .mount(&server)
                .await;

            let page = upstream_source(&server, Normalizer::default())
                .fetch_page("technology", 6, 1)
                .await;
            assert!(page.fallback);
            assert_fallback(&page.articles);
        }
    }

    #[tokio::test]
    async fn test_connection_refused_returns_fallback() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let feed = UpstreamFeed::new(reqwest::Client::new(), format!("http://{addr}"), "k", "popularity", 0);
        let source = NewsSource::new(feed, Normalizer::default());
        assert_fallback(&source.fetch_articles("technology", 6, 1).await);
    }

    #[tokio::test]
    async fn test_try_fetch_surfaces_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(426))
            .mount(&server)
            .await;

        let err = upstream_source(&server, Normalizer::default())
            .try_fetch_articles("q", 1, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::CorsRejected));
    }

    #[tokio::test]
    async fn test_pages_do_not_overlap() {
        let server = MockServer::start().await;
        for page in 1..=2 {
            let articles: Vec<Value> = (0..3)
                .map(|i| {
                    let n = (page - 1) * 3 + i;
                    json!({
                        "title": format!("Story {n}"),
                        "description": "Body",
                        "url": format!("https://news.example/p{n}")
                    })
                })
                .collect();
            Mock::given(method("GET"))
                .and(query_param("page", page.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(
                    json!({"status": "ok", "totalResults": 6, "articles": articles}),
                ))
                .mount(&server)
                .await;
        }

        let source = upstream_source(&server, Normalizer::default());
        let first = source.fetch_articles("latest", 3, 1).await;
        let second = source.fetch_articles("latest", 3, 2).await;
        let a: HashSet<_> = first.iter().map(|x| x.source.clone()).collect();
        let b: HashSet<_> = second.iter().map(|x| x.source.clone()).collect();
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);
        assert!(a.is_disjoint(&b));
    }

    #[tokio::test]
    async fn test_fetch_desks_keeps_requested_order() {
        let source = NewsSource::new(MockFeed, Normalizer::default());
        let desks = [Desk::World, Desk::Technology];
        let out = source.fetch_desks(&desks, 12).await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].0, Desk::World);
        assert_eq!(out[1].0, Desk::Technology);
        assert!(!out[1].1.is_empty());
    }

    #[tokio::test]
    async fn test_load_pages_concatenates_and_dedupes() {
        let source = NewsSource::new(MockFeed, Normalizer::default());
        let page = source.load_pages("latest", 5, 1, 2).await;
        assert!(!page.fallback);
        assert_eq!(page.articles.len(), 10);

        // fallback pages repeat the same list; dedupe keeps one copy
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let feed = UpstreamFeed::new(reqwest::Client::new(), format!("http://{addr}"), "k", "popularity", 0);
        let page = NewsSource::new(feed, Normalizer::default())
            .load_pages("latest", 5, 1, 3)
            .await;
        assert!(page.fallback);
        assert_eq!(page.articles.len(), fallback_articles(Utc::now(), DatePolicy::Raw).len());
    }

    #[tokio::test]
    async fn test_load_pages_stops_at_last_page_number() {
        let source = NewsSource::new(MockFeed, Normalizer::default());
        let page = source.load_pages("latest", 5, u32::MAX, 2).await;
        assert_eq!(page.page, u32::MAX);
        assert!(!page.fallback);
        assert!(page.articles.is_empty());
    }

    #[tokio::test]
    async fn test_huge_lookback_still_fetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ten_articles()))
            .mount(&server)
            .await;

        let feed = UpstreamFeed::new(
            reqwest::Client::new(),
            server.uri(),
            "k",
            "popularity",
            100_000_000,
        );
        let page = NewsSource::new(feed, Normalizer::default())
            .fetch_page("technology", 6, 1)
            .await;
        assert!(!page.fallback);
        assert_eq!(page.articles.len(), 7);
    }

    #[test]
    fn test_dedupe_by_url() {
        let list = fallback_articles(Utc::now(), DatePolicy::Raw);
        let mut doubled = list.clone();
        doubled.extend(list.clone());
        assert_eq!(dedupe_by_url(doubled), list);
    }

    #[test]
    fn test_random_home_topic_is_known() {
        for _ in 0..20 {
            assert!(HOME_TOPICS.contains(&random_home_topic()));
        }
    }
}
