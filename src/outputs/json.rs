//! JSON snapshots of fetched pages.
//!
//! Files are grouped by the UTC date of the fetch and named after the query:
//! `{json_output_dir}/{date}/{query-slug}.json`. Later pages of the same
//! query get a `-p{N}` suffix.

use crate::models::FeedPage;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Convert a query to a file-name-safe slug.
///
/// ```ignore
/// assert_eq!(slugify("Breaking News!"), "breaking-news");
/// ```
pub fn slugify(query: &str) -> String {
    let slug = query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "latest".to_string()
    } else {
        slug
    }
}

/// Path a page will be written to under `json_output_dir`.
pub fn feed_path(page: &FeedPage, json_output_dir: &Path) -> PathBuf {
    let date = DateTime::parse_from_rfc3339(&page.fetched_at)
        .map(|d| d.with_timezone(&Utc).date_naive())
        .unwrap_or_else(|_| Utc::now().date_naive());
    let name = if page.page > 1 {
        format!("{}-p{}.json", slugify(&page.query), page.page)
    } else {
        format!("{}.json", slugify(&page.query))
    };
    json_output_dir.join(date.to_string()).join(name)
}

/// Write a [`FeedPage`] as pretty JSON, creating the date directory.
///
/// Returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_feed(
    page: &FeedPage,
    json_output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(page)?;
    let path = feed_path(page, json_output_dir);

    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = page.articles.len(), "Wrote feed JSON");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_articles;
    use crate::normalize::DatePolicy;

    fn page(query: &str, n: u32) -> FeedPage {
        FeedPage {
            query: query.to_string(),
            page: n,
            page_size: 20,
            fallback: true,
            fetched_at: "2025-09-18T10:00:00+00:00".to_string(),
            articles: fallback_articles(Utc::now(), DatePolicy::Raw),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Breaking News!"), "breaking-news");
        assert_eq!(slugify("  climate & energy "), "climate-energy");
        assert_eq!(slugify("???"), "latest");
    }

    #[test]
    fn test_feed_path() {
        let root = Path::new("/out");
        assert_eq!(
            feed_path(&page("world news", 1), root),
            PathBuf::from("/out/2025-09-18/world-news.json")
        );
        assert_eq!(
            feed_path(&page("world news", 3), root),
            PathBuf::from("/out/2025-09-18/world-news-p3.json")
        );
    }

    #[tokio::test]
    async fn test_write_feed_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let original = page("technology", 1);
        let path = write_feed(&original, dir.path()).await.unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        let back: FeedPage = serde_json::from_str(&text).unwrap();
        assert_eq!(back.articles, original.articles);
        assert!(back.fallback);
    }
}
