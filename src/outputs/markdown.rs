//! Markdown rendering of feed pages.
//!
//! Publication times are formatted here, at render time, from whatever the
//! article carries: raw timestamps become relative labels, pre-formatted
//! labels pass through untouched.

use crate::catalog::{Desk, TrendingTopic};
use crate::models::{FeedPage, NormalizedArticle, VerificationStatus};
use crate::utils::{format_compact, format_relative};
use chrono::{DateTime, Utc};

fn status_badge(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Verified => "✅ Verified",
        VerificationStatus::UnderVerification => "🕵 Under verification",
        VerificationStatus::Unverified => "⚠ Unverified",
    }
}

fn link(article: &NormalizedArticle) -> String {
    if article.source.starts_with("http") {
        format!("[{}]({})", article.title, article.source)
    } else {
        article.title.clone()
    }
}

fn article_to_markdown(article: &NormalizedArticle, now: DateTime<Utc>) -> String {
    let mut md = String::new();
    md.push_str(&format!("### {}\n\n", link(article)));
    md.push_str(&format!(
        "*{}* · {} · {} · {}\n\n",
        article.category,
        article.source_name,
        format_relative(&article.published_at, now),
        status_badge(article.verification_status)
    ));
    if let Some(image) = &article.image {
        md.push_str(&format!("![]({image})\n\n"));
    }
    md.push_str(&article.description);
    md.push_str("\n\n");
    md
}

/// Render one page as a Markdown document.
pub fn feed_to_markdown(page: &FeedPage, now: DateTime<Utc>) -> String {
    let mut md = format!("# {} (page {})\n\n", page.query, page.page);
    if page.fallback {
        md.push_str("> Live news is unavailable right now; showing saved stories.\n\n");
    }
    if page.articles.is_empty() {
        md.push_str("No news available right now.\n");
        return md;
    }
    for article in &page.articles {
        md.push_str(&article_to_markdown(article, now));
    }
    md
}

/// Render a stories page: each desk's lead story, then the rest as a list.
pub fn desks_to_markdown(desks: &[(Desk, Vec<NormalizedArticle>)], now: DateTime<Utc>) -> String {
    let mut md = String::from("# Stories\n\n");
    for (desk, articles) in desks {
        md.push_str(&format!("## {desk}\n\n"));
        let Some((lead, rest)) = articles.split_first() else {
            md.push_str("No stories available in this category at the moment.\n\n");
            continue;
        };
        md.push_str(&article_to_markdown(lead, now));
        for article in rest {
            md.push_str(&format!(
                "- {} ({}, {})\n",
                link(article),
                article.source_name,
                format_compact(&article.published_at, now)
            ));
        }
        md.push('\n');
    }
    md
}

/// Render the trending sidebar as a ranked list.
pub fn trending_to_markdown(topics: &[TrendingTopic]) -> String {
    let mut md = String::from("## Trending Topics\n\n");
    for (i, topic) in topics.iter().enumerate() {
        md.push_str(&format!("{}. #{} ({} posts)\n", i + 1, topic.tag, topic.posts));
    }
    md
}
