//! Static mock catalog used when the portal runs without a live news API.
//!
//! Entries are stored in the upstream's raw shape so they flow through the
//! same normalization as live data. Each entry is filed under a [`Desk`],
//! the editorial sections of the stories page.

use crate::models::{RawArticle, RawSource};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editorial sections of the stories page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Desk {
    Breaking,
    Technology,
    World,
    Business,
}

impl Desk {
    pub const ALL: [Desk; 4] = [Desk::Breaking, Desk::Technology, Desk::World, Desk::Business];

    pub fn id(self) -> &'static str {
        match self {
            Desk::Breaking => "breaking",
            Desk::Technology => "technology",
            Desk::World => "world",
            Desk::Business => "business",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Desk::Breaking => "Breaking News",
            Desk::Technology => "Technology",
            Desk::World => "World News",
            Desk::Business => "Business",
        }
    }

    /// Search query used when the desk is backed by a live feed.
    pub fn query(self) -> &'static str {
        match self {
            Desk::Breaking => "breaking news",
            Desk::Technology => "technology",
            Desk::World => "world news",
            Desk::Business => "business",
        }
    }

    /// The desk whose live query or id is `query`, if any.
    pub fn from_query(query: &str) -> Option<Desk> {
        let query = query.trim();
        Desk::ALL
            .into_iter()
            .find(|d| d.query().eq_ignore_ascii_case(query) || d.id().eq_ignore_ascii_case(query))
    }

    /// Bundled artwork, rotated by position within the desk.
    pub fn image(self, index: usize) -> String {
        match self {
            Desk::Technology => format!("/assets/news-tech-{}.jpg", index % 5 + 1),
            Desk::Breaking => "/assets/news-breaking-1.jpg".to_string(),
            Desk::World => "/assets/news-world-1.jpg".to_string(),
            Desk::Business => "/assets/news-business-1.jpg".to_string(),
        }
    }
}

impl fmt::Display for Desk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub desk: Desk,
    pub article: RawArticle,
}

// (desk, source id, source name, author, title, description, slug, published, content)
type Row = (
    Desk,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const ROWS: &[Row] = &[
    (
        Desk::Technology,
        "techcrunch",
        "TechCrunch",
        "Sarah Johnson",
        "Revolutionary AI Breakthrough Changes Everything We Know About Machine Learning",
        "Scientists at leading tech companies have developed a new AI architecture that could transform how machines learn and process information, marking a significant leap forward in artificial intelligence development.",
        "ai-breakthrough",
        "2025-09-18T10:00:00Z",
        "A groundbreaking development in artificial intelligence has emerged from collaborative research...",
    ),
    (
        Desk::Technology,
        "wired",
        "Wired",
        "Michael Chen",
        "Quantum Computing Reaches New Milestone with 1000-Qubit Processor",
        "The latest quantum processor promises to solve complex computational problems that would take traditional computers thousands of years to complete.",
        "quantum-milestone",
        "2025-09-18T09:30:00Z",
        "In a major leap forward for quantum computing technology...",
    ),
    (
        Desk::Technology,
        "verge",
        "The Verge",
        "Alex Rivera",
        "Apple Announces Revolutionary AR Glasses with 8K Display Technology",
        "Apple's latest augmented reality glasses feature unprecedented display quality and all-day battery life, setting new standards for wearable technology.",
        "apple-ar-glasses",
        "2025-09-18T08:45:00Z",
        "Apple has unveiled its most ambitious product yet...",
    ),
    (
        Desk::Technology,
        "ars-technica",
        "Ars Technica",
        "Dr. Lisa Park",
        "SpaceX Successfully Tests New Interplanetary Communication System",
        "The new communication technology could enable real-time conversations between Earth and Mars, revolutionizing space exploration missions.",
        "spacex-communication",
        "2025-09-18T07:20:00Z",
        "SpaceX has achieved another milestone in space technology...",
    ),
    (
        Desk::Breaking,
        "cnn",
        "CNN",
        "Breaking News Team",
        "Major Earthquake Hits Pacific Coast, Tsunami Warning Issued",
        "A 7.8 magnitude earthquake struck off the coast, prompting immediate evacuation orders for coastal communities across three countries.",
        "earthquake-tsunami-warning",
        "2025-09-18T11:30:00Z",
        "Emergency response teams are mobilizing as a major earthquake...",
    ),
    (
        Desk::Breaking,
        "bbc",
        "BBC News",
        "International Desk",
        "Historic Peace Agreement Signed After Decades of Conflict",
        "World leaders witness the signing of a comprehensive peace treaty ending one of the longest-running conflicts in modern history.",
        "historic-peace-agreement",
        "2025-09-18T10:45:00Z",
        "In a ceremony attended by heads of state from around the world...",
    ),
    (
        Desk::Breaking,
        "reuters",
        "Reuters",
        "Global News Wire",
        "Breakthrough Medical Treatment Cures Previously Incurable Cancer",
        "Clinical trials show 100% remission rate for advanced stage patients using revolutionary gene therapy approach.",
        "cancer-cure-breakthrough",
        "2025-09-18T09:20:00Z",
        "Medical researchers have announced a groundbreaking achievement...",
    ),
    (
        Desk::World,
        "bbc",
        "BBC World",
        "International Correspondent",
        "European Union Expands to Include 50 Nations in Historic Vote",
        "Massive expansion includes countries from Africa, Asia, and South America as the EU transforms into a global federation.",
        "eu-expansion-50-nations",
        "2025-09-18T11:00:00Z",
        "The European Union has voted to accept 27 new member nations...",
    ),
    (
        Desk::World,
        "guardian",
        "The Guardian",
        "Foreign Affairs Editor",
        "China and USA Merge Space Programs in Unprecedented Cooperation",
        "Historic agreement establishes joint missions to Mars, Jupiter's moons, and deep space exploration initiatives.",
        "china-usa-space-merger",
        "2025-09-18T10:20:00Z",
        "The world's two largest space agencies have announced...",
    ),
    (
        Desk::World,
        "reuters",
        "Reuters World",
        "Diplomatic Correspondent",
        "Middle East Peace Treaty Includes All Regional Powers",
        "Comprehensive agreement signed by all Middle Eastern nations establishes framework for permanent peace and cooperation.",
        "middle-east-peace-treaty",
        "2025-09-18T09:45:00Z",
        "In a ceremony in Geneva, leaders from across the Middle East...",
    ),
    (
        Desk::Business,
        "wsj",
        "Wall Street Journal",
        "Business Editor",
        "Apple Becomes World's First $10 Trillion Company",
        "Revolutionary AI and quantum computing products drive Apple's valuation to unprecedented heights in market history.",
        "apple-10-trillion-valuation",
        "2025-09-18T11:20:00Z",
        "Apple Inc. has achieved a historic milestone by reaching...",
    ),
    (
        Desk::Business,
        "bloomberg",
        "Bloomberg",
        "Finance Correspondent",
        "Bitcoin Reaches $1 Million as Global Reserve Currency",
        "Cryptocurrency achieves parity with gold reserves as central banks worldwide adopt Bitcoin for international settlements.",
        "bitcoin-1-million-reserve",
        "2025-09-18T10:35:00Z",
        "Bitcoin has crossed the historic $1 million threshold...",
    ),
    (
        Desk::Business,
        "ft",
        "Financial Times",
        "Economic Analyst",
        "Universal Basic Income Trial Eliminates Unemployment Globally",
        "Successful UBI programs in 50 countries lead to complete elimination of involuntary unemployment and poverty.",
        "ubi-eliminates-unemployment",
        "2025-09-18T09:50:00Z",
        "Economic data from the global Universal Basic Income trials...",
    ),
];

static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    let mut per_desk = std::collections::HashMap::<Desk, usize>::new();
    ROWS.iter()
        .map(
            |&(desk, id, name, author, title, description, slug, published, content)| {
                let index = per_desk.entry(desk).or_default();
                let image = desk.image(*index);
                *index += 1;
                CatalogEntry {
                    desk,
                    article: RawArticle {
                        source: Some(RawSource {
                            id: Some(id.to_string()),
                            name: Some(name.to_string()),
                        }),
                        author: Some(author.to_string()),
                        title: Some(title.to_string()),
                        description: Some(description.to_string()),
                        url: Some(format!("https://example.com/{slug}")),
                        url_to_image: Some(image),
                        published_at: Some(published.to_string()),
                        content: Some(content.to_string()),
                    },
                }
            },
        )
        .collect()
});

fn take(iter: impl Iterator<Item = RawArticle>, limit: Option<usize>) -> Vec<RawArticle> {
    match limit {
        Some(n) => iter.take(n).collect(),
        None => iter.collect(),
    }
}

/// Every catalog article, in catalog order.
pub fn all(limit: Option<usize>) -> Vec<RawArticle> {
    take(CATALOG.iter().map(|e| e.article.clone()), limit)
}

/// Articles filed under one desk.
pub fn by_desk(desk: Desk, limit: Option<usize>) -> Vec<RawArticle> {
    take(
        CATALOG
            .iter()
            .filter(|e| e.desk == desk)
            .map(|e| e.article.clone()),
        limit,
    )
}

/// Case-insensitive substring search over title, description and content.
pub fn search(query: &str, limit: Option<usize>) -> Vec<RawArticle> {
    let needle = query.to_lowercase();
    let hit = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(&needle))
    };
    take(
        CATALOG
            .iter()
            .map(|e| &e.article)
            .filter(|a| hit(&a.title) || hit(&a.description) || hit(&a.content))
            .cloned(),
        limit,
    )
}

/// A hashtag shown in the trending sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendingTopic {
    pub tag: &'static str,
    pub posts: u32,
}

pub const TRENDING: &[TrendingTopic] = &[
    TrendingTopic { tag: "ClimateAction", posts: 2847 },
    TrendingTopic { tag: "TechBreakthrough", posts: 1923 },
    TrendingTopic { tag: "DigitalPrivacy", posts: 1567 },
    TrendingTopic { tag: "GlobalEconomy", posts: 1234 },
    TrendingTopic { tag: "HealthInnovation", posts: 987 },
    TrendingTopic { tag: "SpaceExploration", posts: 756 },
    TrendingTopic { tag: "RenewableEnergy", posts: 654 },
    TrendingTopic { tag: "AIRevolution", posts: 543 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_and_limit() {
        assert_eq!(all(None).len(), ROWS.len());
        assert_eq!(all(Some(2)).len(), 2);
    }

    #[test]
    fn test_by_desk() {
        let tech = by_desk(Desk::Technology, None);
        assert_eq!(tech.len(), 4);
        assert_eq!(by_desk(Desk::World, Some(1)).len(), 1);
        assert_eq!(tech[0].url_to_image.as_deref(), Some("/assets/news-tech-1.jpg"));
        assert_eq!(tech[3].url_to_image.as_deref(), Some("/assets/news-tech-4.jpg"));
    }

    #[test]
    fn test_search_is_case_insensitive_and_checks_content() {
        let hits = search("QUANTUM", None);
        assert!(hits.len() >= 2);
        // only in the content field
        let hits = search("geneva", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url.as_deref(), Some("https://example.com/middle-east-peace-treaty"));
        assert!(search("zzz-no-such-thing", None).is_empty());
    }

    #[test]
    fn test_trending_is_ranked() {
        assert!(TRENDING.windows(2).all(|w| w[0].posts >= w[1].posts));
    }

    #[test]
    fn test_desk_metadata() {
        assert_eq!(Desk::Breaking.query(), "breaking news");
        assert_eq!(Desk::World.to_string(), "World News");
        assert_eq!(Desk::ALL.len(), 4);
        assert_eq!(Desk::from_query("World News"), Some(Desk::World));
        assert_eq!(Desk::from_query("business"), Some(Desk::Business));
        assert_eq!(Desk::from_query("politics"), None);
    }
}
