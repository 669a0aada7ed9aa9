//! Keyword-based topic classification.
//!
//! Categories are not mutually exclusive by keyword, so rules are checked in
//! a fixed priority order and the first hit wins:
//!
//! | Priority | Category | Keywords |
//! |----------|----------|----------|
//! | 1 | Technology | tech, ai, app, digital, software |
//! | 2 | Health | health, medical, doctor, disease |
//! | 3 | Sports | sport, game, player, team |
//! | 4 | Economy | business, economy, market, financial |
//! | 5 | Environment | climate, environment, green, energy |
//! | 6 | Entertainment | entertainment, movie, music, celebrity |
//! | - | General | (no match) |
//!
//! Matching is a plain substring test on the lower-cased `title + " " + description`,
//! so short keywords such as `ai` also hit inside longer words.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed label set an article can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Category {
    Technology,
    Health,
    Sports,
    Economy,
    Environment,
    Entertainment,
    General,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Health => "Health",
            Category::Sports => "Sports",
            Category::Economy => "Economy",
            Category::Environment => "Environment",
            Category::Entertainment => "Entertainment",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct Rule {
    category: Category,
    keywords: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        category: Category::Technology,
        keywords: &["tech", "ai", "app", "digital", "software"],
    },
    Rule {
        category: Category::Health,
        keywords: &["health", "medical", "doctor", "disease"],
    },
    Rule {
        category: Category::Sports,
        keywords: &["sport", "game", "player", "team"],
    },
    Rule {
        category: Category::Economy,
        keywords: &["business", "economy", "market", "financial"],
    },
    Rule {
        category: Category::Environment,
        keywords: &["climate", "environment", "green", "energy"],
    },
    Rule {
        category: Category::Entertainment,
        keywords: &["entertainment", "movie", "music", "celebrity"],
    },
];

/// Infer the category of an article from its title and description.
pub fn categorize(title: &str, description: &str) -> Category {
    let content = format!("{title} {description}").to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| content.contains(kw)))
        .map(|rule| rule.category)
        .unwrap_or(Category::General)
}
