//! The fixed article list served when live data cannot be obtained.
//!
//! Content is hard-coded; only the timestamps move, so the list always reads
//! as "a few hours old" no matter when it is served.

use crate::category::Category;
use crate::models::{NormalizedArticle, VerificationStatus};
use crate::normalize::DatePolicy;
use crate::utils::format_relative;
use chrono::{DateTime, Duration, Utc};

/// Identifier prefix for fallback entries; they have no real URL.
pub const FALLBACK_SOURCE: &str = "api-fallback";

struct Entry {
    title: &'static str,
    description: &'static str,
    image: &'static str,
    category: Category,
    source_name: &'static str,
    status: VerificationStatus,
    hours_old: i64,
}

const ENTRIES: &[Entry] = &[
    Entry {
        title: "Apple Announces Revolutionary M4 Pro Chip with 50% Performance Boost",
        description: "Apple's latest silicon breakthrough delivers unprecedented performance for professional workflows while maintaining industry-leading power efficiency.",
        image: "https://images.unsplash.com/photo-1611532736597-de2d4265fba3?w=600&h=400&fit=crop",
        category: Category::Technology,
        source_name: "TechCrunch",
        status: VerificationStatus::Verified,
        hours_old: 2,
    },
    Entry {
        title: "Breaking: Apple Vision Pro 2 Leaked Specs Reveal Major Display Upgrade",
        description: "Next-generation mixed reality headset reportedly features 8K displays and improved field of view, setting new standards for immersive computing.",
        image: "https://images.unsplash.com/photo-1593508512255-86ab42a8e620?w=600&h=400&fit=crop",
        category: Category::Technology,
        source_name: "The Verge",
        status: VerificationStatus::UnderVerification,
        hours_old: 4,
    },
    Entry {
        title: "Apple Shares Hit Record High Following iPhone 16 Sales Report",
        description: "Strong consumer demand for Apple's latest iPhone lineup drives stock to new all-time highs, exceeding analyst expectations by 15%.",
        image: "https://images.unsplash.com/photo-1611532736597-de2d4265fba3?w=600&h=400&fit=crop",
        category: Category::Economy,
        source_name: "CNBC",
        status: VerificationStatus::Verified,
        hours_old: 6,
    },
    Entry {
        title: "Apple Park Expands with New Research Facility for Health Technologies",
        description: "Tech giant invests $2 billion in dedicated health research campus, focusing on non-invasive monitoring and AI-powered diagnostics.",
        image: "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=600&h=400&fit=crop",
        category: Category::Health,
        source_name: "Bloomberg",
        status: VerificationStatus::Verified,
        hours_old: 8,
    },
    Entry {
        title: "Apple's New AI Features Transform iPad Pro into Creative Powerhouse",
        description: "Latest iPadOS update introduces advanced AI-powered design tools that rival professional desktop applications for digital artists.",
        image: "https://images.unsplash.com/photo-1561154464-82e9adf32764?w=600&h=400&fit=crop",
        category: Category::Technology,
        source_name: "Wired",
        status: VerificationStatus::Verified,
        hours_old: 10,
    },
    Entry {
        title: "Apple Watch Series 10 Introduces Revolutionary Health Monitoring",
        description: "New wearable device can detect early signs of diabetes and heart conditions, potentially saving millions of lives through preventive care.",
        image: "https://images.unsplash.com/photo-1434494878577-86c23bcb06b9?w=600&h=400&fit=crop",
        category: Category::Health,
        source_name: "Reuters",
        status: VerificationStatus::Verified,
        hours_old: 12,
    },
    Entry {
        title: "Apple Store Workers Vote to Unionize in Major Labor Victory",
        description: "Retail employees at flagship Manhattan location successfully organize union, marking significant shift in tech industry labor relations.",
        image: "https://images.unsplash.com/photo-1441986300917-64674bd600d8?w=600&h=400&fit=crop",
        category: Category::Economy,
        source_name: "Wall Street Journal",
        status: VerificationStatus::Verified,
        hours_old: 14,
    },
    Entry {
        title: "Apple's Environmental Initiative Achieves Carbon Neutral Manufacturing",
        description: "Company reaches major sustainability milestone ahead of schedule, eliminating carbon emissions from entire production process.",
        image: "https://images.unsplash.com/photo-1569163139394-de44cb5894be?w=600&h=400&fit=crop",
        category: Category::Environment,
        source_name: "Environmental News Network",
        status: VerificationStatus::Verified,
        hours_old: 16,
    },
    Entry {
        title: "Apple Arcade Launches Exclusive AAA Gaming Platform",
        description: "Premium gaming service introduces console-quality titles designed specifically for Apple devices, challenging traditional gaming platforms.",
        image: "https://images.unsplash.com/photo-1511512578047-dfb367046420?w=600&h=400&fit=crop",
        category: Category::Entertainment,
        source_name: "IGN",
        status: VerificationStatus::Verified,
        hours_old: 18,
    },
];

/// Build the fallback list as of `now`.
pub fn fallback_articles(now: DateTime<Utc>, dates: DatePolicy) -> Vec<NormalizedArticle> {
    ENTRIES
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let stamp = (now - Duration::hours(e.hours_old)).to_rfc3339();
            let published_at = match dates {
                DatePolicy::Raw => stamp,
                DatePolicy::Relative => format_relative(&stamp, now),
            };
            NormalizedArticle {
                title: e.title.to_string(),
                description: e.description.to_string(),
                image: Some(e.image.to_string()),
                category: e.category,
                source: format!("{FALLBACK_SOURCE}/{}", i + 1),
                source_name: e.source_name.to_string(),
                is_crowdsourced: false,
                verification_status: e.status,
                published_at,
            }
        })
        .collect()
}
