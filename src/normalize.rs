//! Raw article -> [`NormalizedArticle`] mapping.
//!
//! Two knobs control the output:
//! - [`Completeness`]: how strict the "is this record usable" filter is
//! - [`DatePolicy`]: whether `publishedAt` stays raw or is pre-formatted
//!
//! Whatever the policy, a record with neither title nor description is
//! dropped, and records the upstream tombstoned as `"[Removed]"` are dropped.

use crate::category::categorize;
use crate::models::{NormalizedArticle, RawArticle, VerificationStatus};
use crate::utils::format_relative;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled Article";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const UNKNOWN_SOURCE: &str = "Unknown Source";
const REMOVED: &str = "[Removed]";

/// Which raw records survive normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Completeness {
    /// Title and description must both be present.
    #[default]
    RequireBoth,
    /// Only the title is required; the description is defaulted.
    RequireTitle,
    /// Either field is enough; the missing one is defaulted.
    Lenient,
}

/// How `publishedAt` is written into the normalized article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DatePolicy {
    /// Keep the upstream timestamp; format at render time.
    #[default]
    Raw,
    /// Replace it with a relative label ("5 hours ago").
    Relative,
}

/// Normalization settings, owned by each `NewsSource`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    pub completeness: Completeness,
    pub dates: DatePolicy,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Normalizer {
    pub fn new(completeness: Completeness, dates: DatePolicy) -> Self {
        Self {
            completeness,
            dates,
        }
    }

    /// Whether a raw record passes the completeness filter.
    pub fn accepts(&self, raw: &RawArticle) -> bool {
        let title = present(&raw.title);
        let description = present(&raw.description);

        if title == Some(REMOVED) || description == Some(REMOVED) {
            return false;
        }

        match self.completeness {
            Completeness::RequireBoth => title.is_some() && description.is_some(),
            Completeness::RequireTitle => title.is_some(),
            Completeness::Lenient => title.is_some() || description.is_some(),
        }
    }

    /// Map one raw record, defaulting missing fields.
    pub fn normalize_one(&self, raw: &RawArticle, now: DateTime<Utc>) -> NormalizedArticle {
        let title = present(&raw.title).unwrap_or(UNTITLED);
        let description = present(&raw.description).unwrap_or(NO_DESCRIPTION);
        // Categorize on what the upstream actually sent, not on placeholders.
        let category = categorize(
            present(&raw.title).unwrap_or_default(),
            present(&raw.description).unwrap_or_default(),
        );

        let published_at = raw.published_at.clone().unwrap_or_default();
        let published_at = match self.dates {
            DatePolicy::Raw => published_at,
            DatePolicy::Relative => format_relative(&published_at, now),
        };

        NormalizedArticle {
            title: title.to_string(),
            description: description.to_string(),
            image: present(&raw.url_to_image).map(str::to_string),
            category,
            source: raw.url.clone().unwrap_or_default(),
            source_name: raw.source_name().unwrap_or(UNKNOWN_SOURCE).to_string(),
            is_crowdsourced: false,
            verification_status: VerificationStatus::Verified,
            published_at,
        }
    }

    /// Filter and map a page of raw records. The input is only borrowed.
    pub fn normalize(&self, raw: &[RawArticle], now: DateTime<Utc>) -> Vec<NormalizedArticle> {
        raw.iter()
            .filter(|a| self.accepts(a))
            .map(|a| self.normalize_one(a, now))
            .collect()
    }
}
