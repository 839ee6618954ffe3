//! Banner and campaign records.

use serde::{Deserialize, Serialize};

/// Highest banner weight. A ten displays ten times more often than a one.
pub const MAX_BANNER_WEIGHT: u8 = 10;

/// A named group of banners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Display name.
    pub name: String,
    /// URL-safe identifier, derived from `name` when not given.
    pub slug: String,
}

impl Campaign {
    /// Build a campaign with a slug derived from `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self { name, slug }
    }
}

/// One rotatable banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    /// Unique banner identifier.
    pub id: String,
    /// Slug of the owning campaign.
    pub campaign: String,
    /// Display name.
    pub name: String,
    /// Click-through target.
    pub url: String,
    /// Relative display weight in `0..=10`; zero never displays.
    pub weight: u8,
    /// Inactive banners are never eligible.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl Banner {
    /// Weight as the picker's real-valued weight.
    #[must_use]
    pub fn selection_weight(&self) -> f64 {
        f64::from(self.weight)
    }
}

/// Eligibility filter passed to a [`BannerSource`](crate::BannerSource).
///
/// Only active banners are ever eligible; there is no switch to include
/// inactive ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerFilter {
    /// Restrict to one campaign slug.
    pub campaign: Option<String>,
}

impl BannerFilter {
    /// Every active banner.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Active banners of one campaign.
    #[must_use]
    pub fn campaign(slug: impl Into<String>) -> Self {
        Self {
            campaign: Some(slug.into()),
        }
    }

    /// Whether `banner` passes this filter.
    #[must_use]
    pub fn matches(&self, banner: &Banner) -> bool {
        banner.is_active
            && self
                .campaign
                .as_deref()
                .is_none_or(|slug| banner.campaign == slug)
    }
}

/// Lower-case ASCII slug: alphanumeric runs joined by single dashes.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
