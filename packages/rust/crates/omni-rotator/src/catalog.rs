//! Banner sources: the boundary between storage and rotation.
//!
//! The rotator never queries storage itself. A [`BannerSource`] answers
//! "which banners are eligible right now" and the rotator weighs them.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::banner::{Banner, BannerFilter, Campaign, MAX_BANNER_WEIGHT, slugify};
use crate::error::RotatorError;

/// Supplies eligible banners for a filter.
pub trait BannerSource: Send + Sync {
    /// Source identifier for logs.
    fn source_name(&self) -> &'static str;

    /// Active banners matching `filter`, in a stable order.
    ///
    /// # Errors
    ///
    /// Backend-specific failures while reading banners.
    fn eligible_banners(&self, filter: &BannerFilter) -> Result<Vec<Banner>, RotatorError>;
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    campaigns: Vec<CampaignEntry>,
}

#[derive(Debug, Deserialize)]
struct CampaignEntry {
    name: String,
    slug: Option<String>,
    #[serde(default)]
    banners: Vec<BannerEntry>,
}

#[derive(Debug, Deserialize)]
struct BannerEntry {
    id: String,
    name: String,
    url: String,
    weight: u8,
    #[serde(default = "default_active")]
    is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// In-memory banner catalog loaded from YAML or JSON.
#[derive(Debug, Clone, Default)]
pub struct BannerCatalog {
    campaigns: Vec<Campaign>,
    banners: Vec<Banner>,
}

impl BannerCatalog {
    /// Build a catalog from already-constructed records.
    ///
    /// # Errors
    ///
    /// Returns [`RotatorError::Catalog`] when a weight exceeds 10, a banner id
    /// or campaign slug repeats, a slug is empty, or a banner points at an
    /// unknown campaign.
    pub fn new(campaigns: Vec<Campaign>, banners: Vec<Banner>) -> Result<Self, RotatorError> {
        validate(&campaigns, &banners)?;
        Ok(Self { campaigns, banners })
    }

    /// Parse a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RotatorError::Parse`] for malformed YAML and
    /// [`RotatorError::Catalog`] for rule violations.
    pub fn from_yaml_str(raw: &str) -> Result<Self, RotatorError> {
        let file: CatalogFile =
            serde_yaml::from_str(raw).map_err(|e| RotatorError::Parse(e.to_string()))?;
        Self::from_file(file)
    }

    /// Parse a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RotatorError::Parse`] for malformed JSON and
    /// [`RotatorError::Catalog`] for rule violations.
    pub fn from_json_str(raw: &str) -> Result<Self, RotatorError> {
        let file: CatalogFile =
            serde_json::from_str(raw).map_err(|e| RotatorError::Parse(e.to_string()))?;
        Self::from_file(file)
    }

    /// Load a catalog file; `.json` is parsed as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`RotatorError::Io`] if the file cannot be read, otherwise the
    /// errors of the matching parser.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RotatorError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json_str(&raw)?
        } else {
            Self::from_yaml_str(&raw)?
        };
        tracing::info!(
            path = %path.display(),
            campaigns = catalog.campaigns.len(),
            banners = catalog.banners.len(),
            "loaded banner catalog"
        );
        Ok(catalog)
    }

    fn from_file(file: CatalogFile) -> Result<Self, RotatorError> {
        let mut campaigns = Vec::with_capacity(file.campaigns.len());
        let mut banners = Vec::new();
        for entry in file.campaigns {
            let slug = entry
                .slug
                .map(|slug| slug.trim().to_string())
                .filter(|slug| !slug.is_empty())
                .unwrap_or_else(|| slugify(&entry.name));
            banners.extend(entry.banners.into_iter().map(|banner| Banner {
                id: banner.id,
                campaign: slug.clone(),
                name: banner.name,
                url: banner.url,
                weight: banner.weight,
                is_active: banner.is_active,
            }));
            campaigns.push(Campaign {
                name: entry.name,
                slug,
            });
        }
        Self::new(campaigns, banners)
    }

    /// All campaigns in catalog order.
    #[must_use]
    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// All banners in catalog order, active or not.
    #[must_use]
    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    /// Look up a banner by id.
    #[must_use]
    pub fn banner(&self, id: &str) -> Option<&Banner> {
        self.banners.iter().find(|banner| banner.id == id)
    }

    /// Number of banners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.banners.len()
    }

    /// Check if the catalog has no banners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}

fn validate(campaigns: &[Campaign], banners: &[Banner]) -> Result<(), RotatorError> {
    let mut slugs = HashSet::new();
    for campaign in campaigns {
        if campaign.slug.is_empty() {
            return Err(RotatorError::Catalog(format!(
                "campaign '{}' has an empty slug",
                campaign.name
            )));
        }
        if !slugs.insert(campaign.slug.as_str()) {
            return Err(RotatorError::Catalog(format!(
                "duplicate campaign slug '{}'",
                campaign.slug
            )));
        }
    }

    let mut ids = HashSet::new();
    for banner in banners {
        if banner.weight > MAX_BANNER_WEIGHT {
            return Err(RotatorError::Catalog(format!(
                "banner '{}' weight {} exceeds {MAX_BANNER_WEIGHT}",
                banner.id, banner.weight
            )));
        }
        if !slugs.contains(banner.campaign.as_str()) {
            return Err(RotatorError::Catalog(format!(
                "banner '{}' references unknown campaign '{}'",
                banner.id, banner.campaign
            )));
        }
        if !ids.insert(banner.id.as_str()) {
            return Err(RotatorError::Catalog(format!(
                "duplicate banner id '{}'",
                banner.id
            )));
        }
    }

    Ok(())
}

impl BannerSource for BannerCatalog {
    fn source_name(&self) -> &'static str {
        "catalog"
    }

    fn eligible_banners(&self, filter: &BannerFilter) -> Result<Vec<Banner>, RotatorError> {
        Ok(self
            .banners
            .iter()
            .filter(|banner| filter.matches(banner))
            .cloned()
            .collect())
    }
}
