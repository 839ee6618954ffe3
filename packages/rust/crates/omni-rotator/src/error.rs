//! Error types for banner rotation.

use omni_picker::PickError;
use thiserror::Error;

/// Errors raised while loading banners or choosing among them.
#[derive(Error, Debug)]
pub enum RotatorError {
    /// The source returned no active banner for the filter.
    #[error("No eligible banners (campaign: {})", .campaign.as_deref().unwrap_or("*"))]
    NoEligibleBanners {
        /// Campaign slug the filter was scoped to, if any.
        campaign: Option<String>,
    },

    /// Weighted selection rejected the eligible banners.
    #[error("Selection failed: {0}")]
    Pick(#[from] PickError),

    /// Catalog content violates a catalog rule.
    #[error("Invalid catalog: {0}")]
    Catalog(String),

    /// Catalog text could not be parsed.
    #[error("Catalog parse error: {0}")]
    Parse(String),

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
