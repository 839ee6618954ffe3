//! omni-rotator - Weighted banner rotation.
//!
//! Sits between a banner store and the `omni-picker` core:
//! - [`BannerSource`] answers which banners are eligible (active, campaign)
//! - [`BannerRotator`] weighs them and picks one or a distinct sample
//! - [`BannerCatalog`] is an in-memory source loaded from YAML or JSON
//!
//! # Examples
//!
//! ```rust
//! use omni_picker::ScriptedSource;
//! use omni_rotator::{BannerCatalog, BannerFilter, BannerRotator};
//!
//! let catalog = BannerCatalog::from_yaml_str(
//!     r#"
//! campaigns:
//!   - name: Spring Sale
//!     banners:
//!       - { id: hero, name: Hero, url: "https://example.com/a", weight: 3 }
//!       - { id: side, name: Side, url: "https://example.com/b", weight: 1 }
//! "#,
//! )?;
//! let rotator = BannerRotator::with_defaults(catalog);
//!
//! let mut source = ScriptedSource::new(vec![0.5]);
//! let banner = rotator.biased_choice(&BannerFilter::campaign("spring-sale"), &mut source)?;
//! assert_eq!(banner.id, "hero");
//! # Ok::<(), omni_rotator::RotatorError>(())
//! ```

mod banner;
mod catalog;
mod error;
mod rotator;
mod settings;

pub use banner::{Banner, BannerFilter, Campaign, MAX_BANNER_WEIGHT, slugify};
pub use catalog::{BannerCatalog, BannerSource};
pub use error::RotatorError;
pub use rotator::{BannerRotator, ShareReport};
pub use settings::{
    RotationSettings, RotatorSettings, load_rotator_settings,
    load_rotator_settings_from_paths, rotator_settings_paths, set_config_home_override,
};
