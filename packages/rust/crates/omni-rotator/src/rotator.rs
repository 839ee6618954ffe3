//! Weighted banner rotation over a [`BannerSource`].

use std::collections::HashMap;

use omni_picker::{RandomSource, WeightedPicker};
use serde::Serialize;

use crate::banner::{Banner, BannerFilter};
use crate::catalog::BannerSource;
use crate::error::RotatorError;

/// Observed vs expected display share of one banner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareReport {
    /// Banner identifier.
    pub banner: String,
    /// Configured weight.
    pub weight: u8,
    /// `weight / total weight` of the eligible set.
    pub expected: f64,
    /// Fraction of trials that chose this banner.
    pub observed: f64,
}

/// Chooses banners with probability proportional to their weight.
///
/// Eligibility (active flag, campaign scope) belongs to the source; the
/// rotator only weighs what the source returns.
pub struct BannerRotator<S> {
    source: S,
    picker: WeightedPicker,
}

impl<S: BannerSource> BannerRotator<S> {
    /// Create a rotator over `source` using `picker`.
    pub fn new(source: S, picker: WeightedPicker) -> Self {
        Self { source, picker }
    }

    /// Create a rotator with a default picker.
    pub fn with_defaults(source: S) -> Self {
        Self::new(source, WeightedPicker::default())
    }

    /// The underlying banner source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The picker in use.
    pub fn picker(&self) -> &WeightedPicker {
        &self.picker
    }

    /// Choose one eligible banner by weight.
    ///
    /// # Errors
    ///
    /// Returns [`RotatorError::NoEligibleBanners`] when nothing matches the
    /// filter, and [`RotatorError::Pick`] when every eligible banner has
    /// weight zero.
    pub fn biased_choice<R>(
        &self,
        filter: &BannerFilter,
        rng: &mut R,
    ) -> Result<Banner, RotatorError>
    where
        R: RandomSource + ?Sized,
    {
        let mut eligible = self.eligible(filter)?;
        let index = self.picker.pick_index(&weights_of(&eligible), rng)?;
        let banner = eligible.swap_remove(index);
        tracing::debug!(
            source = self.source.source_name(),
            campaign = filter.campaign.as_deref().unwrap_or("*"),
            banner = %banner.id,
            "biased choice"
        );
        Ok(banner)
    }

    /// Choose up to `count` distinct eligible banners, in draw order.
    ///
    /// `count == 0` returns an empty list without consulting the source.
    ///
    /// # Errors
    ///
    /// Same as [`BannerRotator::biased_choice`].
    pub fn biased_sample<R>(
        &self,
        count: usize,
        filter: &BannerFilter,
        rng: &mut R,
    ) -> Result<Vec<Banner>, RotatorError>
    where
        R: RandomSource + ?Sized,
    {
        if count == 0 {
            return Ok(Vec::new());
        }

        let eligible = self.eligible(filter)?;
        let indices = self
            .picker
            .sample_indices(&weights_of(&eligible), count, rng)?;
        let chosen: Vec<Banner> = indices
            .into_iter()
            .map(|index| eligible[index].clone())
            .collect();
        tracing::debug!(
            source = self.source.source_name(),
            campaign = filter.campaign.as_deref().unwrap_or("*"),
            requested = count,
            chosen = chosen.len(),
            "biased sample"
        );
        Ok(chosen)
    }

    /// Run `trials` independent choices and report each eligible banner's
    /// observed share next to its expected share.
    ///
    /// # Errors
    ///
    /// Same as [`BannerRotator::biased_choice`].
    #[allow(clippy::cast_precision_loss)]
    pub fn simulate<R>(
        &self,
        trials: usize,
        filter: &BannerFilter,
        rng: &mut R,
    ) -> Result<Vec<ShareReport>, RotatorError>
    where
        R: RandomSource + ?Sized,
    {
        let eligible = self.eligible(filter)?;
        let weights = weights_of(&eligible);
        let total: f64 = weights.iter().sum();

        let mut counts: HashMap<usize, usize> = HashMap::new();
        for _ in 0..trials {
            let index = self.picker.pick_index(&weights, rng)?;
            *counts.entry(index).or_insert(0) += 1;
        }

        let denominator = trials.max(1) as f64;
        Ok(eligible
            .into_iter()
            .enumerate()
            .map(|(index, banner)| ShareReport {
                expected: if total > 0.0 {
                    banner.selection_weight() / total
                } else {
                    0.0
                },
                observed: counts.get(&index).copied().unwrap_or(0) as f64 / denominator,
                weight: banner.weight,
                banner: banner.id,
            })
            .collect())
    }

    fn eligible(&self, filter: &BannerFilter) -> Result<Vec<Banner>, RotatorError> {
        let eligible = self.source.eligible_banners(filter)?;
        if eligible.is_empty() {
            tracing::debug!(
                source = self.source.source_name(),
                campaign = filter.campaign.as_deref().unwrap_or("*"),
                "no eligible banners"
            );
            return Err(RotatorError::NoEligibleBanners {
                campaign: filter.campaign.clone(),
            });
        }
        Ok(eligible)
    }
}

fn weights_of(banners: &[Banner]) -> Vec<f64> {
    banners.iter().map(Banner::selection_weight).collect()
}
