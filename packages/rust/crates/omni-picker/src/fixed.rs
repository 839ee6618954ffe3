//! Fixed-point weight accumulation.
//!
//! Each weight is normalized to its share of the total in `f64`, then scaled
//! to integer units out of [`SHARE_UNITS`]. Cumulative sums over the units are
//! exact, the last candidate is always reachable, and the conversion cannot
//! overflow however large or small the weights are.

use crate::error::PickError;

/// Units a share of `1.0` maps to (`2^64`).
pub(crate) const SHARE_UNITS: f64 = 18_446_744_073_709_551_616.0;

/// Resolution of a uniform `f64` draw (`2^53` steps).
const DRAW_STEPS: u128 = 1 << 53;
const DRAW_SCALE: f64 = 9_007_199_254_740_992.0;

/// Weights converted to fixed-point units, with their exact total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FixedWeights {
    pub(crate) units: Vec<u128>,
    pub(crate) total: u128,
}

impl FixedWeights {
    /// Validate `weights` and convert each one to its share in units.
    ///
    /// A positive weight keeps at least one unit. Only a weight whose share
    /// underflows to `0.0` in `f64` counts as zero.
    pub(crate) fn from_weights(weights: &[f64]) -> Result<Self, PickError> {
        if weights.is_empty() {
            return Err(PickError::EmptyCandidateSet);
        }

        let mut largest = 0.0_f64;
        for (index, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(PickError::InvalidWeight(format!(
                    "weight {weight} at index {index}"
                )));
            }
            largest = largest.max(weight);
        }
        if largest <= 0.0 {
            return Err(PickError::InvalidWeight(
                "total weight is zero; no candidate can be chosen".to_string(),
            ));
        }

        // Dividing by the largest weight first keeps the sum finite.
        let relative: Vec<f64> = weights.iter().map(|weight| weight / largest).collect();
        let sum: f64 = relative.iter().sum();

        let units: Vec<u128> = relative
            .iter()
            .map(|&value| to_units(value / sum))
            .collect();
        let total = units.iter().sum();

        Ok(Self { units, total })
    }
}

/// Scale one share in `[0, 1]` to units.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_units(share: f64) -> u128 {
    if share > 0.0 {
        ((share * SHARE_UNITS).round() as u128).max(1)
    } else {
        0
    }
}

/// Position of the first positive entry whose cumulative total reaches
/// `ceil(draw * total)`.
///
/// `total` must be the sum of `units` and greater than zero. Falls back to
/// the last positive entry when rounding pushes the target past the walk.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn locate<I>(units: I, total: u128, draw: f64) -> Option<usize>
where
    I: IntoIterator<Item = u128>,
{
    let draw = if draw.is_nan() { 0.0 } else { draw.clamp(0.0, 1.0) };
    // `total` stays below 2^75, so the product fits in u128.
    let steps = (draw * DRAW_SCALE).ceil() as u128;
    let target = (steps * total).div_ceil(DRAW_STEPS);

    let mut cumulative: u128 = 0;
    let mut last_positive = None;
    for (position, value) in units.into_iter().enumerate() {
        if value == 0 {
            continue;
        }
        cumulative += value;
        last_positive = Some(position);
        if cumulative >= target {
            return Some(position);
        }
    }
    last_positive
}
