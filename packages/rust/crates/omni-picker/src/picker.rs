//! Weighted selection by cumulative-distribution inversion.
//!
//! `P(i) = w_i / Σw`. One uniform draw `r` selects the first candidate whose
//! cumulative share reaches `r`; samples repeat this without replacement.

use crate::error::PickError;
use crate::fixed::{FixedWeights, locate};
use crate::source::RandomSource;

/// Weighted random picker.
///
/// Stateless; every call validates its own candidate set and consumes draws
/// only from the supplied source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightedPicker;

impl WeightedPicker {
    /// Create a picker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Pick one index of `weights`.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::EmptyCandidateSet`] for an empty slice and
    /// [`PickError::InvalidWeight`] for negative or non-finite weights or a
    /// zero total.
    #[allow(clippy::unused_self)]
    pub fn pick_index<S>(&self, weights: &[f64], source: &mut S) -> Result<usize, PickError>
    where
        S: RandomSource + ?Sized,
    {
        let fixed = FixedWeights::from_weights(weights)?;
        let draw = source.next_unit();
        let index = locate(fixed.units.iter().copied(), fixed.total, draw).ok_or_else(|| {
            PickError::InvalidWeight("no positive weight to select".to_string())
        })?;
        log::debug!("picked index {index} of {} (draw={draw:.6})", weights.len());
        Ok(index)
    }

    /// Draw up to `count` distinct indices of `weights` without replacement.
    ///
    /// Indices come back in draw order. `count == 0` returns an empty vector
    /// without looking at `weights`. Drawing stops early once only zero-weight
    /// entries remain.
    ///
    /// # Errors
    ///
    /// Same as [`WeightedPicker::pick_index`] when `count > 0`.
    #[allow(clippy::unused_self)]
    pub fn sample_indices<S>(
        &self,
        weights: &[f64],
        count: usize,
        source: &mut S,
    ) -> Result<Vec<usize>, PickError>
    where
        S: RandomSource + ?Sized,
    {
        if count == 0 {
            return Ok(Vec::new());
        }

        let fixed = FixedWeights::from_weights(weights)?;
        let mut remaining: Vec<(usize, u128)> = fixed.units.into_iter().enumerate().collect();
        let mut remaining_total = fixed.total;
        let draws = count.min(remaining.len());
        let mut chosen = Vec::with_capacity(draws);

        while chosen.len() < draws {
            if remaining_total == 0 {
                log::debug!(
                    "sample stopped after {} of {draws} draws: only zero weights remain",
                    chosen.len()
                );
                break;
            }
            let draw = source.next_unit();
            let Some(slot) = locate(
                remaining.iter().map(|&(_, units)| units),
                remaining_total,
                draw,
            ) else {
                break;
            };
            // Order-preserving: ties still go to the lower input index.
            let (index, units) = remaining.remove(slot);
            remaining_total -= units;
            chosen.push(index);
        }

        Ok(chosen)
    }

    /// Select one candidate from `(item, weight)` pairs.
    ///
    /// # Errors
    ///
    /// See [`WeightedPicker::pick_index`].
    pub fn select_one<'a, T, S>(
        &self,
        candidates: &'a [(T, f64)],
        source: &mut S,
    ) -> Result<&'a T, PickError>
    where
        S: RandomSource + ?Sized,
    {
        let weights = weights_of(candidates);
        let index = self.pick_index(&weights, source)?;
        Ok(&candidates[index].0)
    }

    /// Select up to `count` distinct candidates from `(item, weight)` pairs.
    ///
    /// Entries are distinct by position, so equal items supplied twice may
    /// both be returned.
    ///
    /// # Errors
    ///
    /// See [`WeightedPicker::sample_indices`].
    pub fn select_many<'a, T, S>(
        &self,
        candidates: &'a [(T, f64)],
        count: usize,
        source: &mut S,
    ) -> Result<Vec<&'a T>, PickError>
    where
        S: RandomSource + ?Sized,
    {
        let weights = weights_of(candidates);
        let indices = self.sample_indices(&weights, count, source)?;
        Ok(indices.into_iter().map(|index| &candidates[index].0).collect())
    }
}

fn weights_of<T>(candidates: &[(T, f64)]) -> Vec<f64> {
    candidates.iter().map(|(_, weight)| *weight).collect()
}

/// Select one candidate with a default picker.
///
/// # Errors
///
/// See [`WeightedPicker::select_one`].
pub fn select_one<'a, T, S>(
    candidates: &'a [(T, f64)],
    source: &mut S,
) -> Result<&'a T, PickError>
where
    S: RandomSource + ?Sized,
{
    WeightedPicker::new().select_one(candidates, source)
}

/// Select up to `count` distinct candidates with a default picker.
///
/// # Errors
///
/// See [`WeightedPicker::select_many`].
pub fn select_many<'a, T, S>(
    candidates: &'a [(T, f64)],
    count: usize,
    source: &mut S,
) -> Result<Vec<&'a T>, PickError>
where
    S: RandomSource + ?Sized,
{
    WeightedPicker::new().select_many(candidates, count, source)
}
