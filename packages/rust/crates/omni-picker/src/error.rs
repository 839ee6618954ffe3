//! Error types for weighted selection.
//!
//! Library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Errors returned by [`WeightedPicker`](crate::WeightedPicker) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickError {
    /// No candidates were supplied.
    #[error("Candidate set is empty")]
    EmptyCandidateSet,

    /// A weight is negative or non-finite, or the weights cannot produce a pick.
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),
}

impl PickError {
    /// True for [`PickError::EmptyCandidateSet`].
    #[must_use]
    pub const fn is_empty_set(&self) -> bool {
        matches!(self, Self::EmptyCandidateSet)
    }

    /// True for [`PickError::InvalidWeight`].
    #[must_use]
    pub const fn is_invalid_weight(&self) -> bool {
        matches!(self, Self::InvalidWeight(_))
    }
}
