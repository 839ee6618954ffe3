//! omni-picker - Weighted random selection.
//!
//! Picks one item, or a distinct sample of items, with probability
//! proportional to each item's non-negative weight:
//! - Cumulative-distribution inversion over exact fixed-point shares
//! - Sampling without replacement, renormalizing after each draw
//! - Explicit randomness: any `rand::RngCore` or a scripted source
//!
//! # Examples
//!
//! ```rust
//! use omni_picker::{ScriptedSource, WeightedPicker};
//!
//! let picker = WeightedPicker::new();
//! let banners = [("hero", 3.0), ("sidebar", 1.0)];
//!
//! // 0.8 falls past hero's 75% share.
//! let mut source = ScriptedSource::new(vec![0.8]);
//! let chosen = picker.select_one(&banners, &mut source)?;
//! assert_eq!(*chosen, "sidebar");
//! # Ok::<(), omni_picker::PickError>(())
//! ```
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let candidates = [("a", 1.0), ("b", 1.0), ("c", 1.0)];
//! let mut rng = StdRng::seed_from_u64(42);
//! let sample = omni_picker::select_many(&candidates, 2, &mut rng)?;
//! assert_eq!(sample.len(), 2);
//! # Ok::<(), omni_picker::PickError>(())
//! ```

mod error;
mod fixed;
mod picker;
mod source;

pub use error::PickError;
pub use picker::{WeightedPicker, select_many, select_one};
pub use source::{RandomSource, ScriptedSource};
