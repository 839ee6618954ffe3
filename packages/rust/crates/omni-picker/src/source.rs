//! Sources of uniform draws in `[0, 1)`.

use rand::RngCore;
use rand::distributions::{Distribution, Standard};

/// A source of uniform random numbers in `[0, 1)`.
///
/// Every [`rand::RngCore`] is a `RandomSource`, so callers can pass
/// `rand::thread_rng()`, a seeded `StdRng`, or a boxed generator directly.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        Distribution::<f64>::sample(&Standard, self)
    }
}

/// Replays a fixed list of draws, cycling back to the start when exhausted.
///
/// An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
    consumed: usize,
}

impl ScriptedSource {
    /// Create a source replaying `draws` in order.
    #[must_use]
    pub fn new(draws: Vec<f64>) -> Self {
        Self {
            draws,
            cursor: 0,
            consumed: 0,
        }
    }

    /// Number of draws handed out so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        self.consumed += 1;
        let Some(&draw) = self.draws.get(self.cursor) else {
            return 0.0;
        };
        self.cursor = (self.cursor + 1) % self.draws.len();
        draw
    }
}
