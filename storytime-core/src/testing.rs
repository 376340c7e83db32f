//! Testing utilities.
//!
//! [`ScriptedRandom`] is a [`RandomSource`] whose decisions are fixed in
//! advance, so a test can predict the exact protocol a generator will emit.

use crate::design::Version;
use crate::random::{RandomSource, ShuffleAlgorithm};

/// A random source with scripted coin flips and identity shuffles.
///
/// Coin flips are replayed from the script in order, cycling when the script
/// runs out. Every shuffle returns its input unchanged.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    flips: Vec<bool>,
    flips_drawn: usize,
    shuffles: usize,
}

impl ScriptedRandom {
    /// Replay `flips` in order, cycling. An empty script always flips `true`.
    pub fn with_flips(flips: Vec<bool>) -> Self {
        Self {
            flips,
            flips_drawn: 0,
            shuffles: 0,
        }
    }

    /// Draw version A first, then B, then A again, and so on.
    pub fn alternating() -> Self {
        Self::with_flips(vec![true, false])
    }

    /// Always draw the same version.
    pub fn constant(version: Version) -> Self {
        Self::with_flips(vec![version == Version::A])
    }

    /// Number of coin flips drawn so far.
    pub fn flips_drawn(&self) -> usize {
        self.flips_drawn
    }

    /// Number of shuffles requested so far.
    pub fn shuffles(&self) -> usize {
        self.shuffles
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, bound: usize) -> usize {
        bound.saturating_sub(1)
    }

    fn coin_flip(&mut self) -> bool {
        let flip = if self.flips.is_empty() {
            true
        } else {
            self.flips[self.flips_drawn % self.flips.len()]
        };
        self.flips_drawn += 1;
        flip
    }

    fn shuffle<T: Clone>(&mut self, items: &[T], _algorithm: ShuffleAlgorithm) -> Vec<T> {
        self.shuffles += 1;
        items.to_vec()
    }
}
