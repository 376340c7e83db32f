//! Randomization primitives.
//!
//! All randomness in protocol generation flows through [`RandomSource`], so a
//! caller can inject a seeded generator (or a scripted one, see
//! [`crate::testing::ScriptedRandom`]) and get reproducible protocols.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Which permutation algorithm [`RandomSource::shuffle`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShuffleAlgorithm {
    /// Fisher-Yates with the swap partner drawn from `0..=i`. Every
    /// permutation is equally likely.
    #[default]
    FisherYates,
    /// Swap partner drawn from `0..i`. This only ever produces cyclic
    /// permutations (no element keeps its position); kept to reproduce
    /// orderings from sessions collected with the earlier generator.
    Legacy,
}

impl ShuffleAlgorithm {
    pub fn parse(s: &str) -> Option<ShuffleAlgorithm> {
        match s.trim().to_lowercase().as_str() {
            "fisher-yates" | "fisher_yates" | "fisheryates" | "uniform" => {
                Some(ShuffleAlgorithm::FisherYates)
            }
            "legacy" | "sattolo" => Some(ShuffleAlgorithm::Legacy),
            _ => None,
        }
    }
}

/// Source of the random decisions made during generation.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. Callers never pass zero.
    fn below(&mut self, bound: usize) -> usize;

    /// One of two outcomes, uniformly.
    fn coin_flip(&mut self) -> bool;

    /// Return a permuted copy of `items`; the input is left untouched.
    fn shuffle<T: Clone>(&mut self, items: &[T], algorithm: ShuffleAlgorithm) -> Vec<T> {
        let mut shuffled = items.to_vec();
        for i in (1..shuffled.len()).rev() {
            let j = match algorithm {
                ShuffleAlgorithm::FisherYates => self.below(i + 1),
                ShuffleAlgorithm::Legacy => self.below(i),
            };
            shuffled.swap(i, j);
        }
        shuffled
    }
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = ThreadRng> {
    rng: R,
}

impl RngSource<ThreadRng> {
    /// Process-wide thread-local generator.
    pub fn thread() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl RngSource<StdRng> {
    /// Deterministic generator, for reproducible protocols and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn below(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = RngSource::seeded(7);
        let items: Vec<u32> = (0..20).collect();
        for _ in 0..50 {
            let mut shuffled = rng.shuffle(&items, ShuffleAlgorithm::FisherYates);
            assert_eq!(shuffled.len(), items.len());
            shuffled.sort();
            assert_eq!(shuffled, items);
        }
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let mut rng = RngSource::seeded(1);
        let items = vec!["a", "b", "c", "d"];
        let _ = rng.shuffle(&items, ShuffleAlgorithm::FisherYates);
        assert_eq!(items, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_shuffle_short_inputs() {
        let mut rng = RngSource::seeded(3);
        let empty: Vec<u8> = Vec::new();
        assert!(rng.shuffle(&empty, ShuffleAlgorithm::FisherYates).is_empty());
        assert_eq!(rng.shuffle(&[9], ShuffleAlgorithm::FisherYates), vec![9]);
        assert_eq!(rng.shuffle(&[9], ShuffleAlgorithm::Legacy), vec![9]);
    }

    #[test]
    fn test_fisher_yates_positions_are_uniform() {
        const TRIALS: usize = 40_000;
        let mut rng = RngSource::seeded(2021);
        let items = [0usize, 1, 2, 3];
        let mut counts = [[0usize; 4]; 4];

        for _ in 0..TRIALS {
            let shuffled = rng.shuffle(&items, ShuffleAlgorithm::FisherYates);
            for (position, &element) in shuffled.iter().enumerate() {
                counts[element][position] += 1;
            }
        }

        let expected = TRIALS / 4;
        for row in counts {
            for count in row {
                let deviation = (count as f64 - expected as f64).abs() / expected as f64;
                assert!(deviation < 0.05, "count {count} too far from {expected}");
            }
        }
    }

    #[test]
    fn test_fisher_yates_can_keep_identity() {
        let mut rng = RngSource::seeded(11);
        let items = [0u8, 1, 2];
        let identity_seen =
            (0..1000).any(|_| rng.shuffle(&items, ShuffleAlgorithm::FisherYates) == items);
        assert!(identity_seen);
    }

    #[test]
    fn test_legacy_shuffle_never_fixes_an_element() {
        let mut rng = RngSource::seeded(5);
        let items: Vec<usize> = (0..6).collect();
        for _ in 0..500 {
            let shuffled = rng.shuffle(&items, ShuffleAlgorithm::Legacy);
            assert!(shuffled.iter().enumerate().all(|(i, &x)| i != x));
        }
    }

    #[test]
    fn test_coin_flip_is_roughly_fair() {
        let mut rng = RngSource::seeded(99);
        let heads = (0..10_000).filter(|_| rng.coin_flip()).count();
        assert!((4_700..=5_300).contains(&heads), "heads = {heads}");
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!(
            ShuffleAlgorithm::parse("Fisher-Yates"),
            Some(ShuffleAlgorithm::FisherYates)
        );
        assert_eq!(ShuffleAlgorithm::parse("legacy"), Some(ShuffleAlgorithm::Legacy));
        assert_eq!(ShuffleAlgorithm::parse("bogus"), None);
    }
}
