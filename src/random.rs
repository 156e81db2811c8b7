//! Randomness sources for the experiments.
//!
//! Every experiment takes its generator as an argument instead of reaching for a
//! global one, so a fixed seed reproduces a run exactly.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::Result;

/// A source that can pick an index uniformly from `0..len`, and may fail doing so.
pub trait RandomSource {
    fn choose_index(&mut self, len: usize) -> Result<usize>;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn choose_index(&mut self, len: usize) -> Result<usize> {
        debug_assert!(len > 0);
        let range = len as u64;
        // largest accepted draw
        let zone = u64::MAX - (u64::MAX - range + 1) % range;
        loop {
            let mut buf = [0u8; 8];
            self.try_fill_bytes(&mut buf)?;
            let v = u64::from_le_bytes(buf);
            if v <= zone {
                return Ok((v % range) as usize);
            }
        }
    }
}

/// Seeded generator used when a run is driven by a single stream.
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Independent stream for trial `trial` of a run seeded with `seed`.
///
/// Trials never share a generator, so the outcome of trial `i` does not depend on
/// which thread ran it or in what order.
pub fn trial_rng(seed: u64, trial: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial);
    rng
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::error::ExperimentError;

    /// Generator whose every draw fails.
    pub(crate) struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.iter_mut().for_each(|b| *b = 0);
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new("entropy source exhausted"))
        }
    }

    #[test]
    fn test_choose_index_in_range() {
        let mut rng = seeded(7);
        for len in 1..50 {
            for _ in 0..100 {
                let i = rng.choose_index(len).unwrap();
                assert!(i < len);
            }
        }
    }

    #[test]
    fn test_choose_index_covers_every_slot() {
        let mut rng = seeded(11);
        let mut seen = [false; 6];
        for _ in 0..1000 {
            seen[rng.choose_index(6).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_failure_propagates() {
        let result = FailingRng.choose_index(3);
        assert!(matches!(result, Err(ExperimentError::Randomness(_))));
    }

    /// Generator that replays fixed `u64` words.
    struct ScriptedRng(Vec<u64>);

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0.remove(0)
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let word = self.next_u64().to_le_bytes();
            dest.copy_from_slice(&word[..dest.len()]);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_choose_index_rejects_the_biased_tail() {
        // 2^64 % 3 == 1, so only u64::MAX lies past the accepted zone for len 3
        let mut rng = ScriptedRng(vec![u64::MAX, u64::MAX - 1, 4]);
        assert_eq!(rng.choose_index(3).unwrap(), ((u64::MAX - 1) % 3) as usize);
        assert_eq!(rng.choose_index(3).unwrap(), 1);
        assert!(rng.0.is_empty());

        let mut rng = ScriptedRng(vec![u64::MAX]);
        assert_eq!(rng.choose_index(1).unwrap(), 0);
    }

    #[test]
    fn test_trial_streams_differ() {
        let a: Vec<u64> = (0..4).map(|_| trial_rng(430, 0).next_u64()).collect();
        let b = trial_rng(430, 1).next_u64();
        assert!(a.iter().all(|v| *v == a[0]));
        assert_ne!(a[0], b);
    }
}
