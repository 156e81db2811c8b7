//! The repeated-removal process.
//!
//! Start with the numbers `0..n`. Pick one uniformly at random; if it is `0`, stop
//! and report how many picks it took. Otherwise throw it away and pick again. The
//! number of picks, K(n), always lands in `1..=n`.

use tracing::trace;

use crate::error::{ExperimentError, Result};
use crate::random::RandomSource;

/// The element whose selection ends a run.
pub const TARGET: u64 = 0;

/// The live elements of one run, kept compact so removal is a swap.
#[derive(Clone, Debug)]
pub struct Population {
    live: Vec<u64>,
}

impl Population {
    pub fn new(n: u64) -> Result<Self> {
        if n < 1 {
            return Err(ExperimentError::invalid(format!(
                "population size must be at least 1, got {}",
                n
            )));
        }
        Ok(Population {
            live: (0..n).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn contains(&self, element: u64) -> bool {
        self.live.contains(&element)
    }

    /// Picks a live element uniformly, returning its slot and value.
    ///
    /// Once only the target is left the pick is forced and no randomness is used.
    pub fn draw<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<(usize, u64)> {
        let slot = if self.live.len() == 1 {
            0
        } else {
            rng.choose_index(self.live.len())?
        };
        Ok((slot, self.live[slot]))
    }

    pub fn remove(&mut self, slot: usize) -> u64 {
        self.live.swap_remove(slot)
    }
}

/// Draws one realization of K(n).
pub fn sample_k<R: RandomSource + ?Sized>(n: u64, rng: &mut R) -> Result<u64> {
    let mut population = Population::new(n)?;
    let mut draws = 0u64;
    loop {
        draws += 1;
        let (slot, element) = population.draw(rng)?;
        if element == TARGET {
            trace!(n, draws, "target drawn");
            return Ok(draws);
        }
        population.remove(slot);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::random::seeded;
    use crate::random::test::FailingRng;
    use proptest::prelude::*;

    #[test]
    fn test_population_rejects_zero() {
        assert!(matches!(
            Population::new(0),
            Err(ExperimentError::InvalidArgument(_))
        ));
        assert!(matches!(
            sample_k(0, &mut seeded(1)),
            Err(ExperimentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_removal_shrinks_by_one() {
        let mut rng = seeded(3);
        let mut population = Population::new(10).unwrap();
        while population.len() > 1 {
            let before = population.len();
            let (slot, element) = population.draw(&mut rng).unwrap();
            if element == TARGET {
                continue;
            }
            assert_eq!(population.remove(slot), element);
            assert_eq!(population.len(), before - 1);
            assert!(!population.contains(element));
        }
        assert!(population.contains(TARGET));
        assert!(!population.is_empty());
    }

    #[test]
    fn test_single_element_needs_no_randomness() {
        // FailingRng errors on every draw, so success means it was never asked
        for _ in 0..10 {
            assert_eq!(sample_k(1, &mut FailingRng).unwrap(), 1);
        }
    }

    #[test]
    fn test_randomness_failure_propagates() {
        assert!(matches!(
            sample_k(5, &mut FailingRng),
            Err(ExperimentError::Randomness(_))
        ));
    }

    #[test]
    fn test_two_elements_hits_both_outcomes() {
        let mut rng = seeded(430);
        let outcomes: Vec<u64> = (0..200).map(|_| sample_k(2, &mut rng).unwrap()).collect();
        assert!(outcomes.contains(&1));
        assert!(outcomes.contains(&2));
    }

    proptest! {
        #[test]
        fn sample_stays_within_bounds(n in 1u64..300, seed in any::<u64>()) {
            let mut rng = seeded(seed);
            let k = sample_k(n, &mut rng).unwrap();
            prop_assert!(k >= 1);
            prop_assert!(k <= n);
        }
    }
}
