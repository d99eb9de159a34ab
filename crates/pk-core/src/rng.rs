//! The simulation's single deterministic RNG.
//!
//! # Determinism strategy
//!
//! Unlike population frameworks that hand each agent an independent RNG so a
//! parallel intent phase never contends on shared state, this simulation is
//! single-threaded and its scheduler mutates the reservation table
//! incrementally while cars plan in priority order within a tick. Replanning
//! car B must observe the reservation car A just made in the same tick, so
//! there is no parallel phase to keep RNG-independent in the first place.
//! Every draw — wake-up coin flips, obstacle-persistence choices, arrival
//! coin flips, entry shuffles, slot tie-breaks — comes from one `SimRng` in a
//! single, strictly ordered sequence. Reproducing that order exactly is what
//! makes two runs with the same seed produce identical output.
//!
//! Do not reach for `rand::thread_rng()` anywhere in the core: any call that
//! bypasses `SimRng` breaks the draw-order contract and makes a run
//! unreproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The simulation's sole source of randomness.
#[derive(Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a non-empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
