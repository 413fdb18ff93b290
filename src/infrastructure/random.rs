use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::ports::random::RandomSource;

/// Adapts any `rand` generator to the [`RandomSource`] port.
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded from `seed` when given, from OS entropy otherwise.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(|| Self::new(StdRng::from_os_rng()), Self::seeded)
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
