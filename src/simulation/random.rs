// Random source trait — the injectable seam for cascade randomness.
//
// Production runs use a `StdRng` seeded once at startup, so any run can be
// repeated from its seed. Tests plug in scripted sources to force specific
// branches of a cascade.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the two kinds of draws a simulation needs.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `[0, len)`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Build the process-wide generator from an explicit seed.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Pick a fresh seed when none was configured; callers log it.
pub fn fresh_seed() -> u64 {
    rand::rng().random()
}
