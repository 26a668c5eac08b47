//! Roast generator: random lines without immediate repeats.

use crate::content::ROASTS;
use crate::error::ContentError;
use crate::rng::{entropy_seed, seeded};
use rand::rngs::StdRng;
use rand::Rng;

/// Roasts per level on the roast counter
pub const ROASTS_PER_LEVEL: u64 = 5;

pub struct RoastSelector {
    pool: &'static [&'static str],
    last: Option<&'static str>,
    count: u64,
    /// At least two distinct lines exist, so resampling terminates
    can_vary: bool,
    rng: StdRng,
}

impl Default for RoastSelector {
    fn default() -> Self {
        Self::from_parts(ROASTS, entropy_seed())
    }
}

impl RoastSelector {
    pub fn new(pool: &'static [&'static str]) -> Result<Self, ContentError> {
        Self::with_seed(pool, entropy_seed())
    }

    pub fn with_seed(pool: &'static [&'static str], seed: u64) -> Result<Self, ContentError> {
        if pool.is_empty() {
            return Err(ContentError::EmptyPool { what: "roast" });
        }
        Ok(Self::from_parts(pool, seed))
    }

    fn from_parts(pool: &'static [&'static str], seed: u64) -> Self {
        let can_vary = pool.iter().any(|line| *line != pool[0]);
        Self {
            pool,
            last: None,
            count: 0,
            can_vary,
            rng: seeded(seed),
        }
    }

    /// Next roast; never equal to the previous one unless every line in the
    /// pool is the same
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &'static str {
        let mut line = self.sample();
        if self.can_vary {
            while Some(line) == self.last {
                line = self.sample();
            }
        }
        self.last = Some(line);
        self.count += 1;
        tracing::trace!(count = self.count, "roast served");
        line
    }

    fn sample(&mut self) -> &'static str {
        self.pool[self.rng.gen_range(0..self.pool.len())]
    }

    /// Most recent roast, if any
    pub fn current(&self) -> Option<&'static str> {
        self.last
    }

    /// Number of roasts served so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// `floor(count / 5) + 1`
    pub fn level(&self) -> u64 {
        self.count / ROASTS_PER_LEVEL + 1
    }
}
