use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Seed drawn from the platform entropy source (`crypto.getRandomValues` in the browser)
pub fn entropy_seed() -> u64 {
    let mut seed_bytes = [0u8; 8];
    if getrandom::getrandom(&mut seed_bytes).is_err() {
        // Fallback: distinct seeds per call even without an entropy source
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        seed_bytes = COUNTER.fetch_add(1, Ordering::Relaxed).to_le_bytes();
    }
    u64::from_le_bytes(seed_bytes)
}

pub(crate) fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
