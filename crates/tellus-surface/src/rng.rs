//! Deterministic linear-congruential generator for procedural placement.

use rand::{RngCore, SeedableRng};

/// 64-bit linear-congruential generator seeded from a 32-bit value.
///
/// `state = state * 1103515245 + 12345` (wrapping). Implements the `rand`
/// traits so call sites draw through [`rand::Rng`] range methods; the same
/// seed always yields the same stream, across runs and platforms. The stream
/// itself is the contract: stored planets depend on it.
#[derive(Clone, Debug)]
pub struct Lcg64 {
    state: u64,
}

const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;

impl Lcg64 {
    /// Create a generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed as u64 }
    }
}

impl RngCore for Lcg64 {
    fn next_u32(&mut self) -> u32 {
        // High half only: the low bits of an LCG cycle with short periods.
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Lcg64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self {
            state: u64::from_le_bytes(seed),
        }
    }

    fn seed_from_u64(state: u64) -> Self {
        // The seed IS the initial state; the default splitmix expansion would
        // break stream compatibility with stored 32-bit seeds.
        Self { state }
    }
}
