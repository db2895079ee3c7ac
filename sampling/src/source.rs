use std::f64::consts::PI;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_core::RngCore;

const MAXF64: f64 = 9007199254740992.0;

/// Seeded ChaCha8 stream. Two sources built from the same seed yield the same
/// sequence of phases, floats and Q14 components.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Draws a 32-byte seed from this stream, so derived sources stay
    /// reproducible from the root seed.
    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.source.fill_bytes(&mut seed);
        seed
    }

    /// Returns an independent source seeded from this one.
    pub fn branch(&mut self) -> Self {
        Source::new(self.new_seed())
    }

    /// Rejection-samples a value in `[0, max)`; `mask` must cover `max - 1`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Uniform in `[min, max)` with 53 bits of randomness.
    #[inline(always)]
    pub fn next_f64(&mut self, min: f64, max: f64) -> f64 {
        min + ((self.next_u64() << 11 >> 11) as f64) / MAXF64 * (max - min)
    }

    /// Uniform angle in `(-pi, pi]`.
    #[inline(always)]
    pub fn next_phase(&mut self) -> f64 {
        PI - self.next_f64(0.0, 2.0 * PI)
    }

    /// Uniform in `[min, max]`.
    pub fn next_i16(&mut self, min: i16, max: i16) -> i16 {
        assert!(min <= max, "invalid range: min={min} > max={max}");
        let range: u64 = (max as i64 - min as i64 + 1) as u64;
        let mask: u64 = range.next_power_of_two() - 1;
        (min as i64 + self.next_u64n(range, mask) as i64) as i16
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
