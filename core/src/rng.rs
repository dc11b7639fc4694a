//! Deterministic random number generation.
//!
//! RULE: Nothing in the pipeline may call any platform RNG.
//! All randomness flows through a single DatasetRng constructed
//! from the run's seed and passed explicitly to the synthesizer.
//!
//! Every draw consumes the next values of one stream, so the order
//! of calls is part of the output contract:
//!   monthly sales -> product sales -> cost factors
//!   -> customer counts -> satisfaction scores

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::types::Seed;

/// A named, deterministic RNG stream.
pub struct DatasetRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
    /// Second variate of the last polar-method pair, consumed first.
    spare_normal: Option<f64>,
}

impl DatasetRng {
    pub fn new(seed: Seed) -> Self {
        Self {
            name: "dataset",
            inner: Pcg64Mcg::seed_from_u64(seed),
            spare_normal: None,
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n), without modulo bias.
    /// Raw draws below `2^64 mod n` are rejected so every residue is equally likely.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        let reject_below = n.wrapping_neg() % n;
        loop {
            let v = self.inner.next_u64();
            if v >= reject_below {
                return v % n;
            }
        }
    }

    /// Roll a float in [low, high). Requires low < high.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let v = low + (high - low) * self.next_f64();
        // low + span * u can round up to `high` for u just below 1.0.
        if v < high {
            v
        } else {
            float_below(high)
        }
    }

    /// Roll an integer in [low, high). Requires low < high.
    pub fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        assert!(low < high, "empty integer range [{low}, {high})");
        low + self.next_u64_below(u64::from(high - low)) as u32
    }

    /// Sample from a normal distribution (Marsaglia polar method).
    /// Variates are produced in pairs; the second is cached for the next call.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        if let Some(z) = self.spare_normal.take() {
            return mean + std_dev * z;
        }
        loop {
            let u = 2.0 * self.next_f64() - 1.0;
            let v = 2.0 * self.next_f64() - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let factor = (-2.0 * s.ln() / s).sqrt();
                self.spare_normal = Some(v * factor);
                return mean + std_dev * u * factor;
            }
        }
    }
}

/// Largest representable float strictly below `x` (finite, non-zero `x`).
fn float_below(x: f64) -> f64 {
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits - 1)
    } else {
        f64::from_bits(bits + 1)
    }
}
