//! Injectable random source for the stochastic scoring branches.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;

    /// Uniform draw in `[low, high)`.
    fn uniform(&self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

/// PCG generator behind a mutex so one engine can serve concurrent calls.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<Mcg128Xsl64>,
}

impl SeededRandom {
    /// Deterministic generator.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(Mcg128Xsl64::seed_from_u64(seed)),
        }
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(Mcg128Xsl64::from_entropy()),
        }
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen::<f64>()
    }
}

/// Replays a fixed cycle of values; useful for pinning stochastic branches.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    /// Values are clamped into `[0, 1)`. An empty list always yields 0.
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0 - f64::EPSILON) })
            .collect();
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Always yields the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.values[i % self.values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_sequence() {
        let a = SeededRandom::from_seed(7);
        let b = SeededRandom::from_seed(7);
        let xs: Vec<f64> = (0..5).map(|_| a.next_f64()).collect();
        let ys: Vec<f64> = (0..5).map(|_| b.next_f64()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn draws_are_in_unit_interval() {
        let rng = SeededRandom::from_entropy();
        for _ in 0..1000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn uniform_respects_bounds() {
        let rng = SeededRandom::from_seed(1);
        for _ in 0..1000 {
            let x = rng.uniform(-0.5, 0.5);
            assert!((-0.5..0.5).contains(&x));
        }
    }

    #[test]
    fn pick_index_stays_in_range() {
        let rng = SequenceRandom::new(vec![0.0, 0.5, 0.999_999]);
        assert_eq!(rng.pick_index(4), 0);
        assert_eq!(rng.pick_index(4), 2);
        assert_eq!(rng.pick_index(4), 3);
    }

    #[test]
    fn sequence_cycles_and_clamps() {
        let rng = SequenceRandom::new(vec![0.25, 2.0]);
        assert_eq!(rng.next_f64(), 0.25);
        assert!(rng.next_f64() < 1.0);
        assert_eq!(rng.next_f64(), 0.25);
    }

    #[test]
    fn empty_sequence_yields_zero() {
        assert_eq!(SequenceRandom::new(vec![]).next_f64(), 0.0);
    }
}
