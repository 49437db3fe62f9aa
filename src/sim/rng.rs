//! Injectable randomness for AI jitter and ball serves

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform floats in `[0, 1)`
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

/// Default source backed by PCG32
#[derive(Debug, Clone)]
pub struct SimRng(Pcg32);

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    /// Seed from the operating system (crypto.getRandomValues on web)
    pub fn from_entropy() -> Self {
        Self(Pcg32::from_os_rng())
    }
}

impl RandomSource for SimRng {
    fn next_f32(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// Useful for headless tests and scripted demos. An empty list yields 0.5.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    values: Vec<f32>,
    index: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            index: 0,
        }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RandomSource for SequenceRng {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.5;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
