//! Injectable random source
//!
//! The spawner only ever needs uniform draws in `[0, 1)`, so the seam is a
//! single method. Games use a seeded PCG; tests script exact sequences.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded PCG for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of draws, then repeats `fallback` forever
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRandom {
    /// Fallback is just under 1.0, so an exhausted script never spawns
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        Self::with_fallback(values, 0.9999)
    }

    pub fn with_fallback(values: impl IntoIterator<Item = f32>, fallback: f32) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback,
        }
    }

    /// Queue more draws behind the remaining ones
    pub fn push(&mut self, values: impl IntoIterator<Item = f32>) {
        self.values.extend(values);
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}
