//! Leader election policies.

use crate::{Node, TopologyError, TopologyResult};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Picks which candidate becomes leader.
///
/// Policies are pure selection functions: no side effects, no I/O, and
/// deterministic once seeded. Callers hand in the candidate set and apply
/// the returned index themselves, so a quality-aware policy can replace
/// the default without touching any call site.
pub trait ElectionPolicy: Send + Sync {
    /// Return the index of the winning candidate.
    ///
    /// An empty candidate set is an error, never an index.
    fn elect(&self, candidates: &[Arc<Node>]) -> TopologyResult<usize>;
}

/// Uniform-random selection over all candidates.
///
/// No health pre-check and no data-freshness weighting: a lagging
/// follower is as likely to win as a caught-up one.
pub struct UniformRandom {
    rng: Mutex<StdRng>,
}

impl UniformRandom {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic variant for tests and reproducible simulations.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for UniformRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl ElectionPolicy for UniformRandom {
    fn elect(&self, candidates: &[Arc<Node>]) -> TopologyResult<usize> {
        if candidates.is_empty() {
            return Err(TopologyError::NoCandidates);
        }
        Ok(self.rng.lock().gen_range(0..candidates.len()))
    }
}
