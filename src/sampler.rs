//! Proportional sampling of reads across input files
//!
//! One generator drives the whole run: every per-file draw happens first, in
//! file order, and the combined selection is shuffled exactly once afterwards.
//! Keeping that order fixed is what makes seeded runs reproducible.

use log::debug;
use rand::{
    rngs::SmallRng,
    seq::{index, SliceRandom},
    Rng, SeedableRng,
};

use crate::{error::SampleError, PopulationPolicy, Result};

/// One chosen read: its input file and its position within that file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionIndex {
    pub file: usize,
    pub record: usize,
}
impl SelectionIndex {
    pub fn new(file: usize, record: usize) -> Self {
        Self { file, record }
    }
}

/// Number of reads a file contributes: `floor(k * abundance / 100)`
pub fn share(k: usize, abundance: u32) -> usize {
    (k as u128 * u128::from(abundance) / 100) as usize
}

/// Number of reads a file must hold to satisfy its abundance: `ceil(k * abundance / 100)`
pub fn required(k: usize, abundance: u32) -> usize {
    (k as u128 * u128::from(abundance)).div_ceil(100) as usize
}

/// Draws a shuffled, proportionally weighted selection of reads
pub struct ProportionalSampler<R: Rng> {
    rng: R,
}
impl ProportionalSampler<SmallRng> {
    /// Creates a reproducible sampler
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Creates a sampler seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng())
    }

    /// Uses the seed when given, otherwise falls back to entropy
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}
impl<R: Rng> ProportionalSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws the indices for a single file without replacement, tagged with the file index
    ///
    /// # Arguments
    /// * `file` - Index of the file in the catalog
    /// * `count` - Number of records in the file
    /// * `amount` - Number of records to draw
    /// * `policy` - Which record indices are eligible
    pub fn sample_file(
        &mut self,
        file: usize,
        count: usize,
        amount: usize,
        policy: PopulationPolicy,
    ) -> Result<Vec<SelectionIndex>> {
        let population = policy.population(count);
        if amount > population.len() {
            return Err(SampleError::SampleSize {
                file,
                requested: amount,
                population: population.len(),
            }
            .into());
        }
        let drawn = index::sample(&mut self.rng, population.len(), amount)
            .into_iter()
            .map(|offset| SelectionIndex::new(file, population.start + offset))
            .collect();
        Ok(drawn)
    }

    /// Builds the full selection for a run
    ///
    /// Each file contributes `floor(k * abundance / 100)` distinct records; the
    /// per-file draws are concatenated in file order and then shuffled as a whole.
    /// The result may hold fewer than `k` entries because of the rounding.
    ///
    /// # Arguments
    /// * `counts` - Number of records per file
    /// * `abundance` - Percentage of the output taken from each file
    /// * `k` - Requested output size
    /// * `policy` - Which record indices are eligible
    pub fn sample(
        &mut self,
        counts: &[usize],
        abundance: &[u32],
        k: usize,
        policy: PopulationPolicy,
    ) -> Result<Vec<SelectionIndex>> {
        let mut selection = Vec::with_capacity(k);
        for (file, (&count, &pct)) in counts.iter().zip(abundance).enumerate() {
            let amount = share(k, pct);
            debug!("Drawing {amount} of {count} reads from input file #{file}");
            selection.extend(self.sample_file(file, count, amount, policy)?);
        }
        selection.shuffle(&mut self.rng);
        Ok(selection)
    }
}
