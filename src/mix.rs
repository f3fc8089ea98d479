//! Mixing and shuffling of FASTQ read sets
//!
//! A run draws a fixed share of reads from each input file, shuffles the
//! combined selection and writes it to one output (or two, for paired reads).
//!
//! ```no_run
//! use fastq_tools::{run, MixConfigBuilder};
//!
//! let config = MixConfigBuilder::default()
//!     .inputs(["a_R1.fastq", "b_R1.fastq"])
//!     .mates(["a_R2.fastq", "b_R2.fastq"])
//!     .outputs(["mix_R1.fastq", "mix_R2.fastq"])
//!     .abundance([70, 30])
//!     .seed(42)
//!     .k(10_000)
//!     .build()
//!     .unwrap();
//! let summary = run(&config).unwrap();
//! println!("wrote {} reads", summary.written);
//! ```

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::{
    error::ConfigError,
    sampler::share,
    validate::{validate_counts, validate_request},
    FastqWriter, InputCatalog, PairedEmitter, PopulationPolicy, ProportionalSampler, Result,
};

/// Parameters of a single mix-shuffle run
#[derive(Debug, Clone)]
pub struct MixConfig {
    inputs: Vec<PathBuf>,
    mates: Option<Vec<PathBuf>>,
    outputs: Vec<PathBuf>,
    abundance: Vec<u32>,
    seed: Option<u64>,
    k: Option<usize>,
    policy: PopulationPolicy,
}
impl MixConfig {
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    pub fn mates(&self) -> Option<&[PathBuf]> {
        self.mates.as_deref()
    }

    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    pub fn abundance(&self) -> &[u32] {
        &self.abundance
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Requested output size; `None` means all input reads
    pub fn k(&self) -> Option<usize> {
        self.k
    }

    pub fn policy(&self) -> PopulationPolicy {
        self.policy
    }

    pub fn is_paired(&self) -> bool {
        self.mates.is_some()
    }
}

/// Builder for [`MixConfig`] instances
#[derive(Default)]
pub struct MixConfigBuilder {
    /// Required primary input files
    inputs: Option<Vec<PathBuf>>,
    /// Optional mate files, one per primary input
    mates: Option<Vec<PathBuf>>,
    /// Required output files
    outputs: Option<Vec<PathBuf>>,
    /// Required percentages, one per primary input
    abundance: Option<Vec<u32>>,
    seed: Option<u64>,
    k: Option<usize>,
    policy: Option<PopulationPolicy>,
}
impl MixConfigBuilder {
    #[must_use]
    pub fn inputs<I, P>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.inputs = Some(collect_paths(inputs));
        self
    }

    #[must_use]
    pub fn mates<I, P>(mut self, mates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.mates = Some(collect_paths(mates));
        self
    }

    #[must_use]
    pub fn outputs<I, P>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.outputs = Some(collect_paths(outputs));
        self
    }

    #[must_use]
    pub fn abundance<I: IntoIterator<Item = u32>>(mut self, abundance: I) -> Self {
        self.abundance = Some(abundance.into_iter().collect());
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: PopulationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Builds the configuration; value checks happen later, in [`run`]
    pub fn build(self) -> Result<MixConfig> {
        let Some(inputs) = self.inputs else {
            return Err(ConfigError::Missing("inputs").into());
        };
        let Some(outputs) = self.outputs else {
            return Err(ConfigError::Missing("outputs").into());
        };
        let Some(abundance) = self.abundance else {
            return Err(ConfigError::Missing("abundance").into());
        };
        Ok(MixConfig {
            inputs,
            mates: self.mates,
            outputs,
            abundance,
            seed: self.seed,
            k: self.k,
            policy: self.policy.unwrap_or_default(),
        })
    }
}

fn collect_paths<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .collect()
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixSummary {
    /// Resolved target size
    pub k: usize,
    /// Number of reads drawn from each input file
    pub per_file: Vec<usize>,
    /// Number of reads (or pairs) written
    pub written: usize,
    pub paired: bool,
}

/// Executes a mix-shuffle run
///
/// Validation failures leave the file system untouched. Output files are only
/// created once the selection has been drawn; a write failure past that point
/// may leave partial outputs behind.
pub fn run(config: &MixConfig) -> Result<MixSummary> {
    validate_request(config)?;

    info!("Input files 1: {:?}", config.inputs());
    info!("Input files 2: {:?}", config.mates());
    info!("Abundance: {:?}", config.abundance());
    info!("Output files: {:?}", config.outputs());
    info!("Seed: {:?}", config.seed());
    info!("k: {:?}", config.k());

    let primary = InputCatalog::load(config.inputs())?;
    let mates = config.mates().map(InputCatalog::load).transpose()?;

    let counts = primary.counts();
    let mate_counts = mates.as_ref().map(InputCatalog::counts);
    let k = validate_counts(config, &counts, mate_counts.as_deref())?;

    let mut sampler = ProportionalSampler::from_seed_opt(config.seed());
    let selection = sampler.sample(&counts, config.abundance(), k, config.policy())?;
    let per_file = config
        .abundance()
        .iter()
        .map(|&pct| share(k, pct))
        .collect::<Vec<_>>();
    debug!("Selected {} reads ({per_file:?} per file)", selection.len());

    let written = match &mates {
        Some(mates) => {
            let primary_out = FastqWriter::create_new(&config.outputs()[0])?;
            let mate_out = FastqWriter::create_new(&config.outputs()[1])?;
            PairedEmitter::paired(primary_out, mate_out).emit(&selection, &primary, Some(mates))?
        }
        None => {
            let primary_out = FastqWriter::create_new(&config.outputs()[0])?;
            PairedEmitter::single(primary_out).emit(&selection, &primary, None)?
        }
    };
    info!("Wrote {written} reads to {:?}", config.outputs());

    Ok(MixSummary {
        k,
        per_file,
        written,
        paired: mates.is_some(),
    })
}
