//! Checks that gate a mix-shuffle run
//!
//! Validation happens in two phases. [`validate_request`] only looks at the
//! configuration and the output paths, so it runs before any input is opened.
//! [`validate_counts`] needs the per-file read counts and runs once the
//! catalogs are loaded. In both phases the first failing check wins.

use std::path::Path;

use crate::{error::ValidationError, sampler::required, MixConfig, Result};

/// Runs every check that does not need the input records
pub fn validate_request(config: &MixConfig) -> Result<()> {
    check_outputs_absent(config.outputs())?;
    check_outputs_distinct(config.outputs())?;
    check_pairing_arity(
        config.inputs().len(),
        config.mates().map(<[_]>::len),
        config.outputs().len(),
    )?;
    check_abundance_sum(config.abundance())?;
    check_abundance_arity(config.inputs().len(), config.abundance().len())?;
    Ok(())
}

/// Runs every check that depends on read counts and returns the resolved target size
///
/// # Arguments
/// * `config` - The run configuration
/// * `primary` - Read counts of the primary input files
/// * `secondary` - Read counts of the paired input files, if any
pub fn validate_counts(
    config: &MixConfig,
    primary: &[usize],
    secondary: Option<&[usize]>,
) -> Result<usize> {
    if let Some(secondary) = secondary {
        check_pair_counts(primary, secondary)?;
    }
    let k = resolve_target_size(config.k(), primary)?;
    check_sufficiency(config.inputs(), primary, config.abundance(), k)?;
    Ok(k)
}

pub fn check_outputs_absent<P: AsRef<Path>>(outputs: &[P]) -> Result<()> {
    match outputs.iter().find(|path| path.as_ref().exists()) {
        Some(path) => Err(ValidationError::OutputExists(path.as_ref().to_path_buf()).into()),
        None => Ok(()),
    }
}

/// Every output path must be distinct, so no output is opened twice
pub fn check_outputs_distinct<P: AsRef<Path>>(outputs: &[P]) -> Result<()> {
    for (idx, path) in outputs.iter().enumerate() {
        let path = path.as_ref();
        if outputs[..idx].iter().any(|prev| prev.as_ref() == path) {
            return Err(ValidationError::DuplicateOutput(path.to_path_buf()).into());
        }
    }
    Ok(())
}

/// Paired runs need one mate file per input and two outputs; unpaired runs need one output
pub fn check_pairing_arity(inputs: usize, mates: Option<usize>, outputs: usize) -> Result<()> {
    let valid = match mates {
        Some(mates) => mates == inputs && outputs == 2,
        None => outputs == 1,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::PairingArity {
            inputs,
            mates,
            outputs,
        }
        .into())
    }
}

pub fn check_pair_counts(primary: &[usize], secondary: &[usize]) -> Result<()> {
    if primary == secondary {
        Ok(())
    } else {
        Err(ValidationError::PairCountMismatch {
            primary: primary.to_vec(),
            secondary: secondary.to_vec(),
        }
        .into())
    }
}

pub fn check_abundance_sum(abundance: &[u32]) -> Result<()> {
    let sum: u64 = abundance.iter().copied().map(u64::from).sum();
    if sum == 100 {
        Ok(())
    } else {
        Err(ValidationError::AbundanceSum {
            abundance: abundance.to_vec(),
            sum,
        }
        .into())
    }
}

pub fn check_abundance_arity(inputs: usize, abundances: usize) -> Result<()> {
    if inputs == abundances {
        Ok(())
    } else {
        Err(ValidationError::AbundanceArity { inputs, abundances }.into())
    }
}

/// Resolves the requested output size, defaulting to the total read count
pub fn resolve_target_size(k: Option<usize>, counts: &[usize]) -> Result<usize> {
    let total: usize = counts.iter().sum();
    match k {
        Some(k) if k > total => Err(ValidationError::TargetSizeTooLarge { k, total }.into()),
        Some(k) => Ok(k),
        None => Ok(total),
    }
}

/// Each file must hold at least `ceil(k * abundance / 100)` reads
pub fn check_sufficiency<P: AsRef<Path>>(
    paths: &[P],
    counts: &[usize],
    abundance: &[u32],
    k: usize,
) -> Result<()> {
    for ((path, &count), &pct) in paths.iter().zip(counts).zip(abundance) {
        let required = required(k, pct);
        if count < required {
            return Err(ValidationError::InsufficientReads {
                path: path.as_ref().to_path_buf(),
                count,
                required,
            }
            .into());
        }
    }
    Ok(())
}
