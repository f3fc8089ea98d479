use std::path::PathBuf;

/// Custom Result type for fastq-tools operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the fastq-tools library, encompassing all possible error cases
/// that can occur while loading, sampling and writing read sets.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// A run was rejected before any record was sampled
    ValidationError(#[from] ValidationError),
    /// Internal sampling invariants were violated
    SampleError(#[from] SampleError),
    /// Errors that occur while reading input files
    ReadError(#[from] ReadError),
    /// Errors that occur while creating or writing output files
    WriteError(#[from] WriteError),
    /// Incomplete or inconsistent run configuration
    ConfigError(#[from] ConfigError),
    /// Standard I/O errors from the Rust standard library
    IoError(#[from] std::io::Error),
    /// Records whose header, sequence or quality is not valid UTF-8
    Utf8Error(#[from] std::string::FromUtf8Error),
    /// Generic errors that can occur in any part of the system
    AnyhowError(#[from] anyhow::Error),
}

/// Checks that gate a mix-shuffle run
///
/// Every variant is fatal and names the values that broke the invariant.
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    /// The output path is already present on disk
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// The same output path was given more than once
    #[error("Output file given more than once: {}", .0.display())]
    DuplicateOutput(PathBuf),

    /// Paired inputs and outputs do not line up
    ///
    /// # Fields
    /// * `inputs` - Number of primary input files
    /// * `mates` - Number of paired input files (`None` for unpaired runs)
    /// * `outputs` - Number of output files
    #[error(
        "Mismatched file counts: {inputs} input(s), {} paired input(s), {outputs} output(s) (paired runs need equal inputs and 2 outputs, unpaired runs need 1 output)",
        .mates.map_or_else(|| "no".to_string(), |n| n.to_string())
    )]
    PairingArity {
        inputs: usize,
        mates: Option<usize>,
        outputs: usize,
    },

    /// A paired file holds a different number of reads than its primary file
    #[error("Input files are paired, but number of reads is different: {primary:?} != {secondary:?}")]
    PairCountMismatch {
        primary: Vec<usize>,
        secondary: Vec<usize>,
    },

    /// Abundances must total exactly 100
    #[error("Abundance does not sum to 100: {abundance:?} (sum = {sum})")]
    AbundanceSum { abundance: Vec<u32>, sum: u64 },

    /// One abundance value is needed per input file
    #[error("Not every input file has an abundance specified: {inputs} input(s), {abundances} abundance value(s)")]
    AbundanceArity { inputs: usize, abundances: usize },

    /// The requested output size exceeds the number of available reads
    #[error("k is larger than total reads: {k} > {total}")]
    TargetSizeTooLarge { k: usize, total: usize },

    /// A single input file cannot supply its share of the output
    #[error("Not enough reads in input file {} to satisfy abundance requirements: {count} available, {required} required", .path.display())]
    InsufficientReads {
        path: PathBuf,
        count: usize,
        required: usize,
    },
}

/// Errors raised by the sampling and emitting stages
///
/// These indicate a gap in validation rather than bad user input.
#[derive(thiserror::Error, Debug)]
pub enum SampleError {
    /// Attempted to draw more indices than the population holds
    ///
    /// # Fields
    /// * `file` - Index of the input file
    /// * `requested` - Number of draws requested
    /// * `population` - Number of indices available
    #[error("Cannot draw {requested} reads from input file #{file}: population holds {population}")]
    SampleSize {
        file: usize,
        requested: usize,
        population: usize,
    },

    /// A selection does not resolve to a record
    #[error("Selection ({file}, {record}) is out of the catalog range")]
    OutOfRange { file: usize, record: usize },

    /// A mate catalog was given without a mate writer, or the reverse
    #[error("Mate catalog and mate writer must be provided together")]
    MateMismatch,
}

/// Errors that can occur while reading FASTQ input
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The input file could not be opened
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input file is not valid FASTQ
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: seq_io::fastq::Error,
    },
}

/// Errors that can occur while writing FASTQ output
#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    /// The output file could not be created
    #[error("Failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised while assembling a run configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A mandatory setting was never provided
    #[error("Missing {0} in mix configuration")]
    Missing(&'static str),
}
