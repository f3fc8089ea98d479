use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};

use fastq_tools::{compare, rename, run, MixConfigBuilder, PopulationPolicy};

/// Mix, shuffle, rename and compare FASTQ files
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mix and/or shuffle FASTQ files
    Mixshuffle(MixArgs),
    /// Rename the reads of a FASTQ file
    Rename(RenameArgs),
    /// Compare per-sample read counts of two FASTQ files
    Compare(CompareArgs),
}

#[derive(Parser, Debug)]
struct MixArgs {
    /// Input FASTQ files; count has to match --input2 when given
    #[arg(short = '1', long, required = true, num_args = 1.., value_name = "in.fastq")]
    input: Vec<PathBuf>,

    /// Paired input FASTQ files; count has to match --input
    #[arg(short = '2', long, num_args = 1.., value_name = "in.fastq")]
    input2: Option<Vec<PathBuf>>,

    /// Output FASTQ files (two if --input2 is given)
    #[arg(short, long, required = true, num_args = 1.., value_name = "out.fastq")]
    output: Vec<PathBuf>,

    /// Percentage of reads from each input file; one per input, summing to 100
    #[arg(short, long, required = true, num_args = 1.., value_name = "INT")]
    abundance: Vec<u32>,

    /// Seed for the random number generator [default: random]
    #[arg(short, long, value_name = "INT")]
    seed: Option<u64>,

    /// Number of reads in the output [default: all input reads]
    #[arg(short, value_name = "INT")]
    k: Option<usize>,

    /// Never pick the last read of an input file (matches the legacy tool)
    #[arg(long)]
    exclude_last: bool,
}

#[derive(Parser, Debug)]
struct RenameArgs {
    /// Input FASTQ file
    #[arg(short, long, value_name = "in.fastq")]
    input: PathBuf,

    /// Output FASTQ file
    #[arg(short, long, value_name = "out.fastq")]
    output: PathBuf,

    /// New base name for the reads
    #[arg(short, long)]
    base: String,

    /// Appended to the end of every new read name
    #[arg(short, long)]
    end: Option<String>,
}

#[derive(Parser, Debug)]
struct CompareArgs {
    file1: PathBuf,
    file2: PathBuf,
    /// Separator used when splitting read names
    separator: String,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn mixshuffle(args: MixArgs) -> Result<()> {
    let mut builder = MixConfigBuilder::default()
        .inputs(args.input)
        .outputs(args.output)
        .abundance(args.abundance);
    if let Some(mates) = args.input2 {
        builder = builder.mates(mates);
    }
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(k) = args.k {
        builder = builder.k(k);
    }
    if args.exclude_last {
        builder = builder.policy(PopulationPolicy::ExcludeLast);
    }
    let summary = run(&builder.build()?)?;
    eprintln!(
        "Wrote {} reads (k = {}, per file: {:?})",
        summary.written, summary.k, summary.per_file
    );
    Ok(())
}

fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Mixshuffle(args) => mixshuffle(args),
        Command::Rename(args) => {
            let n = rename(&args.input, &args.output, &args.base, args.end.as_deref())?;
            eprintln!("Renamed {n} reads");
            Ok(())
        }
        Command::Compare(args) => {
            let report = compare(&args.file1, &args.file2, &args.separator)?;
            print!("{report}");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
