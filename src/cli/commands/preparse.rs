use std::path::PathBuf;

use clap::Parser;

use crate::msa::{preparse, MaxSeqCounts};
use crate::FoldprepError;

/// Pre-parse per-chain multiple sequence alignments into compressed arrays.
#[derive(Parser)]
#[command(
    name = "preparse-msas",
    version,
    about = "Pre-parse raw per-chain MSA files into compressed .npz arrays",
    long_about = "Walks the per-chain subdirectories of the alignments directory, parses each \
                  chain's alignment files with per-database sequence caps applied, and writes \
                  one compressed array archive per chain. Chains are processed in parallel and \
                  a failing chain never aborts the batch."
)]
pub struct PreparseArgs {
    /// Directory containing per-chain folders with multiple sequence alignments
    #[arg(long = "alignments_directory", value_name = "DIR")]
    pub alignments_directory: PathBuf,

    /// Output directory to which the per-chain MSA npz files are to be saved
    #[arg(long = "alignment_array_directory", value_name = "DIR")]
    pub alignment_array_directory: PathBuf,

    /// Per-database sequence caps as a JSON object, e.g. '{"uniref90_hits": 10000}'.
    /// Keys must match the alignment filenames without extension; alignments
    /// without a matching key are not parsed
    #[arg(long = "max_seq_counts", value_name = "JSON")]
    pub max_seq_counts: String,

    /// Number of worker threads to parallelize pre-parsing over
    #[arg(long = "num_workers", value_name = "N")]
    pub num_workers: usize,
}

pub fn run(args: PreparseArgs) -> anyhow::Result<()> {
    let limits = MaxSeqCounts::from_json(&args.max_seq_counts)?;

    if args.num_workers == 0 {
        return Err(FoldprepError::Config(
            "--num_workers must be a positive integer".to_string(),
        )
        .into());
    }
    for dir in [&args.alignments_directory, &args.alignment_array_directory] {
        if !dir.is_dir() {
            return Err(
                FoldprepError::Config(format!("{} is not a directory", dir.display())).into(),
            );
        }
    }

    preparse::run(
        &args.alignments_directory,
        &args.alignment_array_directory,
        &limits.into_map(),
        args.num_workers,
    )?;
    Ok(())
}
