//! Parallel fan-out of per-chain pre-parse jobs
//!
//! Each chain directory is one job; jobs share nothing and write to disjoint
//! output paths, so the pool needs no locking. A failing chain is logged and
//! dropped without aborting the batch: the absent `<chain>.npz` is the only
//! failure signal.

use std::collections::BTreeMap;
use std::path::Path;

use rayon::prelude::*;
use tracing::{error, info};

use crate::msa::{array, files, parser};
use crate::utils::progress::create_progress_bar;
use crate::{FoldprepError, Result};

/// Pre-parse every chain directory under `alignments_dir` into a compressed
/// array archive under `array_dir`, using `num_workers` worker threads.
pub fn run(
    alignments_dir: &Path,
    array_dir: &Path,
    max_seq_counts: &BTreeMap<String, usize>,
    num_workers: usize,
) -> Result<()> {
    let chains = enumerate_chains(alignments_dir)?;
    std::fs::create_dir_all(array_dir)?;

    info!(
        total = chains.len(),
        workers = num_workers,
        "pre-parsing MSAs"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_workers)
        .build()
        .map_err(|e| FoldprepError::Config(format!("failed to build worker pool: {}", e)))?;

    let bar = create_progress_bar(chains.len() as u64, "Pre-parsing MSAs");

    pool.install(|| {
        chains.par_iter().for_each(|chain| {
            if let Err(e) = preparse_chain(alignments_dir, array_dir, max_seq_counts, chain) {
                error!(chain = %chain, error = %e, "failed to pre-parse MSAs");
            }
            bar.inc(1);
        });
    });

    bar.finish();
    Ok(())
}

/// Immediate subdirectory names of the alignments directory, one per chain.
pub fn enumerate_chains(alignments_dir: &Path) -> Result<Vec<String>> {
    let mut chains = Vec::new();
    for entry in std::fs::read_dir(alignments_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            chains.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    chains.sort();
    Ok(chains)
}

/// Parse one chain's alignments and persist them as `<chain_id>.npz`.
pub fn preparse_chain(
    alignments_dir: &Path,
    array_dir: &Path,
    max_seq_counts: &BTreeMap<String, usize>,
    chain_id: &str,
) -> Result<()> {
    let file_list = files::resolve_alignment_files(&alignments_dir.join(chain_id))?;
    let msas = parser::parse_msas(&file_list, max_seq_counts)?;
    array::write_alignment_arrays(&array_dir.join(format!("{chain_id}.npz")), &msas)
}
