//! Compressed array archive output
//!
//! One `.npz` per chain, one named `u8` residue matrix per database, readable
//! directly by the NumPy consumers downstream.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use ndarray_npy::NpzWriter;

use crate::msa::parser::Msa;
use crate::{FoldprepError, Result};

/// Write one chain's parsed alignments into a compressed `.npz` archive.
pub fn write_alignment_arrays(path: &Path, msas: &BTreeMap<String, Msa>) -> Result<()> {
    let mut npz = NpzWriter::new_compressed(File::create(path)?);
    for (name, msa) in msas {
        let record = msa.to_record()?;
        npz.add_array(name.as_str(), &record).map_err(|e| {
            FoldprepError::Array(format!("failed to write array '{}': {}", name, e))
        })?;
    }
    npz.finish().map_err(|e| {
        FoldprepError::Array(format!("failed to finalize {}: {}", path.display(), e))
    })?;
    Ok(())
}
