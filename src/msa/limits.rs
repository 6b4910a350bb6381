//! Per-database sequence-count caps supplied on the command line

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{FoldprepError, Result};

/// Maximum sequence counts per alignment database.
///
/// Closed field set: unknown keys in the JSON argument are rejected so a
/// typoed database name fails loudly instead of silently parsing nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaxSeqCounts {
    // Jackhmmer databases
    pub uniprot_hits: Option<u64>,
    pub uniref90_hits: Option<u64>,
    pub mgnify_hits: Option<u64>,
    pub pdb_seqres_hits: Option<u64>,

    // HHblits databases
    pub uniref30_hits: Option<u64>,
    pub bfd_hits: Option<u64>,
    pub cfdb_hits: Option<u64>,

    // RNA databases
    pub rfam_hits: Option<u64>,
    pub rnacentral_hits: Option<u64>,
    pub nucleotide_collection_hits: Option<u64>,
}

impl MaxSeqCounts {
    /// Parse and validate the JSON form passed via `--max_seq_counts`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let counts: MaxSeqCounts = serde_json::from_str(raw)
            .map_err(|e| FoldprepError::Config(format!("invalid max_seq_counts JSON: {}", e)))?;
        counts.validate()?;
        Ok(counts)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in self.fields() {
            if value == Some(0) {
                return Err(FoldprepError::Config(format!(
                    "max_seq_counts entry '{}' must be a positive integer",
                    name
                )));
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, Option<u64>); 10] {
        [
            ("uniprot_hits", self.uniprot_hits),
            ("uniref90_hits", self.uniref90_hits),
            ("mgnify_hits", self.mgnify_hits),
            ("pdb_seqres_hits", self.pdb_seqres_hits),
            ("uniref30_hits", self.uniref30_hits),
            ("bfd_hits", self.bfd_hits),
            ("cfdb_hits", self.cfdb_hits),
            ("rfam_hits", self.rfam_hits),
            ("rnacentral_hits", self.rnacentral_hits),
            ("nucleotide_collection_hits", self.nucleotide_collection_hits),
        ]
    }

    /// Collapse into a plain name -> cap mapping, dropping unset fields.
    pub fn into_map(self) -> BTreeMap<String, usize> {
        self.fields()
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v as usize)))
            .collect()
    }
}
