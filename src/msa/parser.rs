//! Reading of per-database alignment files with sequence-count caps
//!
//! Three formats cover the managed databases: aligned FASTA, A3M (lowercase
//! insertion columns relative to the query) and Stockholm (jackhmmer output,
//! possibly multi-block). Caps are applied while reading, so an alignment
//! with millions of hits costs only as much as its cap.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array2;

use crate::msa::files::AlignmentFile;
use crate::{FoldprepError, Result};

/// One parsed multiple sequence alignment.
///
/// Every row is query-aligned: A3M insertion columns are stripped and
/// Stockholm blocks concatenated, so all rows share the query's width.
#[derive(Debug, Clone)]
pub struct Msa {
    pub database: String,
    pub rows: Vec<Vec<u8>>,
}

impl Msa {
    pub fn num_sequences(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    /// Convert to the plain residue matrix persisted downstream
    /// (rows = sequences, columns = alignment columns).
    pub fn to_record(&self) -> Result<Array2<u8>> {
        let width = self.width();
        let mut flat = Vec::with_capacity(self.rows.len() * width);
        for row in &self.rows {
            flat.extend_from_slice(row);
        }
        Array2::from_shape_vec((self.rows.len(), width), flat).map_err(|e| {
            FoldprepError::Array(format!("ragged alignment for {}: {}", self.database, e))
        })
    }
}

/// Parse every capped alignment file for one chain.
///
/// Files whose database name has no entry in `max_seq_counts` are skipped,
/// mirroring the cap-driven selection of the surrounding pipeline.
pub fn parse_msas(
    files: &[AlignmentFile],
    max_seq_counts: &BTreeMap<String, usize>,
) -> Result<BTreeMap<String, Msa>> {
    let mut msas = BTreeMap::new();
    for file in files {
        let Some(&cap) = max_seq_counts.get(&file.database) else {
            continue;
        };
        let msa = parse_alignment(&file.path, &file.database, cap)?;
        msas.insert(file.database.clone(), msa);
    }
    Ok(msas)
}

/// Parse a single alignment file, keeping at most `max_seqs` sequences.
pub fn parse_alignment(path: &Path, database: &str, max_seqs: usize) -> Result<Msa> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let reader = BufReader::new(File::open(path)?);
    let rows = match ext {
        "sto" => read_stockholm(reader, max_seqs)?,
        "a3m" => read_fasta_like(reader, max_seqs, true)?,
        _ => read_fasta_like(reader, max_seqs, false)?,
    };

    if let Some(width) = rows.first().map(|r| r.len()) {
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(FoldprepError::Parse(format!(
                "{}: sequence {} has width {} but the query has width {}",
                path.display(),
                bad,
                rows[bad].len(),
                width
            )));
        }
    }

    Ok(Msa {
        database: database.to_string(),
        rows,
    })
}

/// Read `>`-delimited records; with `strip_insertions`, lowercase residues
/// and `.` gaps (A3M insertion columns) are dropped.
fn read_fasta_like<R: BufRead>(
    reader: R,
    max_seqs: usize,
    strip_insertions: bool,
) -> Result<Vec<Vec<u8>>> {
    let mut rows: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<Vec<u8>> = None;

    for line in reader.lines() {
        let line = line?;
        if line.starts_with('>') {
            if let Some(row) = current.take() {
                rows.push(row);
            }
            if rows.len() == max_seqs {
                return Ok(rows);
            }
            current = Some(Vec::new());
        } else {
            let Some(row) = current.as_mut() else {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(FoldprepError::Parse(
                    "sequence data before first FASTA header".to_string(),
                ));
            };
            for c in line.bytes() {
                if c.is_ascii_whitespace() {
                    continue;
                }
                if strip_insertions && (c.is_ascii_lowercase() || c == b'.') {
                    continue;
                }
                row.push(c.to_ascii_uppercase());
            }
        }
    }
    if let Some(row) = current.take() {
        rows.push(row);
    }
    Ok(rows)
}

/// Read a Stockholm alignment, concatenating rows across blocks.
///
/// The cap applies to distinct sequence names; continuation lines of kept
/// names are always appended so every row spans all blocks.
fn read_stockholm<R: BufRead>(reader: R, max_seqs: usize) -> Result<Vec<Vec<u8>>> {
    let mut order: Vec<String> = Vec::new();
    let mut rows: HashMap<String, Vec<u8>> = HashMap::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim_end();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed == "//" {
            break;
        }
        let mut parts = trimmed.split_whitespace();
        let (Some(name), Some(aligned)) = (parts.next(), parts.next()) else {
            continue;
        };
        match rows.get_mut(name) {
            Some(row) => append_stockholm_residues(row, aligned),
            None => {
                if order.len() == max_seqs {
                    continue;
                }
                let mut row = Vec::new();
                append_stockholm_residues(&mut row, aligned);
                order.push(name.to_string());
                rows.insert(name.to_string(), row);
            }
        }
    }

    Ok(order
        .iter()
        .map(|name| rows.remove(name).unwrap_or_default())
        .collect())
}

fn append_stockholm_residues(row: &mut Vec<u8>, aligned: &str) {
    for c in aligned.bytes() {
        let c = if c == b'.' { b'-' } else { c };
        row.push(c.to_ascii_uppercase());
    }
}
