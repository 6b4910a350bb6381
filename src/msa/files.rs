//! Resolution of a chain directory's alignment files

use std::path::{Path, PathBuf};

use crate::Result;

/// Alignment formats recognized in a chain directory.
pub const ALIGNMENT_EXTENSIONS: &[&str] = &["a3m", "fasta", "sto"];

/// An alignment file paired with the database it came from.
///
/// The file stem is the database name: `uniref90_hits.a3m` -> `uniref90_hits`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentFile {
    pub database: String,
    pub path: PathBuf,
}

/// Resolve the alignment files in one chain directory, in name order.
///
/// Unrecognized extensions and nested directories are ignored.
pub fn resolve_alignment_files(chain_dir: &Path) -> Result<Vec<AlignmentFile>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(chain_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !ALIGNMENT_EXTENSIONS.contains(&ext) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        files.push(AlignmentFile {
            database: stem.to_string(),
            path,
        });
    }
    files.sort_by(|a, b| a.database.cmp(&b.database));
    Ok(files)
}
