//! Bulk download of the published alignment sequence databases

pub mod catalog;
pub mod fetch;
pub mod s3;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Bucket holding the published alignment databases.
pub const S3_BUCKET: &str = "openfold";
/// Key prefix under which every archive lives.
pub const S3_PREFIX: &str = "alignment_databases";

/// Databases searched with jackhmmer, shipped as single compressed FASTAs.
pub const JACKHMMER_DATABASES: &[&str] = &["uniprot", "uniref90", "mgnify", "pdb_seqres"];
/// RNA databases, also single compressed FASTAs.
pub const RNA_DATABASES: &[&str] = &["rfam", "rnacentral", "nucleotide_collection"];
/// Databases searched with hhblits, shipped as tarballs.
pub const HHBLITS_DATABASES: &[&str] = &["uniref30"];
/// Large optional hhblits tarballs behind dedicated flags.
pub const BFD_DATABASE: &str = "bfd";
pub const CFDB_DATABASE: &str = "cfdb";

/// Archive families with distinct extraction handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFamily {
    /// `<name>.fasta.gz`, unzipped in place.
    Jackhmmer,
    /// `<name>.tar.gz`, extracted then deleted.
    Hhblits,
}

impl ArchiveFamily {
    pub fn archive_name(&self, db: &str) -> String {
        match self {
            ArchiveFamily::Jackhmmer => format!("{db}.fasta.gz"),
            ArchiveFamily::Hhblits => format!("{db}.tar.gz"),
        }
    }
}

/// One database to fetch: a name plus the derived remote key and local
/// destination for its archive.
#[derive(Debug, Clone)]
pub struct DownloadSpec {
    pub name: String,
    pub family: ArchiveFamily,
    pub key: String,
    pub destination: PathBuf,
}

impl DownloadSpec {
    pub fn new(outdir: &Path, name: &str, family: ArchiveFamily) -> Self {
        let archive = family.archive_name(name);
        DownloadSpec {
            name: name.to_string(),
            family,
            key: format!("{}/{}", S3_PREFIX, archive),
            destination: outdir.join(name).join(archive),
        }
    }
}

/// Static table mapping known archive filenames to a molecule-type label.
pub fn known_database_table() -> BTreeMap<String, &'static str> {
    let mut known = BTreeMap::new();
    for db in JACKHMMER_DATABASES {
        known.insert(format!("{db}.fasta.gz"), "Protein");
    }
    for db in RNA_DATABASES {
        known.insert(format!("{db}.fasta.gz"), "DNA/RNA");
    }
    for db in HHBLITS_DATABASES {
        known.insert(format!("{db}.tar.gz"), "Protein");
    }
    known.insert(format!("{BFD_DATABASE}.tar.gz"), "Protein");
    known.insert(format!("{CFDB_DATABASE}.tar.gz"), "Protein");
    known
}
