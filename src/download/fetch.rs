//! Sequential fetch-and-unpack of selected databases
//!
//! One database at a time with synchronous shell-outs; the first hard
//! failure aborts the remaining queue. Pre-existing output short-circuits
//! each step.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::download::s3::{run_checked, StorageClient};
use crate::download::{
    ArchiveFamily, DownloadSpec, BFD_DATABASE, CFDB_DATABASE, HHBLITS_DATABASES,
    JACKHMMER_DATABASES, RNA_DATABASES, S3_BUCKET,
};
use crate::Result;

/// Database selection for one `download` invocation.
#[derive(Debug, Clone, Default)]
pub struct DownloadSelection {
    /// Explicit jackhmmer-family override; `None` means the default set.
    pub jackhmmer_dbs: Option<Vec<String>>,
    /// Explicit hhblits-family override; `None` means the default set.
    pub hhblits_dbs: Option<Vec<String>>,
    pub download_bfd: bool,
    pub download_cfdb: bool,
    pub download_rna_dbs: bool,
}

impl DownloadSelection {
    /// The jackhmmer-family names to process, override-aware. The RNA set is
    /// appended after any override.
    pub fn jackhmmer_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match &self.jackhmmer_dbs {
            Some(list) => list.clone(),
            None => JACKHMMER_DATABASES.iter().map(|s| s.to_string()).collect(),
        };
        if self.download_rna_dbs {
            names.extend(RNA_DATABASES.iter().map(|s| s.to_string()));
        }
        names
    }

    /// The hhblits-family names to process. An explicit override ignores the
    /// bfd/cfdb flags entirely.
    pub fn hhblits_names(&self) -> Vec<String> {
        match &self.hhblits_dbs {
            Some(list) => list.clone(),
            None => {
                let mut names: Vec<String> =
                    HHBLITS_DATABASES.iter().map(|s| s.to_string()).collect();
                if self.download_bfd {
                    names.push(BFD_DATABASE.to_string());
                }
                if self.download_cfdb {
                    names.push(CFDB_DATABASE.to_string());
                }
                names
            }
        }
    }
}

/// Download and unpack every selected database into `outdir`.
pub fn run(outdir: &Path, selection: &DownloadSelection, client: &dyn StorageClient) -> Result<()> {
    std::fs::create_dir_all(outdir)?;

    let jackhmmer = selection.jackhmmer_names();
    info!(databases = ?jackhmmer, "jackhmmer databases to process");
    for db in &jackhmmer {
        fetch_jackhmmer(outdir, db, client)?;
    }

    let hhblits = selection.hhblits_names();
    info!(databases = ?hhblits, "hhblits databases to process");
    for db in &hhblits {
        fetch_hhblits(outdir, db, client)?;
    }

    Ok(())
}

/// Fetch one single-FASTA database and unzip it in place.
fn fetch_jackhmmer(outdir: &Path, db: &str, client: &dyn StorageClient) -> Result<()> {
    let spec = DownloadSpec::new(outdir, db, ArchiveFamily::Jackhmmer);
    if unzipped_path(&spec.destination).exists() {
        info!(database = db, "already unpacked, skipping");
        return Ok(());
    }
    std::fs::create_dir_all(outdir.join(db))?;
    client.fetch(S3_BUCKET, &spec.key, &spec.destination)?;
    info!(database = db, "unzipping");
    gunzip_in_place(&spec.destination)?;
    Ok(())
}

/// Fetch one tarball database, extract it and delete the archive.
fn fetch_hhblits(outdir: &Path, db: &str, client: &dyn StorageClient) -> Result<()> {
    let spec = DownloadSpec::new(outdir, db, ArchiveFamily::Hhblits);
    let db_dir = outdir.join(db);
    // Presence of the directory is the only completion marker; a prior
    // partial extraction is indistinguishable from a finished one.
    if db_dir.exists() {
        info!(database = db, "directory exists, skipping");
        return Ok(());
    }
    std::fs::create_dir_all(&db_dir)?;
    client.fetch(S3_BUCKET, &spec.key, &spec.destination)?;
    info!(database = db, "extracting");
    extract_tarball(&spec.destination, outdir)?;
    // tar does not clean up after itself
    std::fs::remove_file(&spec.destination)?;
    Ok(())
}

/// The path a `.gz` archive unzips to: same name minus the suffix.
fn unzipped_path(archive: &Path) -> PathBuf {
    archive.with_extension("")
}

/// Decompress `<file>.gz` in place, replacing it with the unzipped file.
fn gunzip_in_place(archive: &Path) -> Result<()> {
    run_checked(Command::new("gunzip").arg(archive))?;
    Ok(())
}

/// Extract a `.tar.gz` archive into `dest`.
fn extract_tarball(archive: &Path, dest: &Path) -> Result<()> {
    run_checked(Command::new("tar").arg("xzf").arg(archive).arg("-C").arg(dest))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_selection_covers_base_sets_only() {
        let selection = DownloadSelection::default();
        assert_eq!(
            selection.jackhmmer_names(),
            vec!["uniprot", "uniref90", "mgnify", "pdb_seqres"]
        );
        assert_eq!(selection.hhblits_names(), vec!["uniref30"]);
    }

    #[test]
    fn test_rna_flag_appends_rna_databases() {
        let selection = DownloadSelection {
            download_rna_dbs: true,
            ..Default::default()
        };
        assert_eq!(
            selection.jackhmmer_names(),
            vec![
                "uniprot",
                "uniref90",
                "mgnify",
                "pdb_seqres",
                "rfam",
                "rnacentral",
                "nucleotide_collection"
            ]
        );
    }

    #[test]
    fn test_bfd_and_cfdb_flags_extend_hhblits_defaults() {
        let selection = DownloadSelection {
            download_bfd: true,
            download_cfdb: true,
            ..Default::default()
        };
        assert_eq!(selection.hhblits_names(), vec!["uniref30", "bfd", "cfdb"]);
    }

    #[test]
    fn test_explicit_hhblits_list_ignores_flags() {
        let selection = DownloadSelection {
            hhblits_dbs: Some(vec!["custom_db".to_string()]),
            download_bfd: true,
            download_cfdb: true,
            ..Default::default()
        };
        assert_eq!(selection.hhblits_names(), vec!["custom_db"]);
    }

    #[test]
    fn test_explicit_jackhmmer_list_replaces_defaults() {
        let selection = DownloadSelection {
            jackhmmer_dbs: Some(vec!["uniref90".to_string(), "pdb_seqres".to_string()]),
            ..Default::default()
        };
        assert_eq!(selection.jackhmmer_names(), vec!["uniref90", "pdb_seqres"]);
    }

    #[test]
    fn test_unzipped_path_strips_only_the_gz_suffix() {
        assert_eq!(
            unzipped_path(Path::new("/dbs/uniref90/uniref90.fasta.gz")),
            PathBuf::from("/dbs/uniref90/uniref90.fasta")
        );
    }
}
