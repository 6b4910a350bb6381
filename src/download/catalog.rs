//! Classification of the storage listing against the known-database table

use crate::download::s3::ListingObject;
use crate::download::{known_database_table, S3_PREFIX};

/// One row of the catalog inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub filename: String,
    pub size_bytes: u64,
    pub molecule_type: &'static str,
    pub known: bool,
}

/// Classify a listing response into display rows.
///
/// Keys are stripped of the fixed prefix; the prefix object itself (empty
/// remainder) is dropped. Unknown filenames get a blank type and no
/// checkmark.
pub fn classify(objects: &[ListingObject]) -> Vec<CatalogEntry> {
    let known = known_database_table();
    let prefix = format!("{}/", S3_PREFIX);
    objects
        .iter()
        .filter_map(|obj| {
            let filename = obj.key.strip_prefix(prefix.as_str()).unwrap_or(&obj.key);
            if filename.is_empty() {
                return None;
            }
            let molecule_type = known.get(filename).copied();
            Some(CatalogEntry {
                filename: filename.to_string(),
                size_bytes: obj.size,
                molecule_type: molecule_type.unwrap_or(""),
                known: molecule_type.is_some(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(key: &str, size: u64) -> ListingObject {
        ListingObject {
            key: key.to_string(),
            size,
        }
    }

    #[test]
    fn test_known_archive_gets_type_and_checkmark() {
        let entries = classify(&[object("alignment_databases/uniref90.fasta.gz", 1024)]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "uniref90.fasta.gz");
        assert_eq!(entries[0].molecule_type, "Protein");
        assert!(entries[0].known);
    }

    #[test]
    fn test_rna_archive_is_labelled_dna_rna() {
        let entries = classify(&[object("alignment_databases/rfam.fasta.gz", 10)]);
        assert_eq!(entries[0].molecule_type, "DNA/RNA");
        assert!(entries[0].known);
    }

    #[test]
    fn test_unknown_archive_gets_blank_type_and_no_checkmark() {
        let entries = classify(&[object("alignment_databases/mystery.fasta.gz", 10)]);
        assert_eq!(entries[0].molecule_type, "");
        assert!(!entries[0].known);
    }

    #[test]
    fn test_prefix_object_itself_is_dropped() {
        let entries = classify(&[
            object("alignment_databases/", 0),
            object("alignment_databases/bfd.tar.gz", 7),
        ]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "bfd.tar.gz");
    }
}
