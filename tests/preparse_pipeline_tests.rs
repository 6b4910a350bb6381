use std::fs::File;
use std::path::Path;

use foldprep::msa::preparse;
use foldprep::msa::MaxSeqCounts;
use ndarray::Array2;
use ndarray_npy::NpzReader;
use tempfile::TempDir;

fn write_chain_a3m(alignments_dir: &Path, chain: &str, contents: &str) {
    let chain_dir = alignments_dir.join(chain);
    std::fs::create_dir_all(&chain_dir).unwrap();
    std::fs::write(chain_dir.join("uniref90_hits.a3m"), contents).unwrap();
}

fn read_array(npz_path: &Path, database: &str) -> Array2<u8> {
    let mut npz = NpzReader::new(File::open(npz_path).unwrap()).unwrap();
    let names: Vec<String> = npz.names().unwrap();
    let key = names
        .iter()
        .find(|n| n.trim_end_matches(".npy") == database)
        .unwrap_or_else(|| panic!("no {} entry in {}", database, npz_path.display()))
        .clone();
    npz.by_name(&key).unwrap()
}

#[test]
fn every_chain_produces_one_capped_npz_archive() {
    let alignments = TempDir::new().unwrap();
    let arrays = TempDir::new().unwrap();

    let a3m = ">query\nMKVLA\n>hit1\nMKVLG\n>hit2\nMKVLC\n";
    write_chain_a3m(alignments.path(), "A", a3m);
    write_chain_a3m(alignments.path(), "B", a3m);

    let limits = MaxSeqCounts::from_json(r#"{"uniref90_hits": 2}"#).unwrap();
    preparse::run(alignments.path(), arrays.path(), &limits.into_map(), 2).unwrap();

    for chain in ["A", "B"] {
        let npz_path = arrays.path().join(format!("{chain}.npz"));
        assert!(npz_path.exists(), "{chain}.npz missing");
        let arr = read_array(&npz_path, "uniref90_hits");
        assert_eq!(arr.nrows(), 2, "cap of 2 not applied for chain {chain}");
        assert_eq!(arr.ncols(), 5);
    }
}

#[test]
fn a_poisoned_chain_does_not_stop_the_batch() {
    let alignments = TempDir::new().unwrap();
    let arrays = TempDir::new().unwrap();

    write_chain_a3m(alignments.path(), "good1", ">q\nMKVLA\n>h\nMKVLG\n");
    write_chain_a3m(alignments.path(), "good2", ">q\nMKVLA\n>h\nMKVLG\n");
    // Ragged alignment: the second row is shorter than the query
    write_chain_a3m(alignments.path(), "bad", ">q\nMKVLA\n>h\nMK\n");

    let limits = MaxSeqCounts::from_json(r#"{"uniref90_hits": 100}"#).unwrap();
    preparse::run(alignments.path(), arrays.path(), &limits.into_map(), 2).unwrap();

    assert!(arrays.path().join("good1.npz").exists());
    assert!(arrays.path().join("good2.npz").exists());
    assert!(
        !arrays.path().join("bad.npz").exists(),
        "failed chain must not leave an output file"
    );
}

#[test]
fn single_worker_pool_processes_all_chains() {
    let alignments = TempDir::new().unwrap();
    let arrays = TempDir::new().unwrap();

    for chain in ["1abc_A", "1abc_B", "2xyz_A"] {
        write_chain_a3m(alignments.path(), chain, ">q\nMKV\n");
    }

    let limits = MaxSeqCounts::from_json(r#"{"uniref90_hits": 10}"#).unwrap();
    preparse::run(alignments.path(), arrays.path(), &limits.into_map(), 1).unwrap();

    let outputs: Vec<_> = std::fs::read_dir(arrays.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(outputs.len(), 3);
}

#[test]
fn uncapped_databases_are_left_out_of_the_archive() {
    let alignments = TempDir::new().unwrap();
    let arrays = TempDir::new().unwrap();

    let chain_dir = alignments.path().join("A");
    std::fs::create_dir_all(&chain_dir).unwrap();
    std::fs::write(chain_dir.join("uniref90_hits.a3m"), ">q\nMKV\n").unwrap();
    std::fs::write(chain_dir.join("mgnify_hits.a3m"), ">q\nMKV\n").unwrap();

    let limits = MaxSeqCounts::from_json(r#"{"uniref90_hits": 10}"#).unwrap();
    preparse::run(alignments.path(), arrays.path(), &limits.into_map(), 1).unwrap();

    let mut npz = NpzReader::new(File::open(arrays.path().join("A.npz")).unwrap()).unwrap();
    let names: Vec<String> = npz.names().unwrap();
    let stems: Vec<&str> = names.iter().map(|n| n.trim_end_matches(".npy")).collect();
    assert_eq!(stems, vec!["uniref90_hits"]);
}
