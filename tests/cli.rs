use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

fn collect_files(dir: &Path, found: &mut Vec<PathBuf>) {
    for entry in std::fs::read_dir(dir).expect("readable directory") {
        let path = entry.expect("directory entry").path();
        if path.is_dir() {
            collect_files(&path, found);
        } else {
            found.push(path);
        }
    }
}

#[test]
fn full_run_writes_the_snapshot_tree() {
    let out_dir = tempfile::tempdir().expect("create temp dir");
    Command::cargo_bin("sbm_bench")
        .expect("binary builds")
        .args([
            "-n",
            "120",
            "--seed",
            "7",
            "--directory",
            out_dir.path().to_str().expect("utf8 path"),
        ])
        .assert()
        .success();

    let mut files = Vec::new();
    collect_files(out_dir.path(), &mut files);
    let edge_files = files
        .iter()
        .filter(|p| p.to_string_lossy().ends_with("_nodes.tsv"))
        .count();
    let partition_files = files
        .iter()
        .filter(|p| p.to_string_lossy().ends_with("_truePartition.tsv"))
        .count();
    // The default sweep crosses three lists of three values each.
    assert_eq!(edge_files, 27);
    assert_eq!(partition_files, 27);

    // Every path funnels through a difficulty tag directory.
    for file in &files {
        assert!(file.to_string_lossy().contains("difficulty_"));
    }
}

#[test]
fn sweep_config_shrinks_the_run() {
    let out_dir = tempfile::tempdir().expect("create temp dir");
    let mut sweep = tempfile::NamedTempFile::new().expect("create sweep file");
    writeln!(
        sweep,
        "block_exponents: [0.35]\nsize_variations: [1.0]\noverlaps: [5.0]"
    )
    .expect("write sweep file");

    Command::cargo_bin("sbm_bench")
        .expect("binary builds")
        .args([
            "-n",
            "80",
            "--seed",
            "11",
            "--directory",
            out_dir.path().to_str().expect("utf8 path"),
            "--sweep-config",
            sweep.path().to_str().expect("utf8 path"),
        ])
        .assert()
        .success();

    let mut files = Vec::new();
    collect_files(out_dir.path(), &mut files);
    assert_eq!(files.len(), 2);
}

#[test]
fn invalid_density_is_rejected_before_any_work() {
    let out_dir = tempfile::tempdir().expect("create temp dir");
    Command::cargo_bin("sbm_bench")
        .expect("binary builds")
        .args([
            "-d",
            "0.0",
            "--directory",
            out_dir.path().to_str().expect("utf8 path"),
        ])
        .assert()
        .failure();

    let mut files = Vec::new();
    collect_files(out_dir.path(), &mut files);
    assert!(files.is_empty());
}
