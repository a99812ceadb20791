// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

use git2::{Repository, Signature, Time};
use serial_test::serial;
use tempfile::TempDir;

use repo_miner::dataset::{self, CsvWriter, OutputDirectory, DATASET_FIELDS};
use repo_miner::domain::VersionPattern;
use repo_miner::mining::RepositoryMiner;
use repo_miner::tracker::LocalTracker;

// Seconds since the epoch for the two fixture releases
const T_2020_01_01: i64 = 1_577_836_800;
const T_2020_06_01: i64 = 1_590_969_600;

fn signature(seconds: i64) -> Signature<'static> {
    Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
        .expect("Could not create signature")
}

fn commit_file(
    repo: &Repository,
    path: &str,
    content: &str,
    message: &str,
    seconds: i64,
) -> git2::Oid {
    let workdir = repo.workdir().expect("bare fixture repo");
    let file_path = workdir.join(path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Could not create parent dir");
    }
    fs::write(&file_path, content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(path))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    let sig = signature(seconds);
    let parents: Vec<git2::Commit> = repo
        .head()
        .ok()
        .and_then(|h| h.peel_to_commit().ok())
        .into_iter()
        .collect();
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .expect("Could not create commit")
}

/// Two commits, two tags: 1.0.0 on the initial import (2020-01-01) and
/// 2.0.0 on a fix commit (2020-06-01).
fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    let first = commit_file(
        &repo,
        "src/Main.java",
        "line1\nline2\n",
        "Initial import",
        T_2020_01_01,
    );
    repo.tag_lightweight("1.0.0", &repo.find_object(first, None).unwrap(), false)
        .expect("Could not create tag");

    let second = commit_file(
        &repo,
        "src/Main.java",
        "line1\nline2\nline3\n",
        "fix: handle empty input",
        T_2020_06_01,
    );
    repo.tag_lightweight("2.0.0", &repo.find_object(second, None).unwrap(), false)
        .expect("Could not create tag");

    temp_dir
}

#[test]
#[serial]
fn test_full_mining_run_over_a_real_repository() {
    let repo_dir = setup_test_repo();
    let pattern = VersionPattern::new(r"^(refs\/tags\/)(?<name>\d+\.\d+\.\d+)$").unwrap();

    let miner = RepositoryMiner::new(
        repo_dir.path(),
        "unused-url",
        Some("TEST"),
        &pattern,
        Box::new(LocalTracker::new()),
    )
    .expect("Miner should assemble over an existing repository");

    assert_eq!(miner.timeline().len(), 2);
    assert_eq!(miner.timeline().get(1).unwrap().name, "1.0.0");
    assert_eq!(miner.timeline().get(2).unwrap().name, "2.0.0");

    let mut state = miner.project_state();

    // Release 1: the initial import
    assert!(state.next().unwrap());
    let main = state.state("src/Main.java").unwrap();
    assert_eq!(main.loc(), 2);
    assert_eq!(main.added_loc(), 2);
    assert_eq!(main.revisions(), 1);
    assert_eq!(main.fixes(), 0);
    assert!(!main.buggy());

    // Release 2: the fix commit lands and labels the file
    assert!(state.next().unwrap());
    let main = state.state("src/Main.java").unwrap();
    assert_eq!(main.loc(), 3);
    assert_eq!(main.revisions(), 2);
    assert_eq!(main.fixes(), 1);
    assert_eq!(main.authors(), 1);
    assert!(main.buggy());

    assert!(!state.next().unwrap());
}

#[test]
#[serial]
fn test_dataset_written_release_by_release() {
    let repo_dir = setup_test_repo();
    let out_dir = TempDir::new().unwrap();
    let output = OutputDirectory::new(out_dir.path().join("out"), out_dir.path().join("repos"))
        .unwrap();

    let pattern = VersionPattern::new(r"^(refs\/tags\/)(?<name>\d+\.\d+\.\d+)$").unwrap();
    let miner = RepositoryMiner::new(
        repo_dir.path(),
        "unused-url",
        Some("TEST"),
        &pattern,
        Box::new(LocalTracker::new()),
    )
    .unwrap();

    let csv_path = output.csv_path("fixture");
    let mut writer = CsvWriter::create(&csv_path, &DATASET_FIELDS).unwrap();
    writer.write_header().unwrap();

    let mut state = miner.project_state();
    let mut rows = 0;
    while state.next().unwrap() {
        rows += dataset::write_release(&mut writer, &state).unwrap();
    }

    // Release 1 exports unconditionally (cutoff = 1); release 2 exports
    // because the fix labeled the file buggy
    assert_eq!(rows, 2);

    let content = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Version,File Name,LOC"));
    assert!(lines[1].starts_with("1,src/Main.java,2,"));
    assert!(lines[1].ends_with(",NO"));
    assert!(lines[2].starts_with("2,src/Main.java,3,"));
    assert!(lines[2].ends_with(",YES"));
}

#[test]
fn test_cli_requires_both_folders() {
    let output = Command::new(env!("CARGO_BIN_EXE_repo-miner"))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.to_lowercase().contains("usage"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_repo-miner"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("repo-miner"));
    assert!(stdout.contains("output"));
}
