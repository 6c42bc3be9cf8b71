//! Inspection Path Tests
//!
//! Peek and extract against well-formed and malformed archives, exercised
//! through the result API only.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use ampoule::PipelineResult;
use tempfile::tempdir;
use uuid::Uuid;

use crate::*;

// =============================================================================
// RAW ARCHIVE HELPERS
// =============================================================================

const RAW_UUID: &str = "550e8400-e29b-41d4-a716-446655440000";

fn write_raw_zip(path: &Path, entries: &[(String, String)]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::FileOptions::default();
    for (name, body) in entries {
        zip.start_file(name.as_str(), options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn raw_metadata(uuid: &str) -> String {
    format!("uuid: {}\ntype: IntSeries\nformat: SomeFormat\n", uuid)
}

fn raw_entries(uuid: &str) -> Vec<(String, String)> {
    vec![
        (format!("{}/VERSION", uuid), "1\n".to_string()),
        (format!("{}/metadata.yaml", uuid), raw_metadata(uuid)),
        (format!("{}/data/ints.txt", uuid), "1\n".to_string()),
    ]
}

fn raw_archive(dir: &Path, name: &str, entries: &[(String, String)]) -> PathBuf {
    let path = dir.join(name);
    write_raw_zip(&path, entries);
    path
}

// =============================================================================
// PEEK
// =============================================================================

#[test]
fn test_peek_matches_saved_artifact() {
    let dir = tempdir().unwrap();
    let artifact = sample_artifact();
    let dest = artifact.save(dir.path().join("series.qza")).unwrap();

    let record = PipelineResult::peek(&dest).unwrap();

    assert_eq!(record.uuid, artifact.uuid());
    assert_eq!(record.type_name, artifact.semantic_type().name());
    assert_eq!(record.format.as_deref(), Some(SERIES_FORMAT));
    assert!(record.is_artifact());
}

#[test]
fn test_peek_visualization_has_no_format() {
    let dir = tempdir().unwrap();
    let viz = sample_visualization(dir.path());
    let dest = viz.save(dir.path().join("report.qzv")).unwrap();

    let record = PipelineResult::peek(&dest).unwrap();

    assert_eq!(record.uuid, viz.uuid());
    assert_eq!(record.type_name, "Visualization");
    assert_eq!(record.format, None);
    assert!(!record.is_artifact());
}

#[test]
fn test_peek_agrees_with_load() {
    let dir = tempdir().unwrap();
    let dest = sample_artifact().save(dir.path().join("series")).unwrap();

    let record = PipelineResult::peek(&dest).unwrap();
    let loaded = PipelineResult::load(&dest).unwrap();

    assert_eq!(record.uuid, loaded.uuid());
    assert_eq!(record.type_name, loaded.semantic_type().name());
}

// =============================================================================
// EXTRACT
// =============================================================================

#[test]
fn test_extract_artifact_member_set_is_exact() {
    let dir = tempdir().unwrap();
    let dest = sample_artifact().save(dir.path().join("series")).unwrap();

    assert_eq!(archive_members(&dest), expected_artifact_members());

    let root = PipelineResult::extract(&dest, dir.path().join("out")).unwrap();
    assert_eq!(tree_files(&root), expected_artifact_members());
    assert_eq!(
        fs::read_to_string(root.join("data").join("file1.txt")).unwrap(),
        "7\n"
    );
    assert_eq!(fs::read_to_string(root.join("VERSION")).unwrap(), "1\n");
}

#[test]
fn test_extract_visualization_member_set_is_exact() {
    let dir = tempdir().unwrap();
    let dest = sample_visualization(dir.path())
        .save(dir.path().join("report"))
        .unwrap();

    assert_eq!(archive_members(&dest), expected_visualization_members());

    let root = PipelineResult::extract(&dest, dir.path().join("out")).unwrap();
    assert_eq!(tree_files(&root), expected_visualization_members());
}

#[test]
fn test_extract_root_is_the_uuid_under_output_dir() {
    let dir = tempdir().unwrap();
    let artifact = sample_artifact();
    let dest = artifact.save(dir.path().join("series")).unwrap();

    let out = dir.path().join("deep").join("out");
    let root = PipelineResult::extract(&dest, &out).unwrap();

    // A missing output directory is created on the way.
    assert_eq!(root.parent(), Some(out.as_path()));
    assert_eq!(
        root.file_name().unwrap().to_str().unwrap(),
        artifact.uuid().to_string()
    );
}

#[test]
fn test_extract_never_reads_the_identity_record() {
    let dir = tempdir().unwrap();
    let mut entries = raw_entries(RAW_UUID);
    entries[1].1 = "{ not yaml".to_string();
    let path = raw_archive(dir.path(), "bad-record.qza", &entries);

    // Peek needs the record; extract is pure materialization.
    assert!(PipelineResult::peek(&path).unwrap_err().is_malformed());
    let root = PipelineResult::extract(&path, dir.path().join("out")).unwrap();
    assert_eq!(
        fs::read_to_string(root.join("metadata.yaml")).unwrap(),
        "{ not yaml"
    );
}

#[test]
fn test_extract_tolerates_identity_mismatch() {
    let dir = tempdir().unwrap();
    let mut entries = raw_entries(RAW_UUID);
    entries[1].1 = raw_metadata(&Uuid::new_v4().to_string());
    let path = raw_archive(dir.path(), "mismatch.qza", &entries);

    let err = PipelineResult::peek(&path).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("does not match"));

    assert!(PipelineResult::extract(&path, dir.path().join("out")).is_ok());
}

// =============================================================================
// MALFORMED ARCHIVES ARE REJECTED UNIFORMLY
// =============================================================================

#[test]
fn test_missing_version_is_rejected_by_every_operation() {
    let dir = tempdir().unwrap();
    let mut entries = raw_entries(RAW_UUID);
    entries.remove(0);
    let path = raw_archive(dir.path(), "no-version.qza", &entries);

    for err in [
        PipelineResult::load(&path).unwrap_err(),
        PipelineResult::peek(&path).unwrap_err(),
        PipelineResult::extract(&path, dir.path().join("out")).unwrap_err(),
    ] {
        assert!(err.is_malformed(), "unexpected error: {}", err);
        assert!(err.to_string().contains("VERSION"));
    }
}

#[test]
fn test_unknown_version_token_is_named_by_every_operation() {
    let dir = tempdir().unwrap();
    let mut entries = raw_entries(RAW_UUID);
    entries[0].1 = "99\n".to_string();
    let path = raw_archive(dir.path(), "future.qza", &entries);

    for err in [
        PipelineResult::load(&path).unwrap_err(),
        PipelineResult::peek(&path).unwrap_err(),
        PipelineResult::extract(&path, dir.path().join("out")).unwrap_err(),
    ] {
        assert!(err.is_unsupported_version(), "unexpected error: {}", err);
        assert!(err.to_string().contains("99"));
    }
}

#[test]
fn test_two_top_level_roots_are_malformed() {
    let dir = tempdir().unwrap();
    let mut entries = raw_entries(RAW_UUID);
    entries.push(("intruder/VERSION".to_string(), "1\n".to_string()));
    let path = raw_archive(dir.path(), "two-roots.qza", &entries);

    let err = PipelineResult::load(&path).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_non_uuid_root_is_malformed() {
    let dir = tempdir().unwrap();
    let entries: Vec<(String, String)> = raw_entries(RAW_UUID)
        .into_iter()
        .map(|(name, body)| (name.replace(RAW_UUID, "results"), body))
        .collect();
    let path = raw_archive(dir.path(), "named-root.qza", &entries);

    let err = PipelineResult::peek(&path).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_non_archive_file_is_a_container_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("not-a-zip.qza");
    fs::write(&path, "just some text\n").unwrap();

    let err = PipelineResult::load(&path).unwrap_err();
    assert!(!err.is_malformed());
    assert!(matches!(err, ampoule::Error::Archive(_)));
}
