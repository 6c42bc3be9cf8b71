//! Save Path Tests
//!
//! Extension normalization, atomicity, and identity stability of save.

use std::fs;

use ampoule::{Compression, Error, PipelineResult, WriteOptions};
use tempfile::tempdir;

use crate::*;

// =============================================================================
// EXTENSION NORMALIZATION
// =============================================================================

#[test]
fn test_artifact_save_normalizes_extension() {
    let dir = tempdir().unwrap();
    let artifact = sample_artifact();

    let cases = [
        ("plain", "plain.qza"),
        ("bundle.zip", "bundle.zip.qza"),
        ("already.qza", "already.qza"),
    ];
    for (given, written) in cases {
        let dest = artifact.save(dir.path().join(given)).unwrap();
        assert_eq!(dest, dir.path().join(written), "input {:?}", given);
        assert!(dest.exists());
    }
}

#[test]
fn test_visualization_save_normalizes_extension() {
    let dir = tempdir().unwrap();
    let viz = sample_visualization(dir.path());

    let cases = [
        ("report", "report.qzv"),
        ("report.html", "report.html.qzv"),
        ("report.qzv", "report.qzv"),
    ];
    for (given, written) in cases {
        let dest = viz.save(dir.path().join(given)).unwrap();
        assert_eq!(dest, dir.path().join(written), "input {:?}", given);
        assert!(dest.exists());
    }
}

#[test]
fn test_wrong_kind_extension_is_appended_not_replaced() {
    let dir = tempdir().unwrap();
    let artifact = sample_artifact();

    // An artifact saved under a visualization name keeps the stale suffix.
    let dest = artifact.save(dir.path().join("mislabelled.qzv")).unwrap();
    assert_eq!(dest, dir.path().join("mislabelled.qzv.qza"));
}

// =============================================================================
// WRITE BEHAVIOR
// =============================================================================

#[test]
fn test_save_reports_the_path_it_wrote() {
    let dir = tempdir().unwrap();
    let artifact = sample_artifact();

    let dest = artifact.save(dir.path().join("series")).unwrap();

    let on_disk: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(on_disk, vec![dest]);
}

#[test]
fn test_save_into_missing_directory_fails_cleanly() {
    let dir = tempdir().unwrap();
    let artifact = sample_artifact();
    let dest = dir.path().join("no-such-dir").join("series.qza");

    let err = artifact.save(&dest).unwrap_err();

    assert!(matches!(err, Error::Archive(_)));
    assert!(err.to_string().contains("series.qza"));
    assert!(!dest.exists());
}

#[test]
fn test_saving_twice_preserves_identity() {
    let dir = tempdir().unwrap();
    let artifact = sample_artifact();

    let first = artifact.save(dir.path().join("a.qza")).unwrap();
    let second = artifact.save(dir.path().join("b.qza")).unwrap();

    let a = PipelineResult::peek(&first).unwrap();
    let b = PipelineResult::peek(&second).unwrap();
    assert_eq!(a.uuid, artifact.uuid());
    assert_eq!(a, b);
}

#[test]
fn test_saved_archive_outlives_its_source() {
    let dir = tempdir().unwrap();
    let dest = {
        let artifact = sample_artifact();
        artifact.save(dir.path().join("kept.qza")).unwrap()
    };

    // The producer is gone along with its scratch space; the archive stands
    // on its own.
    let loaded = PipelineResult::load(&dest).unwrap();
    match loaded {
        PipelineResult::Artifact(artifact) => {
            assert_eq!(artifact.view::<Vec<i64>>().unwrap(), sample_series());
        }
        other => panic!("expected an artifact, got {:?}", other),
    }
}

#[test]
fn test_stored_compression_round_trips() {
    let dir = tempdir().unwrap();
    let artifact = sample_artifact();
    let options = WriteOptions {
        compression: Compression::Stored,
    };

    let dest = artifact
        .save_with(dir.path().join("stored.qza"), &options)
        .unwrap();

    let loaded = ampoule::Artifact::load(&dest).unwrap();
    assert_eq!(loaded.view::<Vec<i64>>().unwrap(), sample_series());
}
