use std::fs;
use test_case::test_case;
use zip_resource_merge::{
    error::ErrorKind,
    merge::{MergeOptions, merge},
};
use zip_resource_merge_tests::{archive_file_build, data_path, resource_tree_build};

#[test_case(false; "in place")]
#[test_case(true; "atomic")]
fn missing_resource_root_leaves_archive_byte_identical(atomic: bool) {
    let directory = tempfile::tempdir().unwrap();
    let archive_path = archive_file_build(
        directory.path(),
        "app.jar",
        &[("meta/", b""), ("meta/info.txt", b"info")],
    )
    .unwrap();
    let archive_before = fs::read(&archive_path).unwrap();

    let error = merge(
        &archive_path,
        &directory.path().join("res"),
        &MergeOptions {
            atomic,
            ..MergeOptions::default()
        },
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ResourceRoot);
    assert_eq!(fs::read(&archive_path).unwrap(), archive_before);
    assert_eq!(fs::read_dir(directory.path()).unwrap().count(), 1);
}

#[test]
fn resource_root_being_a_file_fails() {
    let directory = tempfile::tempdir().unwrap();
    let archive_path = archive_file_build(directory.path(), "app.jar", &[]).unwrap();
    resource_tree_build(directory.path(), &[("res", b"not a directory")]).unwrap();

    let error = merge(
        &archive_path,
        &directory.path().join("res"),
        &MergeOptions::default(),
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ResourceRoot);
}

#[test_case(false; "in place")]
#[test_case(true; "atomic")]
fn missing_archive_fails_on_open(atomic: bool) {
    let directory = tempfile::tempdir().unwrap();

    let error = merge(
        &directory.path().join("missing.jar"),
        &data_path("scenario"),
        &MergeOptions {
            atomic,
            ..MergeOptions::default()
        },
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ArchiveOpen);
    assert_eq!(fs::read_dir(directory.path()).unwrap().count(), 0);
}

#[test]
fn corrupt_archive_fails_on_open_and_is_not_touched() {
    let directory = tempfile::tempdir().unwrap();
    let archive_path = directory.path().join("app.jar");
    fs::write(&archive_path, b"PK but not really a zip file").unwrap();

    let error = merge(
        &archive_path,
        &data_path("scenario"),
        &MergeOptions::default(),
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ArchiveOpen);
    assert_eq!(
        fs::read(&archive_path).unwrap(),
        b"PK but not really a zip file"
    );
}

#[test]
fn invalid_prefix_fails_before_writing() {
    let directory = tempfile::tempdir().unwrap();
    let archive_path = archive_file_build(directory.path(), "app.jar", &[]).unwrap();
    let archive_before = fs::read(&archive_path).unwrap();

    let error = merge(
        &archive_path,
        &data_path("scenario"),
        &MergeOptions {
            entry_prefix: Some("../outside".to_owned()),
            ..MergeOptions::default()
        },
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ResourceRoot);
    assert_eq!(fs::read(&archive_path).unwrap(), archive_before);
}
