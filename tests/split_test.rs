//! Integration tests for the line splitter

use std::fs;

use splitpull::core::{read_lines, split_file, split_lines, write_partition};
use splitpull::error::SplitError;
use splitpull::models::{Destination, WriteMode};

mod common;

use common::{create_test_workspace, read_bytes};

#[test]
fn test_five_line_scenario() {
    let (_temp_dir, request) = create_test_workspace(b"a\nb\nc\nd\ne\n");

    let summary = split_file(&request).unwrap();

    assert_eq!(summary.lines_read, 5);
    assert_eq!(read_bytes(&request.first), b"a\nc\ne\n".to_vec());
    assert_eq!(read_bytes(&request.second), b"b\nd\n".to_vec());
}

#[test]
fn test_overwrite_is_idempotent() {
    let (_temp_dir, request) = create_test_workspace(b"one\ntwo\nthree\n");

    split_file(&request).unwrap();
    let first_once = read_bytes(&request.first);
    let second_once = read_bytes(&request.second);

    split_file(&request).unwrap();
    assert_eq!(read_bytes(&request.first), first_once);
    assert_eq!(read_bytes(&request.second), second_once);
}

#[test]
fn test_append_accumulates() {
    let (_temp_dir, mut request) = create_test_workspace(b"one\ntwo\nthree\n");
    request.mode = WriteMode::Append;

    split_file(&request).unwrap();
    split_file(&request).unwrap();

    assert_eq!(read_bytes(&request.first), b"one\nthree\none\nthree\n".to_vec());
    assert_eq!(read_bytes(&request.second), b"two\ntwo\n".to_vec());
}

#[test]
fn test_empty_source_creates_empty_outputs() {
    let (_temp_dir, request) = create_test_workspace(b"");

    let summary = split_file(&request).unwrap();

    assert_eq!(summary.lines_read, 0);
    assert!(read_bytes(&request.first).is_empty());
    assert!(read_bytes(&request.second).is_empty());
}

#[test]
fn test_empty_source_append_keeps_content() {
    let (_temp_dir, mut request) = create_test_workspace(b"");
    request.mode = WriteMode::Append;
    fs::write(&request.first, "kept\n").unwrap();
    fs::write(&request.second, "also kept\n").unwrap();

    split_file(&request).unwrap();

    assert_eq!(read_bytes(&request.first), b"kept\n".to_vec());
    assert_eq!(read_bytes(&request.second), b"also kept\n".to_vec());
}

#[test]
fn test_single_line_goes_to_first() {
    let (_temp_dir, request) = create_test_workspace(b"lonely line");

    split_file(&request).unwrap();

    assert_eq!(read_bytes(&request.first), b"lonely line".to_vec());
    assert!(read_bytes(&request.second).is_empty());
}

#[test]
fn test_interleaving_reconstructs_source() {
    let content = b"en: hello\r\nfr: bonjour\r\nen: bye\nfr: au revoir\n\nlast";
    let (_temp_dir, request) = create_test_workspace(content);

    let lines = read_lines(&request.source).unwrap();
    let partition = split_lines(lines.clone());
    assert_eq!(partition.odd.len(), 3);
    assert_eq!(partition.even.len(), 3);

    let rebuilt: Vec<u8> = partition.interleave().concat();
    assert_eq!(rebuilt, content.to_vec());
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_write_partition_directly() {
    let (_temp_dir, request) = create_test_workspace(b"");
    let partition = split_lines(vec!["x\n", "y\n", "z\n"]);

    write_partition(&partition, &request.first, &request.second, WriteMode::Overwrite).unwrap();

    assert_eq!(read_bytes(&request.first), b"x\nz\n".to_vec());
    assert_eq!(read_bytes(&request.second), b"y\n".to_vec());
}

#[test]
fn test_nonexistent_source() {
    let (temp_dir, mut request) = create_test_workspace(b"");
    request.source = temp_dir.path().join("does_not_exist.txt");

    let err = split_file(&request).unwrap_err();

    assert!(matches!(err, SplitError::SourceRead { .. }));
    assert!(!request.first.exists());
    assert!(!request.second.exists());
}

#[test]
fn test_unwritable_first_destination() {
    let (temp_dir, mut request) = create_test_workspace(b"a\nb\n");
    request.first = temp_dir.path().join("missing_dir").join("out.txt");

    let err = split_file(&request).unwrap_err();

    assert_eq!(err.destination(), Some(Destination::First));
    assert!(err.to_string().contains("destination 1"));
    assert!(!request.second.exists());
}

#[test]
fn test_destination_is_a_directory() {
    let (temp_dir, mut request) = create_test_workspace(b"a\nb\n");
    let dir = temp_dir.path().join("a_directory");
    fs::create_dir(&dir).unwrap();
    request.second = dir;

    let err = split_file(&request).unwrap_err();

    assert_eq!(err.destination(), Some(Destination::Second));
    assert_eq!(read_bytes(&request.first), b"a\n".to_vec());
}

#[cfg(unix)]
#[test]
fn test_read_only_destination_directory() {
    use std::os::unix::fs::PermissionsExt;

    let (temp_dir, mut request) = create_test_workspace(b"a\nb\n");
    let locked = temp_dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
    request.first = locked.join("out.txt");

    // Privileged users can still create files in a 0o555 directory
    let writable = fs::write(locked.join("check.txt"), b"").is_ok();
    let result = if writable { None } else { Some(split_file(&request)) };

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let Some(result) = result else {
        return;
    };
    let err = result.unwrap_err();
    assert_eq!(err.destination(), Some(Destination::First));
    assert!(matches!(err, SplitError::DestinationWrite { .. }));
    assert!(!request.first.exists());
    assert!(!request.second.exists());
}
