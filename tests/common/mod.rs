//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use splitpull::core::SplitRequest;
use splitpull::models::WriteMode;

/// Create a test workspace with a source file holding `content`
pub fn create_test_workspace(content: &[u8]) -> (TempDir, SplitRequest) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().to_path_buf();

    let source = root.join("corpus.txt");
    fs::write(&source, content).expect("Failed to write source file");

    let request = SplitRequest {
        source,
        first: root.join("source_lang.txt"),
        second: root.join("target_lang.txt"),
        mode: WriteMode::Overwrite,
    };

    (temp_dir, request)
}

/// Create a directory standing in for a local repository
pub fn create_repo_dir(root: &PathBuf, name: &str) -> PathBuf {
    let path = root.join(name);
    fs::create_dir_all(&path).expect("Failed to create repo dir");
    path
}

/// Read a file as raw bytes
pub fn read_bytes(path: &PathBuf) -> Vec<u8> {
    fs::read(path).expect("Failed to read file")
}
