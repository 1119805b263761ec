//! Test utilities for taproot-core

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tempfile::TempDir;

use crate::cache::FileCache;
use crate::line::LineSnapshot;
use crate::model::SourceLocation;

/// Create a temporary source tree from (relative path, content) pairs.
pub fn create_tree(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full_path = temp_dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }
    temp_dir
}

/// Snapshot with freely chosen content, for tests that never touch disk.
pub fn snapshot(file: impl Into<PathBuf>, index: usize, content: &str) -> LineSnapshot {
    LineSnapshot::new(SourceLocation::new(file, index), content)
}

/// Snapshot seeded from the actual file content at `index`.
pub fn snapshot_at(cache: &mut FileCache, file: &Path, index: usize) -> LineSnapshot {
    let location = SourceLocation::new(file, index);
    let content = cache.line(&location).unwrap().unwrap().to_string();
    LineSnapshot::new(location, content)
}

pub fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}
