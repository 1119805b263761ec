//! Identity types shared by every component

use std::path::{Path, PathBuf};

/// One line of one file. Equality and ordering are defined solely by the
/// `(file, index)` pair; line content never participates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// Zero-based line index.
    pub index: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, index: usize) -> Self {
        SourceLocation {
            file: file.into(),
            index,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// One-based line number, the form every rendered surface uses.
    pub fn line_number(&self) -> usize {
        self.index + 1
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line_number())
    }
}

/// Identity of the language family that produced a block. Carried by blocks
/// so the caller-tree search can keep each branch inside the extensions of
/// the language it started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LangTag {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

impl LangTag {
    pub const fn new(name: &'static str, extensions: &'static [&'static str]) -> Self {
        LangTag { name, extensions }
    }

    /// Whether `path` carries one of this language's file extensions.
    pub fn covers(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}
