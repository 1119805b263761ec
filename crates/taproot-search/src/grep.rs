//! Filesystem-backed search provider.
//!
//! Walks a directory with gitignore-aware filtering, decodes each
//! candidate file and matches a regex against every line. Files that
//! cannot be read or decoded are skipped rather than failing the
//! whole sweep.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use regex::Regex;
use taproot_core::cache::read_lines;
use taproot_core::{LineSnapshot, Result, SearchProvider, SourceLocation};

#[derive(Debug, Default)]
pub struct GrepSearcher;

impl GrepSearcher {
    pub fn new() -> Self {
        Self
    }

    /// Candidate files under `root`, honoring gitignore rules and
    /// skipping hidden entries. Sorted so hits come out in a stable
    /// order regardless of walk order.
    fn collect_files(&self, root: &Path, extensions: Option<&[&str]>) -> Vec<PathBuf> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true);

        let mut files = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::debug!(%error, "skipping unreadable entry");
                    continue;
                }
            };
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }
            let path = entry.into_path();
            if let Some(allowed) = extensions {
                let matches = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)));
                if !matches {
                    continue;
                }
            }
            files.push(path);
        }
        files.sort();
        files
    }
}

impl SearchProvider for GrepSearcher {
    fn search(
        &self,
        pattern: &str,
        root: &Path,
        extensions: Option<&[&str]>,
    ) -> Result<Vec<LineSnapshot>> {
        let matcher = Regex::new(pattern)?;
        let mut hits = Vec::new();
        for path in self.collect_files(root, extensions) {
            let lines = match read_lines(&path) {
                Ok(lines) => lines,
                Err(error) => {
                    tracing::debug!(file = %path.display(), %error, "skipping file");
                    continue;
                }
            };
            for (index, content) in lines.iter().enumerate() {
                if matcher.is_match(content) {
                    let location = SourceLocation::new(path.clone(), index);
                    hits.push(
                        LineSnapshot::new(location, content.clone())
                            .with_primary(matcher.clone()),
                    );
                }
            }
        }
        tracing::debug!(pattern, hits = hits.len(), "search finished");
        Ok(hits)
    }
}
