//! Single-slot cache of the most recently loaded file's lines

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use crate::error::{Error, Result};
use crate::model::SourceLocation;

/// Decode priority when a file carries no byte-order mark. Windows-1252
/// (the WHATWG reading of iso-8859-1) accepts every byte sequence, so it
/// sits last as the catch-all.
static ENCODINGS: &[&Encoding] = &[
    encoding_rs::UTF_8,
    encoding_rs::UTF_16LE,
    encoding_rs::UTF_16BE,
    encoding_rs::WINDOWS_1252,
];

/// Holds exactly one file's decoded lines at a time; requesting a different
/// file evicts the previous one. Owned by the run context and passed by
/// `&mut` to everything that resolves line content.
#[derive(Debug, Default)]
pub struct FileCache {
    slot: Option<(PathBuf, Vec<String>)>,
}

impl FileCache {
    pub fn new() -> Self {
        FileCache { slot: None }
    }

    /// The file's lines, loading (and evicting the previous file) on miss.
    pub fn lines(&mut self, path: &Path) -> Result<&[String]> {
        let hit = matches!(&self.slot, Some((cached, _)) if cached == path);
        if !hit {
            // Load fully before touching the slot so a failure leaves the
            // cached entry intact.
            let lines = read_lines(path)?;
            tracing::debug!(file = %path.display(), lines = lines.len(), "cached file");
            self.slot = Some((path.to_path_buf(), lines));
        }
        Ok(self.slot.as_ref().map(|(_, l)| l.as_slice()).unwrap_or(&[]))
    }

    /// Content at `location`, or `None` when the index is past the end.
    pub fn line(&mut self, location: &SourceLocation) -> Result<Option<&str>> {
        let lines = self.lines(&location.file)?;
        Ok(lines.get(location.index).map(String::as_str))
    }

    pub fn line_count(&mut self, path: &Path) -> Result<usize> {
        Ok(self.lines(path)?.len())
    }

    #[cfg(test)]
    pub(crate) fn cached_file(&self) -> Option<&Path> {
        self.slot.as_ref().map(|(p, _)| p.as_path())
    }
}

/// Read and decode a file without going through a cache. Lines come back
/// right-trimmed; trailing whitespace would defeat the end-of-line anchors
/// the block recipes rely on.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let text = decode(&bytes).ok_or_else(|| Error::DecodeFailed {
        path: path.to_path_buf(),
    })?;
    Ok(text.lines().map(|l| l.trim_end().to_string()).collect())
}

/// Decode with the first encoding that produces no replacement characters:
/// a byte-order mark is trusted outright, then the fixed priority list.
fn decode(bytes: &[u8]) -> Option<String> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        let (text, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Some(text.into_owned());
        }
    }
    for encoding in ENCODINGS {
        let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
        if !had_errors {
            return Some(text.into_owned());
        }
    }
    None
}
