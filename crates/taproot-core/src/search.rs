//! Port for the multi-file text search every command leans on

use std::path::Path;

use crate::error::Result;
use crate::line::LineSnapshot;

/// Multi-file pattern search over a directory tree. Implementations return
/// hits ascending by `(file, index)` with the pattern installed as each
/// hit's primary highlight. No matches is an empty vec, never an error; an
/// unparseable pattern is.
pub trait SearchProvider {
    /// `extensions`, when given, restricts which files are scanned.
    fn search(
        &self,
        pattern: &str,
        root: &Path,
        extensions: Option<&[&str]>,
    ) -> Result<Vec<LineSnapshot>>;
}
