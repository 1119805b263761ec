//! Error type shared across the workspace

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures only. Heuristic misses (a line that classifies as nothing,
/// a block whose anchors are missing) are `Ok(None)` / `Ok(false)` at the
/// call site, never an `Error`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every encoding in the priority list produced decode errors.
    #[error("cannot decode {} with any supported encoding", path.display())]
    DecodeFailed { path: PathBuf },

    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
