//! Taproot Core: the shared data model of line snapshots and the blocks
//! recovered around them.

pub mod block;
pub mod cache;
pub mod error;
pub mod line;
pub mod model;
pub mod results;
pub mod search;


#[cfg(test)]
pub mod test_utils;

pub use block::Block;
pub use cache::FileCache;
pub use error::{Error, Result};
pub use line::LineSnapshot;
pub use model::{LangTag, SourceLocation};
pub use results::ResultSet;
pub use search::SearchProvider;
