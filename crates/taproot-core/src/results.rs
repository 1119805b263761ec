//! Final result aggregation across queries

use crate::block::Block;
use crate::line::LineSnapshot;

/// The render target every command feeds: line snapshots kept unique by
/// location, sorted ascending by `(file, index)`. Overlapping recoveries
/// coalesce because colliding inserts merge their highlight channels.
#[derive(Debug, Default)]
pub struct ResultSet {
    lines: Vec<LineSnapshot>,
}

impl ResultSet {
    pub fn new() -> Self {
        ResultSet::default()
    }

    /// Insert in `(file, index)` order, merging into an existing entry at
    /// the same location instead of duplicating.
    pub fn add(&mut self, line: LineSnapshot) {
        match self
            .lines
            .binary_search_by(|l| l.location().cmp(line.location()))
        {
            Ok(i) => self.lines[i].merge_from(&line),
            Err(i) => self.lines.insert(i, line),
        }
    }

    /// Add every line of the block individually.
    pub fn add_block(&mut self, block: Block) {
        for line in block.into_lines() {
            self.add(line);
        }
    }

    pub fn add_all(&mut self, lines: impl IntoIterator<Item = LineSnapshot>) {
        for line in lines {
            self.add(line);
        }
    }

    pub fn lines(&self) -> &[LineSnapshot] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
