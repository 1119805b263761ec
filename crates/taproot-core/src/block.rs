//! Growable blocks of source lines recovered around a seed

use regex::Regex;

use crate::cache::FileCache;
use crate::error::Result;
use crate::line::LineSnapshot;
use crate::model::{LangTag, SourceLocation};

/// An ordered, location-deduplicated run of line snapshots recovered around
/// one seed line, with `start`/`end` markers naming the construct's anchor
/// lines. Growth primitives walk the file through the cache; a walk that
/// hits its stop pattern or runs off the file empties the block entirely,
/// since a truncated construct is worse than none.
#[derive(Debug, Clone)]
pub struct Block {
    lang: LangTag,
    lines: Vec<LineSnapshot>,
    start: Option<SourceLocation>,
    end: Option<SourceLocation>,
}

impl Block {
    /// A block holding one seed line; both markers point at the seed until
    /// a growth primitive moves them.
    pub fn new(lang: LangTag, seed: LineSnapshot) -> Self {
        let location = seed.location().clone();
        Block {
            lang,
            lines: vec![seed],
            start: Some(location.clone()),
            end: Some(location),
        }
    }

    pub fn lang(&self) -> LangTag {
        self.lang
    }

    pub fn lines(&self) -> &[LineSnapshot] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<LineSnapshot> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn start(&self) -> Option<&LineSnapshot> {
        self.find(self.start.as_ref()?)
    }

    pub fn end(&self) -> Option<&LineSnapshot> {
        self.find(self.end.as_ref()?)
    }

    fn find(&self, location: &SourceLocation) -> Option<&LineSnapshot> {
        self.lines.iter().find(|l| l.location() == location)
    }

    /// Insert keeping `(file, index)` order. A line already present at that
    /// location absorbs the incoming highlight channels instead of
    /// duplicating.
    pub fn add(&mut self, line: LineSnapshot) {
        match self
            .lines
            .binary_search_by(|l| l.location().cmp(line.location()))
        {
            Ok(i) => self.lines[i].merge_from(&line),
            Err(i) => self.lines.insert(i, line),
        }
    }

    /// Abandon the walk: an aborted block keeps nothing, not even its seed.
    fn abort(&mut self) -> bool {
        self.lines.clear();
        self.start = None;
        self.end = None;
        false
    }

    /// Walk upward from the first line, collecting every line passed, until
    /// `target` matches; the matching line is collected too and becomes
    /// `start`. A `stop` match or the top of the file aborts.
    pub fn fill_up_until(
        &mut self,
        cache: &mut FileCache,
        target: &Regex,
        stop: Option<&Regex>,
    ) -> Result<bool> {
        let Some(first) = self.lines.first() else {
            return Ok(false);
        };
        let mut cursor = first.clone();
        loop {
            cursor = match cursor.up(cache)? {
                Some(above) => above,
                None => return Ok(self.abort()),
            };
            if stop.is_some_and(|s| cursor.matches(s)) {
                return Ok(self.abort());
            }
            if cursor.matches(target) {
                self.start = Some(cursor.location().clone());
                self.add(cursor);
                return Ok(true);
            }
            self.add(cursor.clone());
        }
    }

    /// Walk downward from the block's first line, collecting lines until
    /// `target` matches; the matching line becomes `end`. Lines already in
    /// the block are walked over again, so a target sitting on the first
    /// line matches before the walk reaches any line below it. A `stop`
    /// match or the end of the file aborts.
    pub fn fill_down_until(
        &mut self,
        cache: &mut FileCache,
        target: &Regex,
        stop: Option<&Regex>,
    ) -> Result<bool> {
        let Some(mut cursor) = self.lines.first().cloned() else {
            return Ok(false);
        };
        loop {
            if stop.is_some_and(|s| cursor.matches(s)) {
                return Ok(self.abort());
            }
            if cursor.matches(target) {
                self.end = Some(cursor.location().clone());
                self.add(cursor);
                return Ok(true);
            }
            self.add(cursor.clone());
            cursor = match cursor.down(cache)? {
                Some(below) => below,
                None => return Ok(self.abort()),
            };
        }
    }

    /// Sparse upward anchor search: lines walked over are not collected,
    /// only the first `target` match is added and becomes `start`. The
    /// block's first line is accepted outright if it already matches.
    pub fn get_start_with(
        &mut self,
        cache: &mut FileCache,
        target: &Regex,
        stop: Option<&Regex>,
    ) -> Result<bool> {
        let Some(first) = self.lines.first() else {
            return Ok(false);
        };
        if first.matches(target) {
            self.start = Some(first.location().clone());
            return Ok(true);
        }
        let mut cursor = first.clone();
        loop {
            cursor = match cursor.up(cache)? {
                Some(above) => above,
                None => return Ok(self.abort()),
            };
            if stop.is_some_and(|s| cursor.matches(s)) {
                return Ok(self.abort());
            }
            if cursor.matches(target) {
                self.start = Some(cursor.location().clone());
                self.add(cursor);
                return Ok(true);
            }
        }
    }

    /// Sparse downward anchor search: only the first `target` match below
    /// the last line is added, becoming `end`. The last line is accepted
    /// outright if it already matches.
    pub fn get_end_with(&mut self, cache: &mut FileCache, target: &Regex) -> Result<bool> {
        let Some(last) = self.lines.last() else {
            return Ok(false);
        };
        if last.matches(target) {
            self.end = Some(last.location().clone());
            return Ok(true);
        }
        let mut cursor = last.clone();
        loop {
            cursor = match cursor.down(cache)? {
                Some(below) => below,
                None => return Ok(self.abort()),
            };
            if cursor.matches(target) {
                self.end = Some(cursor.location().clone());
                self.add(cursor);
                return Ok(true);
            }
        }
    }

    /// Backfill every line strictly between the two markers. Does nothing
    /// unless both markers are set and lie in the same file.
    pub fn fill_full(&mut self, cache: &mut FileCache) -> Result<()> {
        let (Some(start), Some(end)) = (self.start.clone(), self.end.clone()) else {
            return Ok(());
        };
        if start.file != end.file {
            return Ok(());
        }
        for index in start.index + 1..end.index {
            let location = SourceLocation::new(start.file.clone(), index);
            let content = match cache.line(&location)? {
                Some(text) => text.to_string(),
                None => break,
            };
            self.add(LineSnapshot::new(location, content));
        }
        Ok(())
    }
}
