//! Immutable snapshots of single source lines

use std::path::Path;

use regex::Regex;

use crate::cache::FileCache;
use crate::error::Result;
use crate::model::SourceLocation;

const RED: &str = "\x1b[0;31m";
const CYAN: &str = "\x1b[0;36m";
const RESET: &str = "\x1b[0m";

/// One line of one file, captured at read time. Carries up to two highlight
/// channels for rendering: primary (the pattern that matched the line) and
/// secondary (a recovered symbol name). Navigation never mutates a snapshot;
/// `up`/`down` hand back fresh snapshots resolved through the cache.
#[derive(Debug, Clone)]
pub struct LineSnapshot {
    location: SourceLocation,
    content: String,
    primary: Option<Regex>,
    secondary: Option<Regex>,
}

impl LineSnapshot {
    pub fn new(location: SourceLocation, content: impl Into<String>) -> Self {
        LineSnapshot {
            location,
            content: content.into(),
            primary: None,
            secondary: None,
        }
    }

    pub fn with_primary(mut self, pattern: Regex) -> Self {
        self.primary = Some(pattern);
        self
    }

    pub fn with_secondary(mut self, pattern: Regex) -> Self {
        self.secondary = Some(pattern);
        self
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn file(&self) -> &Path {
        self.location.file()
    }

    /// Zero-based line index.
    pub fn index(&self) -> usize {
        self.location.index
    }

    /// One-based line number.
    pub fn line_number(&self) -> usize {
        self.location.line_number()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn primary(&self) -> Option<&Regex> {
        self.primary.as_ref()
    }

    pub fn secondary(&self) -> Option<&Regex> {
        self.secondary.as_ref()
    }

    pub fn matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.content)
    }

    /// The snapshot one line up, or `None` at the top of the file. The
    /// primary highlight belongs to the matched line and is dropped; the
    /// secondary channel travels with the walk.
    pub fn up(&self, cache: &mut FileCache) -> Result<Option<LineSnapshot>> {
        if self.location.index == 0 {
            return Ok(None);
        }
        self.relocate(self.location.index - 1, cache)
    }

    /// The snapshot one line down, or `None` past the end of the file.
    pub fn down(&self, cache: &mut FileCache) -> Result<Option<LineSnapshot>> {
        self.relocate(self.location.index + 1, cache)
    }

    fn relocate(&self, index: usize, cache: &mut FileCache) -> Result<Option<LineSnapshot>> {
        let location = SourceLocation::new(self.location.file.clone(), index);
        let content = match cache.line(&location)? {
            Some(text) => text.to_string(),
            None => return Ok(None),
        };
        Ok(Some(LineSnapshot {
            location,
            content,
            primary: None,
            secondary: self.secondary.clone(),
        }))
    }

    /// `^` anchored to this line's exact leading whitespace, followed by
    /// `suffix` verbatim. The block recipes use this to find closers at the
    /// same indentation as an opener.
    pub fn indentation_pattern(&self, suffix: &str) -> String {
        let indent_len = self.content.len() - self.content.trim_start().len();
        format!("^{}{}", regex::escape(&self.content[..indent_len]), suffix)
    }

    /// Adopt the other snapshot's highlight channels: an incoming pattern
    /// wins its channel, an absent one leaves ours alone.
    pub fn merge_from(&mut self, other: &LineSnapshot) {
        if let Some(pattern) = &other.primary {
            self.primary = Some(pattern.clone());
        }
        if let Some(pattern) = &other.secondary {
            self.secondary = Some(pattern.clone());
        }
    }

    /// `file:line : content` with every highlight occurrence recolored,
    /// primary in red and secondary in cyan. Quiet mode is the bare content.
    pub fn render(&self, quiet: bool) -> String {
        if quiet {
            return self.content.clone();
        }
        let mut content = self.content.clone();
        if let Some(pattern) = &self.primary {
            content = pattern
                .replace_all(&content, format!("{RED}${{0}}{RESET}"))
                .into_owned();
        }
        if let Some(pattern) = &self.secondary {
            content = pattern
                .replace_all(&content, format!("{CYAN}${{0}}{RESET}"))
                .into_owned();
        }
        format!(
            "{}:{:<5}: {}",
            self.location.file.display(),
            self.location.line_number(),
            content
        )
    }
}
