//! Taproot Lang: per-language rules that turn one matched line into a
//! recovered construct.

pub mod cfamily;


use std::path::Path;

use regex::Regex;
use taproot_core::{Block, FileCache, LangTag, LineSnapshot, Result};

pub use cfamily::{C_FAMILY, CFamily};

/// Capability surface of one language family. Everything is best-effort:
/// a line that does not fit any construct shape yields `Ok(None)`, never an
/// error.
pub trait Language {
    fn tag(&self) -> LangTag;

    /// Recover the construct defined at `seed`, where `pattern` is the
    /// search expression that produced the hit. `None` when the line does
    /// not open a definition this language recognizes or the construct's
    /// anchors cannot be found.
    fn classify(
        &self,
        cache: &mut FileCache,
        seed: &LineSnapshot,
        pattern: &Regex,
    ) -> Result<Option<Block>>;

    /// Best-effort name of the function whose signature is on `line`.
    fn symbol_name(&self, line: &LineSnapshot) -> Option<String>;

    /// The function whose body textually contains `seed`.
    fn enclosing_function(
        &self,
        cache: &mut FileCache,
        seed: &LineSnapshot,
    ) -> Result<Option<Block>>;
}

/// Extension-to-classifier dispatch, built once at startup and passed by
/// reference into commands and the caller-tree builder.
#[derive(Default)]
pub struct LanguageRegistry {
    languages: Vec<Box<dyn Language>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        LanguageRegistry::default()
    }

    /// Registry holding every built-in language family.
    pub fn with_defaults() -> Self {
        let mut registry = LanguageRegistry::new();
        registry.register(Box::new(CFamily::new()));
        registry
    }

    pub fn register(&mut self, language: Box<dyn Language>) {
        self.languages.push(language);
    }

    /// The classifier whose extensions cover `path`, if any.
    pub fn for_file(&self, path: &Path) -> Option<&dyn Language> {
        self.languages
            .iter()
            .find(|l| l.tag().covers(path))
            .map(|l| l.as_ref())
    }
}
