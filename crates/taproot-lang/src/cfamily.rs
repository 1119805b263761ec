//! C-family construct recovery: line shapes and block recipes

use std::sync::LazyLock;

use regex::Regex;
use taproot_core::{Block, FileCache, LangTag, LineSnapshot, Result};

use crate::Language;

pub const C_FAMILY: LangTag = LangTag::new("c-family", &["c", "h", "cpp", "hpp"]);

macro_rules! shape {
    ($name:ident, $pattern:literal) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
    };
}

// Prefilters: lines that can never open a definition.
shape!(PROTOTYPE_OR_CALL, r"\(.*\).*;");
shape!(CONTROL_KEYWORD, r"\b(?:else|if|switch|do|while|for)\b");
shape!(PREPROCESSOR, r"^\s*#");

// Line shapes, tested in classification priority order.
shape!(DEFINE, r"^\s*#define\b");
shape!(AGGREGATE_OPEN, r"^\s*(?:typedef|enum|struct|class|union)\b.*[^;]$");
shape!(TRAILING_BRACE, r"^\s*\}\s*\w+.*;");
shape!(FIELD, r"^\s+.*;$");

// Walk anchors.
shape!(MACRO_END, r"[^\\]$");
shape!(ENUM_KEYWORD, r"\benum\b");
shape!(ENUM_STOP, r"[};]");
shape!(CLOSE_BRACE, r"\}");
shape!(FIELD_CLOSER, r"^\s*\}.*;");
shape!(CLOSE_PAREN, r"\)");
shape!(TERMINATOR, r";");
shape!(OPEN_BRACE, r"\{");

// A column-zero line with a parameter list and neither a terminator nor an
// assignment anywhere on it.
shape!(SIGNATURE, r"^\w[^;=]*\([^;=]*$");
shape!(CLOSER_AT_MARGIN, r"^\}");

/// The one built-in classifier: C, C++ and their headers.
#[derive(Debug, Default)]
pub struct CFamily;

impl CFamily {
    pub fn new() -> Self {
        CFamily
    }

    /// Shared negative tests. A parenthesized one-liner ending in `;` is a
    /// prototype or call statement, a control-flow keyword line is a branch,
    /// and a preprocessor line other than `#define` defines nothing.
    fn plausible_definition(&self, seed: &LineSnapshot) -> bool {
        let content = seed.content();
        if PROTOTYPE_OR_CALL.is_match(content) {
            return false;
        }
        if CONTROL_KEYWORD.is_match(content) {
            return false;
        }
        if PREPROCESSOR.is_match(content) && !DEFINE.is_match(content) {
            return false;
        }
        true
    }

    /// `#define` body: every continuation line ends in a backslash.
    fn macro_block(&self, cache: &mut FileCache, seed: &LineSnapshot) -> Result<Option<Block>> {
        let mut block = Block::new(C_FAMILY, seed.clone());
        if !block.fill_down_until(cache, &MACRO_END, None)? {
            return Ok(None);
        }
        Ok(Some(block))
    }

    /// Function definition from its signature line. An unclosed parameter
    /// list is first walked to its close paren; a terminator on the way
    /// marks a declaration and discards the block.
    fn function_block(&self, cache: &mut FileCache, seed: &LineSnapshot) -> Result<Option<Block>> {
        let mut block = Block::new(C_FAMILY, seed.clone());
        if !seed.content().contains(')')
            && !block.fill_down_until(cache, &CLOSE_PAREN, Some(&TERMINATOR))?
        {
            return Ok(None);
        }
        let closer = Regex::new(&seed.indentation_pattern(r"\}"))?;
        if !block.fill_down_until(cache, &closer, None)? {
            return Ok(None);
        }
        Ok(Some(block))
    }

    /// Aggregate declaration opened on the seed line, closed by a brace at
    /// the seed's indentation.
    fn aggregate_block(&self, cache: &mut FileCache, seed: &LineSnapshot) -> Result<Option<Block>> {
        let mut block = Block::new(C_FAMILY, seed.clone());
        let closer = Regex::new(&seed.indentation_pattern(r"\}.*;"))?;
        if !block.fill_down_until(cache, &closer, None)? {
            return Ok(None);
        }
        Ok(Some(block))
    }

    /// Seed on the `} name;` line of a typedef-style aggregate: the body is
    /// recovered upward to the keyword line.
    fn typedef_close_block(
        &self,
        cache: &mut FileCache,
        seed: &LineSnapshot,
    ) -> Result<Option<Block>> {
        let mut block = Block::new(C_FAMILY, seed.clone());
        if !block.fill_up_until(cache, &AGGREGATE_OPEN, None)? {
            return Ok(None);
        }
        Ok(Some(block))
    }

    /// Seed on one enumerator: up to the `enum` keyword, then down to the
    /// closing brace. A closer or terminator above the seed means the seed
    /// was not an enumerator after all.
    fn enum_member_block(
        &self,
        cache: &mut FileCache,
        seed: &LineSnapshot,
    ) -> Result<Option<Block>> {
        let mut block = Block::new(C_FAMILY, seed.clone());
        if !block.fill_up_until(cache, &ENUM_KEYWORD, Some(&ENUM_STOP))? {
            return Ok(None);
        }
        if !block.fill_down_until(cache, &CLOSE_BRACE, None)? {
            return Ok(None);
        }
        Ok(Some(block))
    }

    /// Seed on a field: a sparse block of seed, enclosing declaration and
    /// its closing line.
    fn field_block(&self, cache: &mut FileCache, seed: &LineSnapshot) -> Result<Option<Block>> {
        let mut block = Block::new(C_FAMILY, seed.clone());
        if !block.get_start_with(cache, &AGGREGATE_OPEN, None)? {
            return Ok(None);
        }
        if !block.get_end_with(cache, &FIELD_CLOSER)? {
            return Ok(None);
        }
        Ok(Some(block))
    }
}

impl Language for CFamily {
    fn tag(&self) -> LangTag {
        C_FAMILY
    }

    fn classify(
        &self,
        cache: &mut FileCache,
        seed: &LineSnapshot,
        pattern: &Regex,
    ) -> Result<Option<Block>> {
        if !self.plausible_definition(seed) {
            return Ok(None);
        }
        let content = seed.content();

        if DEFINE.is_match(content) {
            return self.macro_block(cache, seed);
        }

        let named_call = Regex::new(&format!(r"(?:{})\s*\(", pattern.as_str()))?;
        if named_call.is_match(content) {
            return self.function_block(cache, seed);
        }

        if AGGREGATE_OPEN.is_match(content) && !content.contains('=') {
            return self.aggregate_block(cache, seed);
        }

        if TRAILING_BRACE.is_match(content) {
            return self.typedef_close_block(cache, seed);
        }

        let enumerator = Regex::new(&format!(r"^\s*(?:{})(\s*=.*)?,?$", pattern.as_str()))?;
        if enumerator.is_match(content) {
            return self.enum_member_block(cache, seed);
        }

        if FIELD.is_match(content) {
            return self.field_block(cache, seed);
        }

        Ok(None)
    }

    /// The identifier immediately before the line's last open paren; a
    /// namespace-qualified name yields its final segment.
    fn symbol_name(&self, line: &LineSnapshot) -> Option<String> {
        let content = line.content();
        let head = content[..content.rfind('(')?].trim_end();
        let reversed: String = head
            .chars()
            .rev()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        let name: String = reversed.chars().rev().collect();
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        Some(name)
    }

    fn enclosing_function(
        &self,
        cache: &mut FileCache,
        seed: &LineSnapshot,
    ) -> Result<Option<Block>> {
        let mut block = Block::new(C_FAMILY, seed.clone());
        if !block.get_start_with(cache, &SIGNATURE, Some(&CLOSER_AT_MARGIN))? {
            return Ok(None);
        }
        let start = match block.start() {
            Some(line) => line.clone(),
            None => return Ok(None),
        };
        // The signature shape cannot rule out control-flow forms, so reject
        // them here.
        if CONTROL_KEYWORD.is_match(start.content()) {
            return Ok(None);
        }
        if !block.fill_down_until(cache, &OPEN_BRACE, Some(&TERMINATOR))? {
            return Ok(None);
        }
        let closer = Regex::new(&start.indentation_pattern(r"\}"))?;
        if !block.get_end_with(cache, &closer)? {
            return Ok(None);
        }
        // A recovered extent that does not contain the seed is a misfire,
        // not an enclosing function.
        let end_index = match block.end() {
            Some(line) => line.index(),
            None => return Ok(None),
        };
        if seed.index() < start.index() || seed.index() > end_index {
            return Ok(None);
        }
        if let Some(name) = self.symbol_name(&start) {
            let word = Regex::new(&format!(r"\b{}\b", regex::escape(&name)))?;
            block.add(start.with_secondary(word));
        }
        Ok(Some(block))
    }
}
