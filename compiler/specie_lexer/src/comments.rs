//! Comment removal pre-pass.
//!
//! Finds the byte ranges of block comments (`#- ... -#`) and inline comments
//! (`#` to end of line) before tokenization. Protected spans, matched by a
//! supplied pattern (string literals for specie), are skipped so a `#` inside
//! them does not start a comment. The comment text is not removed from the
//! source; the lexer steps over the ranges, which keeps locations exact.

use std::ops::Range;

use regex::Regex;

use crate::LexErrorKind;

/// Comment delimiters for a language.
#[derive(Clone, Debug)]
pub struct CommentSyntax {
    pub block: Option<(String, String)>,
    pub inline: Option<String>,
    /// Pattern for spans in which comment markers are literal text.
    pub protect: Option<String>,
}

/// Compiled comment scanner.
#[derive(Debug)]
pub struct CommentScanner {
    pattern: Regex,
    block_open: Option<String>,
    inline: Option<String>,
}

impl CommentScanner {
    pub fn new(syntax: &CommentSyntax) -> Result<Self, LexErrorKind> {
        let mut alternatives = Vec::new();
        if let Some((open, close)) = &syntax.block {
            alternatives.push(format!("{}.*?{}", regex::escape(open), regex::escape(close)));
        }
        if let Some(inline) = &syntax.inline {
            alternatives.push(format!(r"{}[^\r\n]*", regex::escape(inline)));
        }
        if let Some(protect) = &syntax.protect {
            alternatives.push(protect.clone());
        }
        let pattern = format!("(?s){}", alternatives.join("|"));
        let pattern = Regex::new(&pattern).map_err(|err| LexErrorKind::InvalidRule {
            rule: "comment".to_owned(),
            reason: err.to_string(),
        })?;
        Ok(CommentScanner {
            pattern,
            block_open: syntax.block.as_ref().map(|(open, _)| open.clone()),
            inline: syntax.inline.clone(),
        })
    }

    /// Byte ranges of every comment in `source`, in ascending order.
    pub fn scan(&self, source: &str) -> Vec<Range<usize>> {
        self.pattern
            .find_iter(source)
            .filter(|m| {
                let text = m.as_str();
                self.block_open.as_deref().is_some_and(|open| text.starts_with(open))
                    || self.inline.as_deref().is_some_and(|inline| text.starts_with(inline))
            })
            .map(|m| m.range())
            .collect()
    }
}

#[cfg(test)]
mod tests;
