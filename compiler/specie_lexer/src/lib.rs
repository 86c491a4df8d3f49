//! Regex-rule lexer for specie.
//!
//! The lexer is table driven: a list of [`Rule`]s is tried at every position
//! and the longest match wins, with the earlier rule winning a tie. Newlines
//! are handled outside the table so they can be normalized (one token per
//! run of blank lines, none at either end of the input). Comments are found
//! by a pre-pass and stepped over.
//!
//! # Usage
//!
//! ```text
//! let tokens = specie_lexer::tokenize("var total = 1 + 2")?;
//! ```

mod comments;
mod lex_error;
mod rule;
pub mod rules;

use std::ops::Range;

use specie_ir::{Location, Token, TokenKind};
use tracing::{debug, trace};

pub use comments::{CommentScanner, CommentSyntax};
pub use lex_error::{LexError, LexErrorKind};
pub use rule::{Extract, Rule};

/// Tokens plus the byte ranges of everything that was not emitted.
#[derive(Clone, Debug, Default)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    /// Whitespace, comments and dropped newlines, in ascending order.
    pub trivia: Vec<Range<usize>>,
}

/// A configured lexer: rule table plus optional comment syntax.
#[derive(Debug)]
pub struct Lexer {
    rules: Vec<Rule>,
    comments: Option<CommentScanner>,
}

/// Running line/column bookkeeping.
struct Cursor {
    pos: usize,
    line: u32,
    col: u32,
}

impl Cursor {
    fn location(&self) -> Location {
        Location::new(self.line, self.col)
    }

    /// Step over `text`, which must start at the current position.
    fn advance_over(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
        self.pos += text.len();
    }
}

impl Lexer {
    pub fn new(rules: Vec<Rule>, comments: Option<&CommentSyntax>) -> Result<Self, LexErrorKind> {
        let comments = comments.map(CommentScanner::new).transpose()?;
        Ok(Lexer { rules, comments })
    }

    /// The lexer for the specie language.
    pub fn specie() -> Result<Self, LexErrorKind> {
        Lexer::new(rules::rules()?, Some(&rules::comment_syntax()))
    }

    /// Tokenize `source`, dropping trivia.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, LexError> {
        Ok(self.tokenize_with_trivia(source)?.tokens)
    }

    /// Tokenize `source`, keeping the ranges of everything not emitted.
    pub fn tokenize_with_trivia(&self, source: &str) -> Result<Lexed, LexError> {
        let comments = self
            .comments
            .as_ref()
            .map(|scanner| scanner.scan(source))
            .unwrap_or_default();
        let mut comments = comments.into_iter().peekable();

        let mut lexed = Lexed::default();
        let mut cursor = Cursor {
            pos: 0,
            line: 0,
            col: 0,
        };

        while cursor.pos < source.len() {
            let rest = &source[cursor.pos..];

            // Skip comments that were already passed (a comment inside a
            // token cannot occur, but a stale range must not stall the loop).
            while comments.peek().is_some_and(|range| range.start < cursor.pos) {
                comments.next();
            }
            if let Some(range) = comments.next_if(|range| range.start == cursor.pos) {
                cursor.advance_over(&source[range.clone()]);
                lexed.trivia.push(range);
                continue;
            }

            let newline_len = if rest.starts_with("\r\n") {
                2
            } else if rest.starts_with('\n') {
                1
            } else {
                0
            };
            if newline_len > 0 {
                let span = cursor.pos..cursor.pos + newline_len;
                lexed.tokens.push(Token::new(
                    TokenKind::Newline,
                    None,
                    cursor.location(),
                    span,
                ));
                cursor.advance_over(&rest[..newline_len]);
                continue;
            }

            let Some((rule, len)) = self.longest_match(rest) else {
                let c = rest.chars().next().unwrap_or('\0');
                return Err(LexError::new(
                    LexErrorKind::IllegalCharacter(c),
                    cursor.location(),
                ));
            };

            let span = cursor.pos..cursor.pos + len;
            if rule.ignore {
                lexed.trivia.push(span);
            } else {
                let value = rule
                    .extract(&rest[..len])
                    .map_err(|kind| LexError::new(kind, cursor.location()))?;
                let token = Token::new(rule.kind, value, cursor.location(), span);
                trace!(token = %token, "lexed");
                lexed.tokens.push(token);
            }
            cursor.advance_over(&rest[..len]);
        }

        normalize_newlines(&mut lexed);
        debug!(tokens = lexed.tokens.len(), "tokenized");
        Ok(lexed)
    }

    /// The rule with the longest match at the start of `input`; the earliest
    /// rule wins among equal lengths.
    fn longest_match(&self, input: &str) -> Option<(&Rule, usize)> {
        let mut best: Option<(&Rule, usize)> = None;
        for rule in &self.rules {
            if let Some(len) = rule.match_len(input) {
                if best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((rule, len));
                }
            }
        }
        best
    }
}

/// Strip leading and trailing newline tokens and collapse runs to one.
/// Dropped newlines move to trivia.
fn normalize_newlines(lexed: &mut Lexed) {
    let tokens = std::mem::take(&mut lexed.tokens);
    let mut kept: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let is_newline = token.kind == TokenKind::Newline;
        let previous_is_newline = kept
            .last()
            .map_or(true, |previous| previous.kind == TokenKind::Newline);
        if is_newline && previous_is_newline {
            lexed.trivia.push(token.span);
        } else {
            kept.push(token);
        }
    }
    while kept.last().is_some_and(|token| token.kind == TokenKind::Newline) {
        if let Some(token) = kept.pop() {
            lexed.trivia.push(token.span);
        }
    }
    lexed.trivia.sort_by_key(|range| range.start);
    lexed.tokens = kept;
}

thread_local! {
    static SPECIE_LEXER: Result<Lexer, LexErrorKind> = Lexer::specie();
}

/// Tokenize specie source with the language's rule table.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Ok(tokenize_with_trivia(source)?.tokens)
}

/// Tokenize specie source, keeping trivia ranges.
pub fn tokenize_with_trivia(source: &str) -> Result<Lexed, LexError> {
    SPECIE_LEXER.with(|lexer| match lexer {
        Ok(lexer) => lexer.tokenize_with_trivia(source),
        Err(kind) => Err(LexError::new(kind.clone(), Location::START)),
    })
}

#[cfg(test)]
mod tests;
