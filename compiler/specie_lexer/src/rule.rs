//! Token rules.
//!
//! A rule pairs a token kind with an anchored, case-insensitive regex and an
//! extraction function that turns the match into the token's value.

use regex::{Captures, Regex};
use specie_ir::{Name, TokenKind, TokenValue};

use crate::LexErrorKind;

/// Turns a rule's captures into the token value.
pub type Extract = fn(&Captures<'_>) -> Result<Option<TokenValue>, LexErrorKind>;

pub struct Rule {
    pub kind: TokenKind,
    pattern: Regex,
    extract: Extract,
    /// Consumed but never emitted.
    pub ignore: bool,
}

impl Rule {
    /// A rule whose tokens carry no value.
    pub fn new(kind: TokenKind, pattern: &str) -> Result<Self, LexErrorKind> {
        Self::with_extract(kind, pattern, |_| Ok(None))
    }

    /// A rule whose tokens carry their matched text.
    pub fn text(kind: TokenKind, pattern: &str) -> Result<Self, LexErrorKind> {
        Self::with_extract(kind, pattern, |caps| {
            Ok(Some(TokenValue::Text(Name::new(&caps[0]))))
        })
    }

    pub fn with_extract(
        kind: TokenKind,
        pattern: &str,
        extract: Extract,
    ) -> Result<Self, LexErrorKind> {
        let anchored = format!(r"\A(?i:{pattern})");
        let pattern = Regex::new(&anchored).map_err(|err| LexErrorKind::InvalidRule {
            rule: kind.name().to_owned(),
            reason: err.to_string(),
        })?;
        Ok(Rule {
            kind,
            pattern,
            extract,
            ignore: false,
        })
    }

    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// Length in bytes of the match at the start of `input`, if any.
    /// Empty matches count as no match.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.pattern
            .find(input)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }

    /// Extract the value of the match at the start of `input`.
    pub fn extract(&self, input: &str) -> Result<Option<TokenValue>, LexErrorKind> {
        match self.pattern.captures(input) {
            Some(caps) => (self.extract)(&caps),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .field("ignore", &self.ignore)
            .finish()
    }
}
