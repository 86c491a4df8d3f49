//! Backtracking parser combinators over a token slice.
//!
//! A [`Parser<T>`] is a shared function `(tokens, index) -> ParseResult<T>`.
//! Success carries the value and the index after it; failure carries the
//! error and the index where it was detected.
//!
//! Failures come in two strengths:
//!
//! | Failure | Raised by | Alternation / repetition |
//! |---------|-----------|--------------------------|
//! | recoverable | a token did not match | backtrack and try the next option |
//! | fatal | [`Parser::try_map`] rejected a parsed value | abort the whole parse |
//!
//! There is no cut operator: [`alternate`] always restarts the next option
//! at the index where the choice began, so more specific options must come
//! first.
//!
//! Successful results also carry the furthest recoverable failure that was
//! backtracked over on the way. When the parse finally fails (for instance
//! [`Parser::phrase`] finding leftover tokens), the furthest failure is the
//! one reported, which is almost always the real mistake.

mod repeat;

use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use specie_ir::{Token, TokenKind};
use specie_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};

pub use repeat::reduce;

/// A successful parse.
#[derive(Clone, Debug, PartialEq)]
pub struct Success<T> {
    pub value: T,
    /// Index of the first token after the parsed input.
    pub next: usize,
    /// Furthest recoverable failure backtracked over while parsing.
    pub furthest: Option<Failure>,
}

impl<T> Success<T> {
    pub fn new(value: T, next: usize) -> Self {
        Success {
            value,
            next,
            furthest: None,
        }
    }

    fn with_furthest(mut self, failure: Option<Failure>) -> Self {
        self.furthest = merge(self.furthest.take(), failure);
        self
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Success<U> {
        Success {
            value: f(self.value),
            next: self.next,
            furthest: self.furthest,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Failure {
    pub error: ParseError,
    /// Token index at which the failure was detected.
    pub index: usize,
    /// Fatal failures are never backtracked over.
    pub fatal: bool,
}

impl Failure {
    #[cold]
    pub fn recoverable(error: ParseError, index: usize) -> Self {
        Failure {
            error,
            index,
            fatal: false,
        }
    }

    #[cold]
    pub fn fatal(error: ParseError, index: usize) -> Self {
        Failure {
            error,
            index,
            fatal: true,
        }
    }

    /// Keep whichever of `self` and `other` got further into the input;
    /// `self` wins ties.
    #[must_use]
    pub fn furthest(self, other: Option<Failure>) -> Failure {
        match other {
            Some(other) if !self.fatal && other.index > self.index => other,
            _ => self,
        }
    }
}

fn merge(a: Option<Failure>, b: Option<Failure>) -> Option<Failure> {
    match (a, b) {
        (Some(a), b) => Some(a.furthest(b)),
        (None, b) => b,
    }
}

pub type ParseResult<T> = Result<Success<T>, Failure>;

type ParseFn<T> = dyn Fn(&[Token], usize) -> ParseResult<T>;

/// A composable parser producing a `T`.
///
/// Cloning is cheap: parsers are reference counted so a grammar can reuse
/// one sub-parser in several places.
pub struct Parser<T>(Rc<ParseFn<T>>);

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser(Rc::clone(&self.0))
    }
}

impl<T> std::fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Parser")
    }
}

impl<T: 'static> Parser<T> {
    pub fn new(function: impl Fn(&[Token], usize) -> ParseResult<T> + 'static) -> Self {
        Parser(Rc::new(function))
    }

    #[inline]
    pub fn parse(&self, tokens: &[Token], index: usize) -> ParseResult<T> {
        (self.0)(tokens, index)
    }

    /// Transform the parsed value.
    #[must_use]
    pub fn map<U: 'static>(self, function: impl Fn(T) -> U + 'static) -> Parser<U> {
        Parser::new(move |tokens, index| Ok(self.parse(tokens, index)?.map(&function)))
    }

    /// Replace the parsed value with a constant.
    #[must_use]
    pub fn value<U: Clone + 'static>(self, value: U) -> Parser<U> {
        self.map(move |_| value.clone())
    }

    /// Transform the parsed value with a check that may reject it. A
    /// rejection is fatal: the input was recognized but is not valid, so no
    /// alternative should be tried.
    #[must_use]
    pub fn try_map<U: 'static>(
        self,
        function: impl Fn(T) -> Result<U, ParseError> + 'static,
    ) -> Parser<U> {
        Parser::new(move |tokens, index| {
            let success = self.parse(tokens, index)?;
            let next = success.next;
            let furthest = success.furthest;
            match function(success.value) {
                Ok(value) => Ok(Success {
                    value,
                    next,
                    furthest,
                }),
                Err(error) => Err(Failure::fatal(error, index)),
            }
        })
    }

    /// Sequence, keeping the right result.
    #[must_use]
    pub fn then<U: 'static>(self, right: Parser<U>) -> Parser<U> {
        concat(self, right, |_, right| right)
    }

    /// Sequence, keeping the left result.
    #[must_use]
    pub fn before<U: 'static>(self, right: Parser<U>) -> Parser<T> {
        concat(self, right, |left, _| left)
    }

    /// `left self right`, keeping the middle result.
    #[must_use]
    pub fn between<L: 'static, R: 'static>(self, left: Parser<L>, right: Parser<R>) -> Parser<T> {
        left.then(self.before(right))
    }

    /// Ordered choice of two parsers.
    #[must_use]
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        alternate(vec![self, other])
    }

    /// Never fails: yields `default` without consuming when `self` fails
    /// recoverably.
    #[must_use]
    pub fn optional(self, default: T) -> Parser<T>
    where
        T: Clone,
    {
        Parser::new(move |tokens, index| match self.parse(tokens, index) {
            Ok(success) => Ok(success),
            Err(failure) if failure.fatal => Err(failure),
            Err(failure) => Ok(Success::new(default.clone(), index).with_furthest(Some(failure))),
        })
    }

    /// Like [`optional`](Parser::optional) with `None` as the default.
    #[must_use]
    pub fn maybe(self) -> Parser<Option<T>> {
        Parser::new(move |tokens, index| match self.parse(tokens, index) {
            Ok(success) => Ok(success.map(Some)),
            Err(failure) if failure.fatal => Err(failure),
            Err(failure) => Ok(Success::new(None, index).with_furthest(Some(failure))),
        })
    }

    /// Succeed only if the parse ends exactly at the end of the tokens.
    #[must_use]
    pub fn phrase(self) -> Parser<T> {
        Parser::new(move |tokens, index| {
            let success = self.parse(tokens, index)?;
            if success.next == tokens.len() {
                return Ok(success);
            }
            let leftover = Failure::recoverable(
                ParseError::unexpected(tokens, success.next, None),
                success.next,
            );
            // A deeper failure explains the leftover tokens better than the
            // leftover token itself.
            Err(match success.furthest {
                Some(deeper) if deeper.index >= leftover.index => deeper,
                _ => leftover,
            })
        })
    }
}

/// Match one token of `kind`.
pub fn token(kind: TokenKind) -> Parser<Token> {
    Parser::new(move |tokens: &[Token], index| match tokens.get(index) {
        Some(token) if token.kind == kind => {
            trace!(index, kind = kind.name(), "token matched");
            Ok(Success::new(token.clone(), index + 1))
        }
        _ => {
            trace!(index, kind = kind.name(), "token rejected");
            Err(Failure::recoverable(
                ParseError::unexpected(tokens, index, Some(kind.name())),
                index,
            ))
        }
    })
}

/// Succeed without consuming anything.
pub fn empty() -> Parser<()> {
    Parser::new(|_, index| Ok(Success::new((), index)))
}

/// Always fail recoverably with `error`.
pub fn fail<T: 'static>(error: ParseError) -> Parser<T> {
    Parser::new(move |_, index| {
        trace!(index, error = %error, "fail");
        Err(Failure::recoverable(error.clone(), index))
    })
}

/// Build the parser on first use. Breaks cycles between grammar rules that
/// refer to each other.
pub fn lazy<T: 'static>(factory: impl Fn() -> Parser<T> + 'static) -> Parser<T> {
    let cell: OnceCell<Parser<T>> = OnceCell::new();
    Parser::new(move |tokens, index| {
        let parser = cell.get_or_init(|| {
            trace!(index, "lazy parser built");
            factory()
        });
        parser.parse(tokens, index)
    })
}

/// Define a parser in terms of itself. `build` receives a handle that
/// parses with the finished parser.
///
/// The handle holds the finished parser weakly so the definition does not
/// keep itself alive. Every pass through the handle checks the remaining
/// stack, since nesting depth is unbounded.
pub fn recursive<T: 'static>(build: impl FnOnce(Parser<T>) -> Parser<T>) -> Parser<T> {
    let slot: Rc<OnceCell<Weak<ParseFn<T>>>> = Rc::new(OnceCell::new());
    let handle_slot = Rc::clone(&slot);
    let handle = lazy(move || {
        let slot = Rc::clone(&handle_slot);
        Parser::new(move |tokens, index| match slot.get().and_then(Weak::upgrade) {
            Some(function) => ensure_sufficient_stack(|| function(tokens, index)),
            None => Err(Failure::fatal(
                ParseError::new(ParseErrorKind::Unbound, None),
                index,
            )),
        })
    });
    let parser = build(handle);
    // The slot is only ever set here.
    let _ = slot.set(Rc::downgrade(&parser.0));
    parser
}

/// Sequence two parsers and combine their results.
pub fn concat<A: 'static, B: 'static, U: 'static>(
    left: Parser<A>,
    right: Parser<B>,
    combine: impl Fn(A, B) -> U + 'static,
) -> Parser<U> {
    Parser::new(move |tokens, index| {
        let first = left.parse(tokens, index)?;
        match right.parse(tokens, first.next) {
            Ok(second) => Ok(Success {
                value: combine(first.value, second.value),
                next: second.next,
                furthest: merge(first.furthest, second.furthest),
            }),
            Err(failure) => Err(failure.furthest(first.furthest)),
        }
    })
}

/// Sequence any number of parsers of one type and combine all results.
pub fn concat_multiple<T: 'static, U: 'static>(
    parsers: Vec<Parser<T>>,
    combine: impl Fn(Vec<T>) -> U + 'static,
) -> Parser<U> {
    Parser::new(move |tokens, index| {
        let mut values = Vec::with_capacity(parsers.len());
        let mut next = index;
        let mut furthest = None;
        for parser in &parsers {
            match parser.parse(tokens, next) {
                Ok(success) => {
                    values.push(success.value);
                    next = success.next;
                    furthest = merge(furthest, success.furthest);
                }
                Err(failure) => return Err(failure.furthest(furthest)),
            }
        }
        Ok(Success {
            value: combine(values),
            next,
            furthest,
        })
    })
}

/// Ordered choice: the first option that succeeds wins. Every option
/// starts at the same index. When all fail, the failure that got furthest
/// into the input is reported; fatal failures stop the choice at once.
pub fn alternate<T: 'static>(options: Vec<Parser<T>>) -> Parser<T> {
    Parser::new(move |tokens, index| {
        trace!(index, options = options.len(), "alternate");
        let mut furthest: Option<Failure> = None;
        for option in &options {
            match option.parse(tokens, index) {
                Ok(success) => return Ok(success.with_furthest(furthest)),
                Err(failure) if failure.fatal => return Err(failure),
                Err(failure) => {
                    furthest = Some(match furthest {
                        None => failure,
                        Some(best) if failure.index > best.index => failure,
                        // Options disagreeing on what was expected at the same
                        // token: name the token only.
                        Some(best) if failure.index == best.index && failure.error != best.error => {
                            Failure::recoverable(
                                ParseError::unexpected(tokens, best.index, None),
                                best.index,
                            )
                        }
                        Some(best) => best,
                    });
                }
            }
        }
        Err(furthest.unwrap_or_else(|| {
            Failure::recoverable(ParseError::unexpected(tokens, index, None), index)
        }))
    })
}
