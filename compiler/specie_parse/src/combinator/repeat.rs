//! Repetition and left folds.

use super::{merge, Failure, ParseResult, Parser, Success};
use crate::error::ParseError;
use specie_ir::Token;

/// What may follow the last item of a separated repetition.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Trailing {
    Forbidden,
    Required,
    Optional,
}

/// Repetition bounds: at least `min`, at most `max` items.
#[derive(Copy, Clone, Debug)]
struct Bounds {
    min: usize,
    max: Option<usize>,
}

impl Bounds {
    fn full(self, count: usize) -> bool {
        self.max.is_some_and(|max| count >= max)
    }
}

/// The shared repetition loop. Items are separated by `separator` (if any);
/// each item is paired with the separator that preceded it.
fn repeat<T: 'static, S: 'static>(
    item: Parser<T>,
    separator: Option<Parser<S>>,
    bounds: Bounds,
    trailing: Trailing,
) -> Parser<Vec<(Option<S>, T)>> {
    Parser::new(move |tokens, index| {
        let mut items: Vec<(Option<S>, T)> = Vec::new();
        let mut next = index;
        let mut furthest: Option<Failure> = None;

        loop {
            if bounds.full(items.len()) {
                break;
            }
            let start = next;
            let (sep, after_sep) = match (&separator, items.is_empty()) {
                (Some(separator), false) => match separator.parse(tokens, start) {
                    Ok(success) => {
                        furthest = merge(furthest, success.furthest);
                        (Some(success.value), success.next)
                    }
                    Err(failure) if failure.fatal => return Err(failure),
                    Err(failure) => {
                        furthest = merge(furthest, Some(failure));
                        break;
                    }
                },
                _ => (None, start),
            };
            match item.parse(tokens, after_sep) {
                Ok(success) => {
                    furthest = merge(furthest, success.furthest);
                    items.push((sep, success.value));
                    let stalled = success.next == start;
                    next = success.next;
                    if stalled {
                        // An item that consumes nothing would repeat forever.
                        break;
                    }
                }
                Err(failure) if failure.fatal => return Err(failure),
                Err(failure) => {
                    // Backtrack over the separator, if one was consumed.
                    furthest = merge(furthest, Some(failure));
                    break;
                }
            }
        }

        if items.len() < bounds.min {
            let failure = furthest.unwrap_or_else(|| {
                Failure::recoverable(ParseError::unexpected(tokens, next, None), next)
            });
            return Err(failure);
        }

        if let (Some(separator), false) = (&separator, items.is_empty()) {
            match trailing {
                Trailing::Forbidden => {}
                Trailing::Required => match separator.parse(tokens, next) {
                    Ok(success) => next = success.next,
                    Err(failure) => return Err(failure.furthest(furthest)),
                },
                Trailing::Optional => match separator.parse(tokens, next) {
                    Ok(success) => next = success.next,
                    Err(failure) if failure.fatal => return Err(failure),
                    Err(failure) => furthest = merge(furthest, Some(failure)),
                },
            }
        }

        Ok(Success {
            value: items,
            next,
            furthest,
        })
    })
}

fn strip<S, T>(items: Vec<(Option<S>, T)>) -> Vec<T> {
    items.into_iter().map(|(_, item)| item).collect()
}

impl<T: 'static> Parser<T> {
    /// Zero or more (subject to `min`/`max`) consecutive items.
    #[must_use]
    pub fn many(self, min: usize, max: Option<usize>) -> Parser<Vec<T>> {
        repeat::<T, Token>(self, None, Bounds { min, max }, Trailing::Forbidden).map(strip)
    }

    /// Items separated by `separator`, with no separator after the last.
    #[must_use]
    pub fn many_separated<S: 'static>(
        self,
        separator: Parser<S>,
        min: usize,
        max: Option<usize>,
    ) -> Parser<Vec<T>> {
        repeat(self, Some(separator), Bounds { min, max }, Trailing::Forbidden).map(strip)
    }

    /// Items each followed by `separator`.
    #[must_use]
    pub fn many_separated_terminated<S: 'static>(
        self,
        separator: Parser<S>,
        min: usize,
        max: Option<usize>,
    ) -> Parser<Vec<T>> {
        repeat(self, Some(separator), Bounds { min, max }, Trailing::Required).map(strip)
    }

    /// Items separated by `separator`, optionally followed by one more.
    #[must_use]
    pub fn many_separated_optionally_terminated<S: 'static>(
        self,
        separator: Parser<S>,
        min: usize,
        max: Option<usize>,
    ) -> Parser<Vec<T>> {
        repeat(self, Some(separator), Bounds { min, max }, Trailing::Optional).map(strip)
    }

    /// Like [`many_separated`](Parser::many_separated), retaining the
    /// separator before each item (`None` for the first).
    #[must_use]
    pub fn many_separated_keep<S: 'static>(
        self,
        separator: Parser<S>,
        min: usize,
        max: Option<usize>,
    ) -> Parser<Vec<(Option<S>, T)>> {
        repeat(self, Some(separator), Bounds { min, max }, Trailing::Forbidden)
    }

    /// Left fold of `self (separator self)*`, at least `min` items. Builds
    /// left-associative operator chains: `combine(acc, separator, item)`.
    #[must_use]
    pub fn reduce_separated<S: 'static>(
        self,
        separator: Parser<S>,
        min: usize,
        combine: impl Fn(T, S, T) -> T + 'static,
    ) -> Parser<T> {
        let items = self.many_separated_keep(separator, min.max(1), None);
        Parser::new(move |tokens, index| {
            let success = items.parse(tokens, index)?;
            let mut items = success.value.into_iter();
            let Some((_, first)) = items.next() else {
                return Err(Failure::recoverable(
                    ParseError::unexpected(tokens, index, None),
                    index,
                ));
            };
            let value = items.fold(first, |acc, (separator, item)| match separator {
                Some(separator) => combine(acc, separator, item),
                None => item,
            });
            Ok(Success {
                value,
                next: success.next,
                furthest: success.furthest,
            })
        })
    }
}

/// Left fold: parse `initial`, then fold every following `item` into it.
pub fn reduce<A: 'static, T: 'static>(
    initial: Parser<A>,
    item: Parser<T>,
    combine: impl Fn(A, T) -> A + 'static,
) -> Parser<A> {
    let items = item.many(0, None);
    Parser::new(move |tokens, index| -> ParseResult<A> {
        let first = initial.parse(tokens, index)?;
        let rest = items.parse(tokens, first.next)?;
        let value = rest.value.into_iter().fold(first.value, &combine);
        Ok(Success {
            value,
            next: rest.next,
            furthest: merge(first.furthest, rest.furthest),
        })
    })
}
