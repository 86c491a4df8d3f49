#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests unwrap lexer output")]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use specie_ir::{Literal, TokenValue};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
}

fn single(source: &str) -> Token {
    let mut tokens = tokenize(source).unwrap();
    assert_eq!(tokens.len(), 1, "expected one token for {source:?}");
    tokens.remove(0)
}

#[test]
fn test_arithmetic() {
    use TokenKind::{Int, Plus, Star};
    assert_eq!(kinds("1 + 2 * 3"), vec![Int, Plus, Int, Star, Int]);
}

#[test]
fn test_keyword_beats_identifier_on_tie() {
    assert_eq!(kinds("if"), vec![TokenKind::If]);
    assert_eq!(kinds("in"), vec![TokenKind::In]);
    assert_eq!(kinds("IF"), vec![TokenKind::If]);
}

#[test]
fn test_longer_identifier_beats_keyword_prefix() {
    let token = single("index");
    assert_eq!(token.kind, TokenKind::Identifier);
    assert_eq!(token.ident().map(specie_ir::Name::as_str), Some("index"));
    assert_eq!(kinds("done"), vec![TokenKind::Identifier]);
    assert_eq!(kinds("orders"), vec![TokenKind::Identifier]);
}

#[test]
fn test_longest_operator_wins() {
    use TokenKind::{Assign, EqEq, GtEq, Identifier, LtEq, TildeMatch};
    assert_eq!(kinds("a == b"), vec![Identifier, EqEq, Identifier]);
    assert_eq!(kinds("a = b"), vec![Identifier, Assign, Identifier]);
    assert_eq!(kinds("<= >="), vec![LtEq, GtEq]);
    assert_eq!(kinds("a =~ b"), vec![Identifier, TildeMatch, Identifier]);
    assert_eq!(kinds("..."), vec![TokenKind::Ellipsis]);
}

#[test]
fn test_numbers() {
    assert_eq!(single("42").literal(), Some(&Literal::Int(42)));
    assert_eq!(single("-7").literal(), Some(&Literal::Int(-7)));
    assert_eq!(single("3.25").literal(), Some(&Literal::Float(3.25)));
    assert_eq!(single("-0.5").literal(), Some(&Literal::Float(-0.5)));
    assert_eq!(kinds("a - 1"), vec![TokenKind::Identifier, TokenKind::Minus, TokenKind::Int]);
}

#[test]
fn test_integer_out_of_range() {
    let err = tokenize("99999999999999999999").unwrap_err();
    assert_eq!(
        err.kind,
        LexErrorKind::IntegerOutOfRange("99999999999999999999".to_owned())
    );
}

#[test]
fn test_date_beats_integer() {
    let token = single("2024-02-29");
    assert_eq!(token.kind, TokenKind::Date);
    assert_eq!(token.value.unwrap().to_string(), "2024-02-29");
}

#[test]
fn test_invalid_date_is_malformed_literal() {
    let err = tokenize("x = 2023-02-30").unwrap_err();
    assert!(matches!(&err.kind, LexErrorKind::InvalidDate(text) if text.starts_with("2023-02-30: ")));
    assert_eq!(err.location, Location::new(0, 4));
    assert!(matches!(
        tokenize("2024-13-01").unwrap_err().kind,
        LexErrorKind::InvalidDate(_)
    ));
}

#[test]
fn test_leap_day_and_year_zero_are_dates() {
    assert_eq!(single("2000-02-29").value.unwrap().to_string(), "2000-02-29");
    assert_eq!(single("0000-01-01").value.unwrap().to_string(), "0000-01-01");
}

#[test]
fn test_string_escapes() {
    let token = single(r#""say \"hi\"\n\tnow""#);
    assert_eq!(
        token.literal(),
        Some(&Literal::String("say \"hi\"\n\tnow".into()))
    );
}

#[test]
fn test_regex_literal() {
    let token = single("/^albert h[ei]jn/i");
    let Some(Literal::Regex(regex)) = token.literal() else {
        panic!("expected regex literal, got {token}");
    };
    assert_eq!(regex.pattern.as_ref(), "^albert h[ei]jn");
    assert!(regex.compiled.is_match("ALBERT HEIJN 1234"));
}

#[test]
fn test_regex_bad_flag() {
    let err = tokenize("/abc/q").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidRegexFlag('q'));
    assert_eq!(err.location, Location::START);
}

#[test]
fn test_spaced_division_is_not_a_regex() {
    use TokenKind::{Int, Slash};
    assert_eq!(kinds("6 / 2 / 3"), vec![Int, Slash, Int, Slash, Int]);
}

#[test]
fn test_unterminated_string_points_at_opening_quote() {
    let err = tokenize("var s = \"unterminated").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter('"'));
    assert_eq!(err.location, Location::new(0, 8));
    assert_eq!(err.to_string(), "Illegal character '\"' at line 1, col 9");
}

#[test]
fn test_illegal_character() {
    let err = tokenize("1 + $").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter('$'));
    assert_eq!(err.location, Location::new(0, 4));
}

#[test]
fn test_newlines_are_normalized() {
    use TokenKind::{Identifier, Newline};
    assert_eq!(kinds("\n\na\n\n\nb\n\n"), vec![Identifier, Newline, Identifier]);
    assert_eq!(kinds("a\r\nb"), vec![Identifier, Newline, Identifier]);
}

#[test]
fn test_comments_keep_locations() {
    let tokens = tokenize("a #- one\ntwo -# b # c\nd").unwrap();
    let summary: Vec<(TokenKind, Location)> =
        tokens.iter().map(|t| (t.kind, t.location)).collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Identifier, Location::new(0, 0)),
            (TokenKind::Identifier, Location::new(1, 7)),
            (TokenKind::Newline, Location::new(1, 12)),
            (TokenKind::Identifier, Location::new(2, 0)),
        ]
    );
}

#[test]
fn test_hash_in_string_is_not_a_comment() {
    let token = single(r##""invoice #12""##);
    assert_eq!(token.literal(), Some(&Literal::String("invoice #12".into())));
}

#[test]
fn test_operator_tokens_carry_text() {
    let token = single("*");
    assert_eq!(token.value, Some(TokenValue::Text("*".into())));
    assert_eq!(single("(").value, None);
}

#[test]
fn test_custom_rule_table_tie_break() {
    // Two rules matching the same two characters: the earlier one wins.
    let rules = vec![
        Rule::new(TokenKind::Identifier, "ab").unwrap(),
        Rule::new(TokenKind::String, "ab").unwrap(),
        Rule::new(TokenKind::Whitespace, " ").unwrap().ignored(),
    ];
    let lexer = Lexer::new(rules, None).unwrap();
    let tokens = lexer.tokenize("ab ab").unwrap();
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_custom_rule_table_longest_wins_regardless_of_order() {
    let rules = vec![
        Rule::new(TokenKind::Minus, "-").unwrap(),
        Rule::new(TokenKind::Arrow, "->").unwrap(),
    ];
    let lexer = Lexer::new(rules, None).unwrap();
    let tokens = lexer.tokenize("->-").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Arrow, TokenKind::Minus]);
}

/// Concatenate token and trivia spans in order.
fn reassemble(source: &str, lexed: &Lexed) -> String {
    let mut pieces: Vec<Range<usize>> = lexed
        .tokens
        .iter()
        .map(|t| t.span.clone())
        .chain(lexed.trivia.iter().cloned())
        .collect();
    pieces.sort_by_key(|r| r.start);
    pieces.into_iter().map(|r| &source[r]).collect()
}

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("var".to_owned()),
        Just("if".to_owned()),
        Just("from".to_owned()),
        Just("=".to_owned()),
        Just("==".to_owned()),
        Just("+".to_owned()),
        Just("-".to_owned()),
        Just("(".to_owned()),
        Just(")".to_owned()),
        Just(" ".to_owned()),
        Just("\n".to_owned()),
        Just("\n\n".to_owned()),
        Just("# note\n".to_owned()),
        Just("#- block\n -#".to_owned()),
        Just("\"a # b\"".to_owned()),
        Just("2024-01-31".to_owned()),
        Just("3.5".to_owned()),
        "[a-z_][a-z0-9_]{0,6}",
        "-?[1-9][0-9]{0,5}",
    ]
}

proptest! {
    #[test]
    fn prop_tokens_and_trivia_cover_source(parts in proptest::collection::vec(fragment(), 0..24)) {
        let source = parts.join(" ");
        if let Ok(lexed) = tokenize_with_trivia(&source) {
            prop_assert_eq!(reassemble(&source, &lexed), source);
        }
    }

    #[test]
    fn prop_identifiers_longer_than_keywords_stay_identifiers(
        keyword in prop_oneof![Just("if"), Just("in"), Just("do"), Just("or"), Just("end")],
        suffix in "[a-z0-9_]{1,5}",
    ) {
        let word = format!("{keyword}{suffix}");
        let tokens = tokenize(&word).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }
}
