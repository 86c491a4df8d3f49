use super::*;
use pretty_assertions::assert_eq;
use specie_diagnostic::Severity;
use specie_ir::TokenKind;
use specie_lexer::LexErrorKind;

fn plus_token() -> Token {
    specie_lexer::tokenize("1 +").map(|tokens| tokens[1].clone()).unwrap_or_else(|err| {
        panic!("lexing failed: {err}");
    })
}

#[test]
fn test_unexpected_token_message() {
    let token = plus_token();
    assert_eq!(token.kind, TokenKind::Plus);
    let err = ParseError::unexpected(&[token], 0, Some("identifier"));
    assert_eq!(
        err.to_string(),
        "Unexpected token operator_add '+', expected identifier at line 1, col 3"
    );
    assert_eq!(err.code(), ErrorCode::E2001);
}

#[test]
fn test_unexpected_end_has_no_location() {
    let err = ParseError::unexpected(&[], 0, None);
    assert_eq!(err.to_string(), "Unexpected end of tokens");
    assert_eq!(err.location, None);
    assert_eq!(err.code(), ErrorCode::E2002);
}

#[test]
fn test_codes_by_kind() {
    let at = |kind| ParseError::at(kind, Location::START).code();
    assert_eq!(at(ParseErrorKind::InvalidAssignmentTarget), ErrorCode::E2003);
    assert_eq!(at(ParseErrorKind::PositionalAfterKeyword), ErrorCode::E2004);
    assert_eq!(at(ParseErrorKind::RequiredAfterOptional("b".into())), ErrorCode::E2005);
    assert_eq!(at(ParseErrorKind::UnknownQueryStage("zap".into())), ErrorCode::E2006);
}

#[test]
fn test_syntax_error_wraps_both_phases() {
    let lex = SyntaxError::from(LexError::new(
        LexErrorKind::IllegalCharacter('$'),
        Location::new(2, 4),
    ));
    assert_eq!(lex.location(), Some(Location::new(2, 4)));
    assert_eq!(lex.message(), "Illegal character '$'");
    assert!(!lex.is_incomplete());

    let parse = SyntaxError::from(ParseError::unexpected(&[], 0, None));
    assert!(parse.is_incomplete());
    assert_eq!(parse.to_string(), "Unexpected end of tokens");
}

#[test]
fn test_to_diagnostic() {
    let err = ParseError::at(ParseErrorKind::InvalidAssignmentTarget, Location::new(0, 2));
    let diagnostic = SyntaxError::from(err).to_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E2003);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.message, "Invalid assignment target");
    assert_eq!(diagnostic.location, Some(Location::new(0, 2)));
}
