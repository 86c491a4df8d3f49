use super::*;
use pretty_assertions::assert_eq;
use std::rc::Rc;

#[test]
fn test_token_display_with_value() {
    let token = Token::new(
        TokenKind::String,
        Some(TokenValue::Literal(Literal::String(Rc::from("groceries")))),
        Location::new(2, 4),
        0..11,
    );
    assert_eq!(token.to_string(), "literal_string 'groceries' at line 3, col 5");
}

#[test]
fn test_token_display_without_value() {
    let token = Token::new(TokenKind::LeftParen, None, Location::new(0, 0), 0..1);
    assert_eq!(token.to_string(), "parenthesis_left at line 1, col 1");
}

#[test]
fn test_token_accessors() {
    let ident = Token::new(
        TokenKind::Identifier,
        Some(TokenValue::Ident(Name::new("amount"))),
        Location::START,
        0..6,
    );
    assert_eq!(ident.ident().map(Name::as_str), Some("amount"));
    assert!(ident.literal().is_none());

    let int = Token::new(
        TokenKind::Int,
        Some(TokenValue::Literal(Literal::Int(-4))),
        Location::START,
        0..2,
    );
    assert_eq!(int.literal(), Some(&Literal::Int(-4)));
    assert!(int.ident().is_none());
}

#[test]
fn test_match_operators_share_a_name() {
    assert_eq!(TokenKind::Tilde.name(), TokenKind::TildeMatch.name());
}
