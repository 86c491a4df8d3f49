#![allow(clippy::unwrap_used, reason = "fixed comment syntax compiles")]

use super::*;
use pretty_assertions::assert_eq;

fn scanner() -> CommentScanner {
    CommentScanner::new(&CommentSyntax {
        block: Some(("#-".to_owned(), "-#".to_owned())),
        inline: Some("#".to_owned()),
        protect: Some(r#""(?:[^"\\]|\\.)*""#.to_owned()),
    })
    .unwrap()
}

fn comments(source: &str) -> Vec<&str> {
    scanner().scan(source).into_iter().map(|r| &source[r]).collect()
}

#[test]
fn test_inline_comment_stops_before_newline() {
    assert_eq!(comments("1 # one\n2"), vec!["# one"]);
}

#[test]
fn test_inline_comment_at_end_of_input() {
    assert_eq!(comments("total # trailing"), vec!["# trailing"]);
}

#[test]
fn test_block_comment_spans_lines() {
    assert_eq!(comments("a #- first\nsecond -# b"), vec!["#- first\nsecond -#"]);
}

#[test]
fn test_hash_inside_string_is_protected() {
    assert_eq!(comments(r##""#1 item" # real"##), vec!["# real"]);
}

#[test]
fn test_escaped_quote_inside_string() {
    assert_eq!(comments(r##""say \"#\"" #c"##), vec!["#c"]);
}

#[test]
fn test_no_comments() {
    assert!(comments("1 + 2").is_empty());
}
