#![allow(clippy::unwrap_used, reason = "tests unwrap parse results")]

use super::*;
use pretty_assertions::assert_eq;

fn parse(args: &[&str]) -> Result<Action, ArgError> {
    parse_args(args.iter().map(|arg| (*arg).to_owned()))
}

fn options(args: &[&str]) -> Options {
    match parse(args).unwrap() {
        Action::Run(options) => options,
        other => panic!("expected options, got {other:?}"),
    }
}

#[test]
fn test_no_arguments_is_interactive() {
    let options = options(&[]);
    assert_eq!(options, Options::default());
    assert!(options.is_interactive());
}

#[test]
fn test_file_with_includes() {
    let options = options(&["-i", "a.sp", "--include", "b.sp", "--include=c.sp", "main.sp"]);
    assert_eq!(options.includes, vec!["a.sp", "b.sp", "c.sp"]);
    assert_eq!(options.file.as_deref(), Some("main.sp"));
    assert!(!options.is_interactive());
}

#[test]
fn test_eval() {
    assert_eq!(options(&["-e", "1 + 2"]).eval.as_deref(), Some("1 + 2"));
    assert_eq!(options(&["--eval=x"]).eval.as_deref(), Some("x"));
}

#[test]
fn test_help_and_version_win() {
    assert_eq!(parse(&["main.sp", "-h"]).unwrap(), Action::Help);
    assert_eq!(parse(&["--version"]).unwrap(), Action::Version);
}

#[test]
fn test_errors() {
    assert_eq!(
        parse(&["-e"]).unwrap_err(),
        ArgError::MissingValue("-e".to_owned())
    );
    assert_eq!(
        parse(&["--fast"]).unwrap_err().to_string(),
        "unknown option '--fast'"
    );
    assert_eq!(
        parse(&["a.sp", "b.sp"]).unwrap_err(),
        ArgError::ExtraArgument("b.sp".to_owned())
    );
}

#[test]
fn test_usage_lists_every_option() {
    let usage = usage();
    for flag in ["--include", "--eval", "--help", "--version", "RUST_LOG"] {
        assert!(usage.contains(flag), "usage is missing {flag}");
    }
}
