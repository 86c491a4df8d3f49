#![allow(clippy::unwrap_used, reason = "tests write to in-memory buffers")]

use std::io::Cursor;

use super::*;
use pretty_assertions::assert_eq;
use specie_diagnostic::emitter::{ColorMode, TerminalEmitter};
use specie_eval::Interpreter;

/// Run a session over `input`, returning what went to stdout and stderr.
fn session(input: &str) -> (String, String) {
    let mut driver = Driver::new(
        Interpreter::new(),
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false),
    );
    let mut output = Vec::new();
    run(&mut driver, Cursor::new(input), &mut output).unwrap();
    let errors = driver.into_emitter().into_inner();
    (
        String::from_utf8(output).unwrap(),
        String::from_utf8(errors).unwrap(),
    )
}

#[test]
fn test_results_are_printed_and_state_is_kept() {
    let (output, errors) = session("1 + 2\nvar x = 3\nx * 2\nexit\n");
    assert_eq!(output, ">>> 3\n>>> >>> 6\n>>> ");
    assert_eq!(errors, "");
}

#[test]
fn test_end_of_input_ends_the_session() {
    let (output, _) = session("1\n");
    assert_eq!(output, ">>> 1\n>>> \n");
}

#[test]
fn test_backslash_continues_the_line() {
    let (output, _) = session("var f = (x): \\\nx * 2\nf(4)\n");
    assert_eq!(output, ">>> ... >>> 8\n>>> \n");
}

#[test]
fn test_incomplete_input_asks_for_more() {
    let (output, errors) = session("1 +\n2\n");
    assert_eq!(output, ">>> ... 3\n>>> \n");
    assert_eq!(errors, "");
}

#[test]
fn test_empty_line_forces_evaluation() {
    let (output, errors) = session("1 +\n\n5\n");
    assert_eq!(output, ">>> ... >>> 5\n>>> \n");
    assert!(errors.starts_with("error[E2002]"), "{errors}");
}

#[test]
fn test_errors_do_not_end_the_session() {
    let (output, errors) = session("var x = 1\nx / 0\nx\n");
    assert_eq!(output, ">>> >>> >>> 1\n>>> \n");
    assert!(errors.contains("Division by zero"), "{errors}");
}

#[test]
fn test_blank_lines_are_ignored() {
    let (output, errors) = session("\n   \n2\n");
    assert_eq!(output, ">>> >>> >>> 2\n>>> \n");
    assert_eq!(errors, "");
}
