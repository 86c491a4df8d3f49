#![allow(clippy::unwrap_used, reason = "writing to a Vec cannot fail")]

use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;
use specie_ir::Location;

fn sample() -> Diagnostic {
    Diagnostic::error(ErrorCode::E4004)
        .with_message("Expected 1 argument, got 0")
        .at(Location::new(0, 7))
        .with_note("function defined with parameters (x)")
}

#[test]
fn test_emit_without_colors_matches_render() {
    let source = "double()";
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, true);
    emitter.emit(&sample(), source).unwrap();
    let output = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(output, sample().render(source));
}

#[test]
fn test_emit_with_colors() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&sample(), "double()").unwrap();
    let output = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(output.starts_with("\x1b[1;31merror\x1b[0m"));
    assert!(output.contains("\x1b[1m[E4004]\x1b[0m"));
    assert!(output.contains("double()\n"));
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}
