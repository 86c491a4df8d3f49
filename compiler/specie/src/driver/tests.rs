#![allow(clippy::unwrap_used, reason = "tests unwrap file and output handling")]

use std::io::Cursor;

use super::*;
use pretty_assertions::assert_eq;

fn driver() -> Driver<Vec<u8>> {
    Driver::new(
        Interpreter::builder().file_resolver(FsResolver).build(),
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false),
    )
}

fn errors(driver: Driver<Vec<u8>>) -> String {
    String::from_utf8(driver.into_emitter().into_inner()).unwrap()
}

fn run_options(options: &Options) -> (Result<(), Reported>, String, String) {
    let mut driver = driver();
    let mut output = Vec::new();
    let result = run(&mut driver, options, Cursor::new(""), &mut output);
    (result, String::from_utf8(output).unwrap(), errors(driver))
}

#[test]
fn test_execute_reports_failures() {
    let mut driver = driver();
    assert_eq!(driver.execute("1 + 1"), Ok(Value::Int(2)));
    assert_eq!(driver.execute("1 / 0"), Err(Reported));
    let shown = errors(driver);
    assert!(shown.starts_with("error[E4002]: Division by zero"), "{shown}");
    assert!(shown.contains("  1 / 0\n    ^"), "{shown}");
}

#[test]
fn test_render_skips_null() {
    let mut driver = driver();
    assert_eq!(driver.render(&Value::Null, ""), Ok(None));
    assert_eq!(
        driver.render(&Value::Int(3), ""),
        Ok(Some("3".to_owned()))
    );
}

#[test]
fn test_missing_file() {
    let mut driver = driver();
    let missing = "definitely/not/here.sp";
    assert_eq!(driver.execute_file(missing), Err(Reported));
    assert_eq!(
        errors(driver),
        format!("error[E4011]: cannot find file '{missing}'\n")
    );
}

#[test]
fn test_eval_prints_result() {
    let options = Options {
        eval: Some("[1, 2].count() * 10".to_owned()),
        ..Options::default()
    };
    let (result, output, errors) = run_options(&options);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "20\n");
    assert_eq!(errors, "");
}

#[test]
fn test_eval_null_prints_nothing() {
    let options = Options {
        eval: Some("var x = 1".to_owned()),
        ..Options::default()
    };
    let (result, output, _) = run_options(&options);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "");
}

#[test]
fn test_eval_failure() {
    let options = Options {
        eval: Some("nope".to_owned()),
        ..Options::default()
    };
    let (result, output, errors) = run_options(&options);
    assert_eq!(result, Err(Reported));
    assert_eq!(output, "");
    assert!(errors.contains("Undefined variable 'nope'"), "{errors}");
}

#[test]
fn test_includes_run_before_eval() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib.sp");
    std::fs::write(&lib, "var rate = 3").unwrap();
    let options = Options {
        includes: vec![lib.display().to_string()],
        eval: Some("rate * 2".to_owned()),
        file: None,
    };
    let (result, output, _) = run_options(&options);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "6\n");
}
