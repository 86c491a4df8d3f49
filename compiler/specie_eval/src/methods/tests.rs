#![allow(clippy::unwrap_used, reason = "tests unwrap evaluation results")]

use super::*;
use crate::errors::{EvalError, EvalErrorKind};
use crate::SpecieError;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;
use specie_ir::Name;

fn shown(source: &str) -> String {
    let mut interpreter = Interpreter::new();
    let value = interpreter.execute(source).unwrap();
    interpreter.render(&value).unwrap()
}

fn runtime_error(source: &str) -> EvalError {
    match Interpreter::new().execute(source) {
        Err(SpecieError::Runtime(err)) => err,
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn test_tables_have_unique_names() {
    for tag in TypeTag::ALL {
        let mut seen = FxHashSet::default();
        for table in type_methods(tag) {
            for method in *table {
                assert!(
                    seen.insert(method.name),
                    "{tag} registers '{}' twice",
                    method.name
                );
            }
        }
    }
}

#[test]
fn test_common_methods() {
    assert_eq!(shown("[1.eq(1.0), \"a\".neq(\"a\")]"), "[true, false]");
    assert_eq!(shown("[0.asBool(), [1].asBool()]"), "[false, true]");
    assert_eq!(shown("[1, 2].asString().count()"), "6");
    assert_eq!(shown("[1].asHash() == [1.0].asHash()"), "true");
}

#[test]
fn test_numeric_methods() {
    assert_eq!(shown("[3.cmp(4), 4.cmp(4), 5.cmp(4)]"), "[-1, 0, 1]");
    assert_eq!(shown("[2.mul(3), 1.5.add(1), 7.div(2)]"), "[6, 2.5, 3.5]");
    assert_eq!(shown("\"b\" > \"a\""), "true");
}

#[test]
fn test_division_by_zero() {
    let err = runtime_error("1 / 0");
    assert_eq!(err.message(), "Division by zero");
    let err = runtime_error("1.5 / 0.0");
    assert_eq!(err.message(), "Division by zero");
}

#[test]
fn test_integer_overflow_is_an_error() {
    let err = runtime_error("9223372036854775807 + 1");
    assert_eq!(err.message(), "Integer overflow in add");
}

#[test]
fn test_ordering_across_types_fails() {
    let err = runtime_error("1 < \"a\"");
    assert!(matches!(err.kind, EvalErrorKind::InvalidOperation { .. }));
}

#[test]
fn test_string_methods() {
    assert_eq!(shown("\"ab\" + \"cd\""), "abcd");
    assert_eq!(shown("\"héllo\".count()"), "5");
    assert_eq!(shown("[\"abc\".at(0), \"abc\".at(-1)]"), "[a, c]");
    assert_eq!(shown("[\"Abc\".upper(), \"Abc\".lower()]"), "[ABC, abc]");
    assert_eq!(shown("\"haystack\".contains(\"st\")"), "true");
    assert_eq!(shown("\"Coffee\".match(\"COF\")"), "true");
}

#[test]
fn test_string_index_out_of_range() {
    let err = runtime_error("\"abc\".at(3)");
    assert_eq!(err.kind, EvalErrorKind::UndefinedIndex(3));
}

#[test]
fn test_invalid_pattern() {
    let err = runtime_error("\"abc\".match(\"(\")");
    assert!(matches!(err.kind, EvalErrorKind::InvalidValue(_)));
}

#[test]
fn test_regex_methods() {
    assert_eq!(shown("/b+/.match(\"abbc\")"), "true");
    assert_eq!(shown("/B/.contains(\"abc\")"), "false");
}

#[test]
fn test_date_arithmetic() {
    assert_eq!(shown("2024-02-28 + 2"), "2024-03-01");
    assert_eq!(shown("2024-03-01 - 1"), "2024-02-29");
    assert_eq!(shown("2024-03-01 - 2023-03-01"), "366");
    assert_eq!(
        shown("var d = 2021-07-04\n[d.year(), d.month(), d.day()]"),
        "[2021, 7, 4]"
    );
    assert_eq!(shown("2021-01-01 < 2021-01-02"), "true");
}

#[test]
fn test_date_shift_out_of_range_is_an_error() {
    let err = runtime_error("(2020-01-01 + 9223372036854700000).year()");
    assert_eq!(
        err.kind,
        EvalErrorKind::InvalidValue(
            "Date 2020-01-01 + 9223372036854700000 is out of range".to_owned()
        )
    );
    let err = runtime_error("2020-01-01 - 9223372036854775807");
    assert!(matches!(err.kind, EvalErrorKind::InvalidValue(_)));
    let err = runtime_error("2020-01-01 - -9223372036854775808");
    assert!(matches!(err.kind, EvalErrorKind::InvalidValue(_)));
    let err = runtime_error("2020-01-01 + -100000000");
    assert!(matches!(err.kind, EvalErrorKind::InvalidValue(_)));
}

#[test]
fn test_date_difference_near_calendar_limits() {
    let source = "var late = 2000-01-01 + 90000000
                  var early = 2000-01-01 - 90000000
                  [late - early, early - late, late.year() > 200000, early.year() < -200000]";
    assert_eq!(shown(source), "[180000000, -180000000, true, true]");
    assert_eq!(shown("2000-01-01 - -1 == 2000-01-02"), "true");
}

#[test]
fn test_list_methods() {
    assert_eq!(shown("[1, 2, 3].at(-1)"), "3");
    assert_eq!(shown("[1, 2, 1].delete(1)"), "[2, 1]");
    assert_eq!(shown("[1].delete(5)"), "[1]");
    assert_eq!(shown("[1].addAll([2, 3])"), "[1, 2, 3]");
    assert_eq!(shown("[1].insert(2).add(3)"), "[1, 2, 3]");
    assert_eq!(shown("[[1], 2].contains([1])"), "true");
    let err = runtime_error("[1].at(1)");
    assert_eq!(err.kind, EvalErrorKind::UndefinedIndex(1));
}

#[test]
fn test_list_methods_given_their_own_receiver() {
    assert_eq!(shown("var xs = [[1]]\nxs.delete(xs)"), "[[1]]");
    let source = "var xs = [1]\nxs.insert(xs)\n\
                  [xs.contains(xs), xs == xs, [xs] == [xs], xs.delete(xs).count()]";
    assert_eq!(shown(source), "[true, true, true, 1]");
    assert_eq!(shown("var xs = [1, 2]\nxs.addAll(xs)"), "[1, 2, 1, 2]");
}

#[test]
fn test_record_methods() {
    assert_eq!(shown("{a: 1}.at(\"a\")"), "1");
    assert_eq!(shown("{a: 1}.insert(\"b\", 2)"), "{a: 1, b: 2}");
    assert_eq!(shown("{a: 1, b: 2}.delete(\"a\")"), "{b: 2}");
    assert_eq!(shown("{a: 1}.contains(\"b\")"), "false");
    let err = runtime_error("{a: 1}.delete(\"b\")");
    assert_eq!(err.kind, EvalErrorKind::UndefinedField(Name::new("b")));
}

#[test]
fn test_map_methods() {
    let source = "var m = map()\nm.insert(1, \"one\")\nm.insert(\"k\", [2])\n\
                  [m.at(1), m.count(), m.keys(), m.values(), m.contains([1])]";
    assert_eq!(shown(source), "[one, 2, [1, k], [[2]], false]");
    assert_eq!(shown("map().insert(1, 2).delete(1).count()"), "0");

    let err = runtime_error("map().at(\"missing\")");
    assert_eq!(err.kind, EvalErrorKind::UndefinedKey("missing".to_owned()));
    let err = runtime_error("map().insert([1], 2)");
    assert!(matches!(err.kind, EvalErrorKind::InvalidType(_)));
}

#[test]
fn test_method_arity_is_checked() {
    let err = runtime_error("[1].count(1)");
    assert_eq!(err.message(), "Expected 0 arguments, got 1");
}
