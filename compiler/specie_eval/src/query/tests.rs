#![allow(clippy::unwrap_used, reason = "tests unwrap evaluation results")]

use super::*;
use crate::{EvalErrorKind, SpecieError};
use pretty_assertions::assert_eq;

fn run(source: &str) -> Value {
    Interpreter::new().execute(source).unwrap()
}

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
fn test_where_binds_record_fields() {
    assert_eq!(
        shown("from t in [{a: 1}, {a: 2}, {a: 3}] where a > 1"),
        "[{a: 2}, {a: 3}]"
    );
}

#[test]
fn test_select_maps_elements() {
    assert_eq!(shown("from x in [1, 2, 3] select x * 10"), "[10, 20, 30]");
    assert_eq!(shown("from t in [{a: 1, b: 2}] select t.b"), "[2]");
}

#[test]
fn test_lazy_query_is_an_iterator() {
    assert_eq!(
        run("from x in [1, 2] select x").type_tag(),
        crate::TypeTag::Iterator
    );
}

#[test]
fn test_distinct_drop_take() {
    assert_eq!(shown("from x in [1, 2, 1, 3, 2] distinct"), "[1, 2, 3]");
    assert_eq!(shown("from x in [1, 2, 3, 4] drop 1 take 2"), "[2, 3]");
    assert_eq!(shown("from x in [1, 2] drop 5"), "[]");
    assert_eq!(shown("from x in [1, 2] take 0"), "[]");
}

#[test]
fn test_negative_take_is_invalid() {
    let err = runtime_error("from x in [1] take -1");
    assert!(matches!(err.kind, EvalErrorKind::InvalidValue(_)));
}

#[test]
fn test_aggregates() {
    assert_eq!(run("from x in [1, 2, 3] count"), Value::Int(3));
    assert_eq!(run("from x in [1, 2, 3] sum"), Value::Int(6));
    assert_eq!(run("from x in [1, 2.5] sum"), Value::Float(3.5));
    assert_eq!(run("from t in [{a: 2}, {a: 4}] average a"), Value::Float(3.0));
    assert_eq!(run("from x in [] average"), Value::Null);
    assert_eq!(run("from x in [3, 1, 2] min"), Value::Int(1));
    assert_eq!(run("from x in [3, 1, 2] max"), Value::Int(3));
    assert_eq!(run("from x in [] max"), Value::Null);
    assert_eq!(
        run("from t in [{n: \"b\"}, {n: \"a\"}] min n"),
        Value::string("a")
    );
}

#[test]
fn test_sum_rejects_non_numeric_items() {
    let err = runtime_error("from x in [1, \"a\"] sum");
    assert!(matches!(err.kind, EvalErrorKind::InvalidType(_)));
}

#[test]
fn test_any_all() {
    assert_eq!(run("from x in [1, 2] any x > 1"), Value::Bool(true));
    assert_eq!(run("from x in [1, 2] all x > 1"), Value::Bool(false));
    assert_eq!(run("from x in [] all x > 1"), Value::Bool(true));
}

#[test]
fn test_fold_calls_function_with_accumulator_first() {
    assert_eq!(
        run("from x in [1, 2, 3] fold 10, (acc, x): acc - x"),
        Value::Int(4)
    );
}

#[test]
fn test_each_runs_for_effect() {
    let source = "var total = 0\nfrom x in [1, 2, 3] each total = total + x\ntotal";
    assert_eq!(run(source), Value::Int(6));
}

#[test]
fn test_delete_removes_matching_elements() {
    let source = "var xs = [1, 2, 3, 4]\nvar n = from x in xs where x > 2 delete\n[n, xs]";
    assert_eq!(shown(source), "[2, [1, 2]]");
}

#[test]
fn test_delete_from_map() {
    let source = "var m = map()\nm.insert(\"a\", 1)\nm.insert(\"b\", 2)\n\
                  from e in m where value > 1 delete\nm.keys()";
    assert_eq!(shown(source), "[a]");
}

#[test]
fn test_stage_sees_outer_locals() {
    let source = "do\nvar limit = 1\nfrom x in [1, 2, 3] where x > limit count\nend";
    assert_eq!(run(source), Value::Int(2));
}

#[test]
fn test_query_over_lazy_query_restarts_source() {
    let source = "var big = from x in [1, 2, 3] where x > 1\n\
                  [from x in big count, from x in big count]";
    assert_eq!(shown(source), "[2, 2]");
}

#[test]
fn test_nested_traversals_of_one_iterator_are_independent() {
    let source = "var it = from x in [1, 2] select x\nfrom y in it select from z in it count";
    assert_eq!(shown(source), "[2, 2]");
    let source = "var it = [1, 2].iter()\nfor a in it for b in it a * 10 + b";
    assert_eq!(shown(source), "[[11, 12], [21, 22]]");
}

#[test]
fn test_traversal_leaves_iterator_position_alone() {
    let source = "var it = [1, 2, 3].iter()\nit.advance()\n\
                  var n = from x in it count\n[n, it.current(), it.toList()]";
    assert_eq!(shown(source), "[3, 1, [1, 2, 3]]");
}

#[test]
fn test_delete_through_an_iterator_reaches_the_container() {
    let source = "var xs = [1, 2, 3]\nvar big = from x in xs where x > 1\n\
                  [from x in big delete, xs]";
    assert_eq!(shown(source), "[2, [1]]");
}

#[test]
fn test_query_over_non_iterable_fails() {
    let err = runtime_error("from x in 5 count");
    assert!(matches!(err.kind, EvalErrorKind::InvalidType(_)));
}

#[test]
fn test_numeric_sum_promotes_to_float() {
    let mut sum = NumericSum::new("sum");
    sum.add(&Value::Int(1)).unwrap();
    assert_eq!(sum.total(), Value::Int(1));
    sum.add(&Value::Float(0.5)).unwrap();
    sum.add(&Value::Int(1)).unwrap();
    assert_eq!(sum.total(), Value::Float(2.5));
    assert_eq!(sum.average(), Value::Float(2.5 / 3.0));
}
