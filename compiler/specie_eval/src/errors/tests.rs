use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_or_at_keeps_innermost_location() {
    let err = undefined_variable(&Name::new("x"))
        .or_at(Location::new(2, 4))
        .or_at(Location::new(0, 0));
    assert_eq!(err.location, Some(Location::new(2, 4)));
    assert_eq!(err.at(Location::new(1, 1)).location, Some(Location::new(1, 1)));
}

#[test]
fn test_display_includes_location() {
    let err = division_by_zero();
    assert_eq!(err.to_string(), "Division by zero");
    assert_eq!(
        err.or_at(Location::new(0, 2)).to_string(),
        "Division by zero at line 1, col 3"
    );
}

#[test]
fn test_operation_messages_name_operand_types() {
    let both = unsupported_operands("add", &Value::Int(1), &Value::string("a"));
    assert_eq!(
        both.message(),
        "Unsupported operation 'add' for types Int and String"
    );
    let one = unsupported_operand("neg", &Value::Bool(true));
    assert_eq!(one.message(), "Unsupported operation 'neg' for type Bool");
}

#[test]
fn test_codes_follow_kind() {
    assert_eq!(invalid_type("x").code(), ErrorCode::E4001);
    assert_eq!(division_by_zero().code(), ErrorCode::E4002);
    assert_eq!(not_callable(&Value::Null).code(), ErrorCode::E4004);
    assert_eq!(undefined_index(3).code(), ErrorCode::E4008);
    assert_eq!(iterator_not_advanced().code(), ErrorCode::E4010);
    assert_eq!(circular_include("a.sp").code(), ErrorCode::E4011);
}

#[test]
fn test_accessor_messages() {
    assert_eq!(undefined_index(-4).message(), "Undefined index '-4'");
    assert_eq!(undefined_key(&Value::string("k")).message(), "Undefined key 'k'");
    assert_eq!(
        undefined_method("shout", &Value::Int(1)).message(),
        "Undefined method 'shout' for type Int"
    );
    assert_eq!(
        wrong_arg_type("at", "an Int", &Value::string("x")).message(),
        "at() expects an Int, got String"
    );
}

#[test]
fn test_notes_reach_the_diagnostic() {
    let err = circular_include("a.sp")
        .with_note("in 'b.sp' at line 1, col 8")
        .or_at(Location::new(0, 7));
    let diagnostic = err.to_diagnostic();
    let expected = Diagnostic::error(ErrorCode::E4011)
        .with_message("Circular include of 'a.sp'")
        .at(Location::new(0, 7))
        .with_note("in 'b.sp' at line 1, col 8");
    assert_eq!(diagnostic, expected);
}
