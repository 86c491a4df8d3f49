use super::*;
use crate::value::Value;
use pretty_assertions::assert_eq;
use specie_ir::Name;

#[test]
fn test_previous_frame_restored_on_drop() {
    let mut interpreter = Interpreter::new();
    let outer = interpreter.env.clone();
    {
        let frame = outer.child();
        let scoped = interpreter.scoped_env(frame.clone());
        assert!(scoped.env.ptr_eq(&frame));
    }
    assert!(interpreter.env.ptr_eq(&outer));
}

#[test]
fn test_frame_restored_when_body_fails() {
    let mut interpreter = Interpreter::new();
    let outer = interpreter.env.clone();
    let result: Result<(), &str> = interpreter.with_child_scope(|scoped| {
        scoped
            .env
            .borrow_mut()
            .define(Name::new("temp"), Value::Int(1));
        Err("boom")
    });
    assert_eq!(result, Err("boom"));
    assert!(interpreter.env.ptr_eq(&outer));
    assert_eq!(interpreter.env.borrow().get("temp"), None);
}

#[test]
fn test_resolutions_restored_after_scoped_with() {
    let mut interpreter = Interpreter::new();
    let before = Rc::clone(&interpreter.resolutions);
    {
        let globals = interpreter.globals().clone();
        let scoped = interpreter.scoped_with(globals, Rc::new(Resolutions::default()));
        assert!(!Rc::ptr_eq(&scoped.resolutions, &before));
    }
    assert!(Rc::ptr_eq(&interpreter.resolutions, &before));
}

#[test]
fn test_nested_guards_unwind_in_order() {
    let mut interpreter = Interpreter::new();
    let root = interpreter.env.clone();
    interpreter.with_child_scope(|first| {
        let first_frame = first.env.clone();
        first.with_child_scope(|second| {
            assert!(second.env.ancestor(2).is_some_and(|env| env.ptr_eq(&root)));
            assert!(second.env.ancestor(1).is_some_and(|env| env.ptr_eq(&first_frame)));
        });
        assert!(first.env.ptr_eq(&first_frame));
    });
    assert!(interpreter.env.ptr_eq(&root));
}
