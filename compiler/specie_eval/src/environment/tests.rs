use super::*;
use pretty_assertions::assert_eq;

fn name(text: &str) -> Name {
    Name::new(text)
}

#[test]
fn test_scope_define_get() {
    let mut scope = Scope::new();
    scope.define(name("x"), Value::Int(42));
    assert_eq!(scope.get("x"), Some(Value::Int(42)));
    assert_eq!(scope.get("y"), None);
}

#[test]
fn test_child_shadows_parent() {
    let parent = Env::new(Scope::new());
    parent.borrow_mut().define(name("x"), Value::Int(1));

    let child = parent.child();
    child.borrow_mut().define(name("x"), Value::Int(2));

    assert_eq!(child.borrow().lookup("x"), Some(Value::Int(2)));
    assert_eq!(parent.borrow().lookup("x"), Some(Value::Int(1)));
}

#[test]
fn test_lookup_walks_the_chain() {
    let root = Env::new(Scope::new());
    root.borrow_mut().define(name("x"), Value::Int(1));
    let leaf = root.child().child();
    assert_eq!(leaf.borrow().lookup("x"), Some(Value::Int(1)));
    assert_eq!(leaf.borrow().get("x"), None);
}

#[test]
fn test_get_at_reads_exact_frame() {
    let root = Env::new(Scope::new());
    root.borrow_mut().define(name("x"), Value::Int(1));
    let middle = root.child();
    middle.borrow_mut().define(name("x"), Value::Int(2));
    let leaf = middle.child();

    assert_eq!(leaf.get_at(1, "x"), Some(Value::Int(2)));
    assert_eq!(leaf.get_at(2, "x"), Some(Value::Int(1)));
}

#[test]
fn test_assign_at_writes_exact_frame() {
    let root = Env::new(Scope::new());
    root.borrow_mut().define(name("x"), Value::Int(1));
    let leaf = root.child();
    leaf.borrow_mut().define(name("x"), Value::Int(2));

    assert!(leaf.assign_at(1, "x", Value::Int(10)));
    assert_eq!(root.borrow().get("x"), Some(Value::Int(10)));
    assert_eq!(leaf.borrow().get("x"), Some(Value::Int(2)));
}

#[test]
fn test_assign_by_name_fails_for_unbound() {
    let root = Env::new(Scope::new());
    let leaf = root.child();
    assert!(!leaf.borrow_mut().assign("missing", Value::Null));
}

#[test]
fn test_ancestor_past_root_is_none() {
    let root = Env::new(Scope::new());
    let leaf = root.child();
    assert!(leaf.ancestor(1).is_some_and(|env| env.ptr_eq(&root)));
    assert!(leaf.ancestor(2).is_none());
}
