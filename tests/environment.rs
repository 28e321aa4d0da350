use pretty_assertions::assert_eq;

use rox::environment::Environment;
use rox::token::Token;
use rox::value::Value;

#[test]
fn get_at_reads_the_exact_ancestor() {
    let outer = Environment::new().into_ref();
    outer.borrow_mut().define("x", Value::from("outer"));

    let inner = Environment::with_enclosing(outer.clone()).into_ref();
    inner.borrow_mut().define("x", Value::from("inner"));

    let x = Token::synthetic("x", 1);

    assert_eq!(Environment::get_at(&inner, 0, &x).unwrap().to_string(), "inner");
    assert_eq!(Environment::get_at(&inner, 1, &x).unwrap().to_string(), "outer");
}

#[test]
fn assign_at_writes_the_exact_ancestor() {
    let outer = Environment::new().into_ref();
    outer.borrow_mut().define("x", Value::Nil);

    let inner = Environment::with_enclosing(outer.clone()).into_ref();
    let x = Token::synthetic("x", 1);

    Environment::assign_at(&inner, 1, &x, Value::Bool(true)).unwrap();

    assert_eq!(outer.borrow().get(&x).unwrap(), Value::Bool(true));
}

#[test]
fn distance_past_the_outermost_scope_is_an_error() {
    let outer = Environment::new().into_ref();
    outer.borrow_mut().define("x", Value::Nil);

    let inner = Environment::with_enclosing(outer).into_ref();
    let x = Token::synthetic("x", 7);

    let read = Environment::get_at(&inner, 2, &x).unwrap_err();
    assert_eq!(read.to_string(), "No scope 2 level(s) out for 'x'.\n[line 7]");

    let write = Environment::assign_at(&inner, 3, &x, Value::Nil).unwrap_err();
    assert_eq!(write.message(), "No scope 3 level(s) out for 'x'.");
}

#[test]
fn missing_name_at_distance_is_undefined() {
    let outer = Environment::new().into_ref();
    let inner = Environment::with_enclosing(outer).into_ref();
    let y = Token::synthetic("y", 2);

    let err = Environment::get_at(&inner, 1, &y).unwrap_err();
    assert_eq!(err.message(), "Undefined variable 'y'.");
}
