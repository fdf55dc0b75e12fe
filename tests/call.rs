mod common;

use common::run;

#[test]
fn calling_a_non_callable_is_a_runtime_error() {
    let result = run("var a = 1; a();");
    assert!(result.had_runtime_error);
}

#[test]
fn wrong_arity_is_a_runtime_error() {
    let source = "fun f(a, b) { return a + b; } f(1);";
    let result = run(source);
    assert!(result.had_runtime_error);
}

#[test]
fn more_than_255_arguments_is_a_static_error() {
    let args = (0..256).map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
    let source = format!("fun f() {{}} f({args});");
    let result = run(&source);
    assert!(result.had_error);
}
