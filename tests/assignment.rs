mod common;

use common::{run, run_ok};

#[test]
fn global() {
    let output = run_ok("var a = 1; a = 2; print a;");
    assert_eq!(output, "2\n");
}

#[test]
fn chained() {
    let output = run_ok("var a = 1; var b = 2; a = b = 3; print a; print b;");
    assert_eq!(output, "3\n3\n");
}

#[test]
fn to_undeclared_variable_is_a_runtime_error() {
    let result = run("a = 1;");
    assert!(result.had_runtime_error);
}

#[test]
fn invalid_target_is_a_static_error() {
    let result = run("var a = 1; a + 1 = 2;");
    assert!(result.had_error);
    assert!(!result.had_runtime_error);
}
