mod common;

use common::{run, run_ok};

#[test]
fn arithmetic() {
    assert_eq!(run_ok("print 1 + 2; print 5 - 3; print 2 * 3; print 6 / 2;"), "3\n2\n6\n3\n");
}

#[test]
fn comparison() {
    let source = "print 1 < 2; print 2 <= 2; print 3 > 2; print 3 >= 4; print 1 == 1; print 1 != 2;";
    assert_eq!(run_ok(source), "true\ntrue\ntrue\nfalse\ntrue\ntrue\n");
}

#[test]
fn string_concatenation() {
    assert_eq!(run_ok(r#"print "a" + "b";"#), "ab\n");
}

#[test]
fn adding_a_number_to_a_string_is_a_runtime_error() {
    let result = run(r#"print "a" + 1;"#);
    assert!(result.had_runtime_error);
}

#[test]
fn dividing_non_numbers_is_a_runtime_error() {
    let result = run(r#"print "a" / 1;"#);
    assert!(result.had_runtime_error);
}

#[test]
fn negating_a_non_number_is_a_runtime_error() {
    let result = run(r#"print -"a";"#);
    assert!(result.had_runtime_error);
    assert!(result.diagnostics.contains("Operand must be a number."));
}

#[test]
fn adding_mismatched_types_reports_the_plural_operands_message() {
    let result = run(r#"print "a" + 1;"#);
    assert!(result.had_runtime_error);
    assert!(result.diagnostics.contains("Operands must be numbers."));
}
