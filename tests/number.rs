mod common;

use common::run_ok;

#[test]
fn integer_literal() {
    assert_eq!(run_ok("print 123;"), "123\n");
}

#[test]
fn fractional_literal() {
    assert_eq!(run_ok("print 0.5;"), "0.5\n");
}

#[test]
fn arithmetic_uses_double_precision() {
    assert_eq!(run_ok("print 10 / 4;"), "2.5\n");
}

#[test]
fn negative_numbers() {
    assert_eq!(run_ok("print -5;"), "-5\n");
}
