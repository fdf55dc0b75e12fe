mod common;

use common::{run, run_ok};

#[test]
fn true_condition_yields_the_then_branch() {
    assert_eq!(run_ok("print true ? 1 : 2;"), "1\n");
}

#[test]
fn false_condition_yields_the_else_branch() {
    assert_eq!(run_ok("print false ? 1 : 2;"), "2\n");
}

#[test]
fn is_right_associative() {
    // `a ? b : c ? d : e` parses as `a ? b : (c ? d : e)`.
    assert_eq!(run_ok("print false ? 1 : true ? 2 : 3;"), "2\n");
}

#[test]
fn condition_uses_truthiness() {
    assert_eq!(run_ok("print 0 ? \"truthy\" : \"falsey\";"), "truthy\n");
}

#[test]
fn binds_looser_than_or() {
    assert_eq!(run_ok("print true or false ? 1 : 2;"), "1\n");
}

#[test]
fn an_assignment_after_the_else_branch_is_not_absorbed_into_it() {
    // `cond ? a : b = 5` must parse as `(cond ? a : b) = 5`, an invalid assignment
    // target, rather than letting `= 5` slip inside the else branch as `cond ? a : (b = 5)`.
    let result = run("var a = 1; var b = 2; true ? a : b = 5;");
    assert!(result.had_error);
}
