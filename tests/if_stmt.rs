mod common;

use common::run_ok;

#[test]
fn true_branch_runs() {
    assert_eq!(run_ok("if (true) print \"then\"; else print \"else\";"), "then\n");
}

#[test]
fn false_branch_runs() {
    assert_eq!(run_ok("if (false) print \"then\"; else print \"else\";"), "else\n");
}

#[test]
fn else_is_optional() {
    assert_eq!(run_ok("if (false) print \"then\";"), "");
}

#[test]
fn dangling_else_binds_to_nearest_if() {
    let source = "if (true) if (false) print \"inner\"; else print \"dangling\";";
    assert_eq!(run_ok(source), "dangling\n");
}

#[test]
fn condition_uses_truthiness_not_just_booleans() {
    assert_eq!(run_ok("if (0) print \"truthy\"; else print \"falsey\";"), "truthy\n");
    assert_eq!(run_ok("if (nil) print \"truthy\"; else print \"falsey\";"), "falsey\n");
}
