mod common;

use common::run_ok;

#[test]
fn runs_while_condition_is_truthy() {
    let source = r#"
        var i = 0;
        while (i < 3) {
            print i;
            i = i + 1;
        }
    "#;
    assert_eq!(run_ok(source), "0\n1\n2\n");
}

#[test]
fn never_runs_when_condition_starts_falsey() {
    assert_eq!(run_ok("while (false) print \"never\";"), "");
}
