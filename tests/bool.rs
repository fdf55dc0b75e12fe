mod common;

use common::run_ok;

#[test]
fn literals() {
    assert_eq!(run_ok("print true; print false;"), "true\nfalse\n");
}

#[test]
fn not() {
    assert_eq!(run_ok("print !true; print !false;"), "false\ntrue\n");
}

#[test]
fn equality() {
    let source = r#"
        print true == true;
        print true == false;
        print true == 1;
    "#;
    assert_eq!(run_ok(source), "true\nfalse\nfalse\n");
}
