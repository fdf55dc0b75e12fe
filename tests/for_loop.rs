mod common;

use common::run_ok;

#[test]
fn desugars_to_a_while_loop() {
    let source = "for (var i = 0; i < 3; i = i + 1) print i;";
    assert_eq!(run_ok(source), "0\n1\n2\n");
}

#[test]
fn clauses_are_all_optional() {
    let source = r#"
        var i = 0;
        for (;;) {
            if (i >= 3) break;
            print i;
            i = i + 1;
        }
    "#;
    assert_eq!(run_ok(source), "0\n1\n2\n");
}

#[test]
fn initializer_variable_is_scoped_to_the_loop() {
    let source = r#"
        for (var i = 0; i < 1; i = i + 1) {}
        var i = "outer";
        print i;
    "#;
    assert_eq!(run_ok(source), "outer\n");
}
