mod common;

use common::run;

#[test]
fn breaks_out_of_while() {
    let source = r#"
        var i = 0;
        while (true) {
            if (i == 3) break;
            print i;
            i = i + 1;
        }
    "#;
    let result = run(source);
    assert!(!result.had_error && !result.had_runtime_error);
    assert_eq!(result.output, "0\n1\n2\n");
}

#[test]
fn breaks_out_of_for() {
    let source = "for (var i = 0; i < 5; i = i + 1) { if (i == 3) break; print i; }";
    let result = run(source);
    assert!(!result.had_error && !result.had_runtime_error);
    assert_eq!(result.output, "0\n1\n2\n");
}

#[test]
fn outside_a_loop_is_a_static_error() {
    let result = run("break;");
    assert!(result.had_error);
}

#[test]
fn only_breaks_innermost_loop() {
    let source = r#"
        for (var i = 0; i < 2; i = i + 1) {
            for (var j = 0; j < 5; j = j + 1) {
                if (j == 1) break;
                print j;
            }
        }
    "#;
    let result = run(source);
    assert!(!result.had_error && !result.had_runtime_error);
    assert_eq!(result.output, "0\n0\n");
}
