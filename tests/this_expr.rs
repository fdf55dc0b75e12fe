mod common;

use common::{run, run_ok};

#[test]
fn refers_to_the_receiving_instance() {
    let source = r#"
        class Box {
            init(value) { this.value = value; }
            show() { print this.value; }
        }
        Box(5).show();
    "#;
    assert_eq!(run_ok(source), "5\n");
}

#[test]
fn closed_over_functions_still_see_this() {
    let source = r#"
        class Box {
            init(value) { this.value = value; }
            closure() {
                fun inner() { return this.value; }
                return inner();
            }
        }
        print Box(6).closure();
    "#;
    assert_eq!(run_ok(source), "6\n");
}

#[test]
fn outside_a_method_is_a_static_error() {
    let result = run("print this;");
    assert!(result.had_error);
}
