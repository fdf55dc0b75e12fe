mod common;

use common::{run, run_ok};

#[test]
fn class_prints_its_name() {
    assert_eq!(run_ok("class Bagel {} print Bagel;"), "<class Bagel>\n");
}

#[test]
fn instances_print_with_instance_suffix() {
    assert_eq!(run_ok("class Bagel {} print Bagel();"), "Bagel instance\n");
}

#[test]
fn static_method_is_callable_on_the_class_itself() {
    let source = "class Math { class square(n) { return n * n; } } print Math.square(4);";
    assert_eq!(run_ok(source), "16\n");
}

#[test]
fn this_inside_a_static_method_is_a_runtime_error() {
    let source = r#"
        class Math {
            class broken() { return this; }
        }
        Math.broken();
    "#;
    let result = run(source);
    assert!(result.had_runtime_error);
}

#[test]
fn methods_are_looked_up_on_the_instance() {
    let source = r#"
        class Greeter {
            greet() { return "hi"; }
        }
        print Greeter().greet();
    "#;
    assert_eq!(run_ok(source), "hi\n");
}
