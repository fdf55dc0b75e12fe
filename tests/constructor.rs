mod common;

use common::{run, run_ok};

#[test]
fn init_runs_on_construction() {
    let source = r#"
        class Foo {
            init(value) { this.value = value; }
        }
        print Foo(1).value;
    "#;
    assert_eq!(run_ok(source), "1\n");
}

#[test]
fn init_always_returns_this() {
    let source = r#"
        class Foo {
            init() { return; }
        }
        print Foo().init();
    "#;
    assert_eq!(run_ok(source), "Foo instance\n");
}

#[test]
fn init_cannot_return_a_value() {
    let source = r#"
        class Foo {
            init() { return 1; }
        }
    "#;
    let result = run(source);
    assert!(result.had_error);
}

#[test]
fn arity_follows_init_parameters() {
    let source = r#"
        class Foo {
            init(a, b) {}
        }
        Foo(1);
    "#;
    let result = run(source);
    assert!(result.had_runtime_error);
}
