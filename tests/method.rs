mod common;

use common::{run, run_ok};

#[test]
fn method_can_reference_other_fields_via_this() {
    let source = r#"
        class Box {
            init(value) { this.value = value; }
            get() { return this.value; }
        }
        print Box(7).get();
    "#;
    assert_eq!(run_ok(source), "7\n");
}

#[test]
fn bound_method_keeps_its_receiver() {
    let source = r#"
        class Box {
            init(value) { this.value = value; }
            get() { return this.value; }
        }
        var box = Box(9);
        var get = box.get;
        print get();
    "#;
    assert_eq!(run_ok(source), "9\n");
}

#[test]
fn calling_a_missing_method_is_a_runtime_error() {
    let result = run("class Box {} Box().missing();");
    assert!(result.had_runtime_error);
}
