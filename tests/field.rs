mod common;

use common::run;

#[test]
fn set_and_get_roundtrip() {
    let source = r#"
        class Box {}
        var box = Box();
        box.value = 42;
        print box.value;
    "#;
    let result = run(source);
    assert!(!result.had_error && !result.had_runtime_error);
    assert_eq!(result.output, "42\n");
}

#[test]
fn field_shadows_a_method_of_the_same_name() {
    let source = r#"
        class Box {
            value() { return "method"; }
        }
        var box = Box();
        box.value = "field";
        print box.value;
    "#;
    let result = run(source);
    assert!(!result.had_error && !result.had_runtime_error);
    assert_eq!(result.output, "field\n");
}

#[test]
fn reading_a_missing_field_is_a_runtime_error() {
    let result = run("class Box {} print Box().missing;");
    assert!(result.had_runtime_error);
}

#[test]
fn setting_on_a_non_instance_is_a_runtime_error() {
    let result = run("var a = 1; a.b = 2;");
    assert!(result.had_runtime_error);
}
