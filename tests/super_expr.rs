mod common;

use common::{run, run_ok};

#[test]
fn calls_the_overridden_method() {
    let source = r#"
        class Doughnut {
            cook() { return "Fry until golden brown."; }
        }
        class BostonCream < Doughnut {
            cook() { return super.cook() + " Then top with frosting."; }
        }
        print BostonCream().cook();
    "#;
    assert_eq!(run_ok(source), "Fry until golden brown. Then top with frosting.\n");
}

#[test]
fn resolves_against_the_defining_classs_superclass_not_the_receivers() {
    let source = r#"
        class A { m() { return "A"; } }
        class B < A { m() { return "B"; } test() { return super.m(); } }
        class C < B { m() { return "C"; } }
        print C().test();
    "#;
    assert_eq!(run_ok(source), "A\n");
}

#[test]
fn outside_a_subclass_is_a_static_error() {
    let result = run("class A { m() { super.m(); } }");
    assert!(result.had_error);
}

#[test]
fn outside_any_class_is_a_static_error() {
    let result = run("super.m();");
    assert!(result.had_error);
}
