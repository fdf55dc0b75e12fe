mod common;

use common::run_ok;

#[test]
fn closes_over_the_defining_scope_not_the_call_site() {
    let source = r#"
        var a = "global";
        {
            fun show() { print a; }
            show();
            var a = "block";
            show();
        }
    "#;
    assert_eq!(run_ok(source), "global\nglobal\n");
}

#[test]
fn each_call_gets_a_fresh_environment() {
    let source = r#"
        fun makeCounter() {
            var count = 0;
            fun increment() {
                count = count + 1;
                return count;
            }
            return increment;
        }
        var counterA = makeCounter();
        var counterB = makeCounter();
        print counterA();
        print counterA();
        print counterB();
    "#;
    assert_eq!(run_ok(source), "1\n2\n1\n");
}
