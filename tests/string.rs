mod common;

use common::run;

#[test]
fn literal() {
    let result = run(r#"print "hello";"#);
    assert_eq!(result.output, "hello\n");
}

#[test]
fn can_contain_spaces_and_punctuation() {
    let result = run(r#"print "hello, world!";"#);
    assert_eq!(result.output, "hello, world!\n");
}

#[test]
fn multiline_strings_are_allowed() {
    let result = run("print \"line one\nline two\";");
    assert!(!result.had_error);
    assert_eq!(result.output, "line one\nline two\n");
}

#[test]
fn unterminated_string_is_a_static_error() {
    let result = run("print \"unterminated;");
    assert!(result.had_error);
}
