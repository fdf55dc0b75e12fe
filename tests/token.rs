use lox_tree::scanner::Scanner;
use lox_tree::token::Type;

#[test]
fn scans_keywords_and_punctuation() {
    let (tokens, errors) = Scanner::new("var a = 1;").scan_tokens();
    assert!(errors.is_empty());

    let kinds: Vec<Type> = tokens.iter().map(|t| t.r#type).collect();
    assert_eq!(
        kinds,
        vec![Type::Var, Type::Identifier, Type::Equal, Type::Number, Type::Semicolon, Type::EOF]
    );
}

#[test]
fn ternary_tokens_are_recognized() {
    let (tokens, errors) = Scanner::new("a ? b : c").scan_tokens();
    assert!(errors.is_empty());

    let kinds: Vec<Type> = tokens.iter().map(|t| t.r#type).collect();
    assert_eq!(
        kinds,
        vec![Type::Identifier, Type::Question, Type::Identifier, Type::Colon, Type::Identifier, Type::EOF]
    );
}

#[test]
fn an_unexpected_character_is_reported_but_scanning_continues() {
    let (tokens, errors) = Scanner::new("@ print 1;").scan_tokens();
    assert!(!errors.is_empty());
    assert!(tokens.iter().any(|t| t.r#type == Type::Print));
}
