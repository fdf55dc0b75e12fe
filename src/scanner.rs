use std::str::Chars;

use log::trace;
use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::ScanError;
use crate::literal::Literal;
use crate::token::{Location, Token, Type};

/// Converts source text into a flat token stream. Reports lexical errors (an
/// unterminated string, a stray character) by collecting them rather than aborting;
/// the driver decides whether to continue to parsing once scanning finishes.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
    start: usize,
    current: usize,
    line: usize,
    column_offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: vec![],
            errors: vec![],
            start: 0,
            current: 0,
            line: 0,
            column_offset: 0,
        }
    }

    /// Scans the whole source, returning the tokens (always EOF-terminated) and any
    /// lexical errors encountered along the way.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<ScanError>) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(
            Type::EOF,
            String::new(),
            None,
            Location::new(self.line, 0),
        ));

        trace!("scanned {} token(s), {} error(s)", self.tokens.len(), self.errors.len());

        (self.tokens, self.errors)
    }

    fn advance(&mut self) -> char {
        match self.source.next() {
            Some(c) => {
                self.current += 1;
                c
            }
            None => panic!("tried to advance past end of the file."),
        }
    }

    fn peek(&mut self) -> char {
        *self.source.peek().unwrap_or(&'\0')
    }

    fn peek_next(&mut self) -> char {
        *self.source.peek_next().unwrap_or(&'\0')
    }

    fn here(&self) -> Location {
        Location::new(self.line, self.start - self.column_offset)
    }

    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(r#type, lexeme, literal, self.here()));
    }

    fn add_single_char_token(&mut self, r#type: Type) {
        let c = self.advance();
        self.add_token(r#type, c.to_string(), None);
    }

    fn add_double_char_token(&mut self, r#type: Type) {
        let first = self.advance();
        let second = self.advance();
        self.add_token(r#type, format!("{first}{second}"), None);
    }

    fn error(&mut self, location: Location, message: impl Into<String>) {
        self.errors.push(ScanError { location, message: message.into() });
    }

    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    fn string(&mut self) {
        let location = self.here();
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            if self.is_at_end() {
                self.error(location, "Unterminated string.");
                return;
            }

            let c = self.peek();
            if c == '"' {
                break;
            }

            if c == '\n' {
                self.line += 1;
                self.column_offset = self.current + 1;
            }

            value.push(self.advance());
        }

        self.advance(); // closing quote
        self.add_token(Type::String, value.clone(), Some(Literal::String(value)));
    }

    fn number(&mut self) {
        let mut value = String::new();

        while self.peek().is_ascii_digit() {
            value.push(self.advance());
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            value.push(self.advance()); // the dot

            while self.peek().is_ascii_digit() {
                value.push(self.advance());
            }
        }

        let number: f64 = value.parse().expect("scanned digits to form a valid number");
        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    fn identifier(&mut self) {
        let mut value = String::new();

        while { let c = self.peek(); c.is_alphanumeric() || c == '_' } {
            value.push(self.advance());
        }

        let token_type = match value.as_str() {
            "and" => Type::And,
            "break" => Type::Break,
            "class" => Type::Class,
            "else" => Type::Else,
            "false" => Type::False,
            "for" => Type::For,
            "fun" => Type::Fun,
            "if" => Type::If,
            "nil" => Type::Nil,
            "or" => Type::Or,
            "print" => Type::Print,
            "return" => Type::Return,
            "super" => Type::Super,
            "this" => Type::This,
            "true" => Type::True,
            "var" => Type::Var,
            "while" => Type::While,
            _ => Type::Identifier,
        };

        self.add_token(token_type, value, None);
    }

    /// Consumes a `/* ... */` block comment, the opening `/*` already consumed.
    /// Nested comments are supported; an unterminated comment is a scan error anchored
    /// at the `/*` that opened it.
    fn block_comment(&mut self, location: Location) {
        let mut depth = 1usize;

        while depth > 0 {
            if self.is_at_end() {
                self.error(location, "Unterminated block comment.");
                return;
            }

            if self.peek() == '/' && self.peek_next() == '*' {
                self.advance();
                self.advance();
                depth += 1;
            } else if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                depth -= 1;
            } else {
                if self.peek() == '\n' {
                    self.line += 1;
                    self.column_offset = self.current + 1;
                }
                self.advance();
            }
        }
    }

    fn scan_token(&mut self) {
        let c = self.peek();
        match c {
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),
            '?' => self.add_single_char_token(Type::Question),
            ':' => self.add_single_char_token(Type::Colon),

            '!' => {
                if self.peek_next() == '=' {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang);
                }
            }
            '=' => {
                if self.peek_next() == '=' {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal);
                }
            }
            '<' => {
                if self.peek_next() == '=' {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less);
                }
            }
            '>' => {
                if self.peek_next() == '=' {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater);
                }
            }
            '/' => {
                if self.peek_next() == '/' {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else if self.peek_next() == '*' {
                    let location = self.here();
                    self.advance();
                    self.advance();
                    self.block_comment(location);
                } else {
                    self.add_single_char_token(Type::Slash);
                }
            }

            ' ' | '\r' | '\t' => {
                self.advance();
            }

            '\n' => {
                self.advance();
                self.line += 1;
                self.column_offset = self.current;
            }

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),

            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                let location = self.here();
                self.advance();
                self.error(location, format!("Unexpected character '{c}'."));
            }
        }
    }
}
