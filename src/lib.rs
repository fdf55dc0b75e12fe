#![allow(clippy::needless_return)]

//! `lox-tree` is a tree-walking interpreter for a small, dynamically-typed, class-based
//! scripting language in the Lox family. It accepts source text and executes it, either
//! from a file or from a read-eval-print loop.
//!
//! ## Pipeline
//! Source text flows through four stages, each implemented in its own module:
//!
//! 1. [`scanner`] — source text → a flat token stream, reporting [`error::ScanError`]s
//!    for lexical mistakes (an unterminated string, a stray character) without aborting.
//! 2. [`parser`] — tokens → a list of [`stmt::Stmt`], using panic-mode recovery so one
//!    bad declaration doesn't prevent the rest of the file from being parsed and
//!    reported on. Reports [`error::ParseError`]s.
//! 3. [`resolver`] — a static pass that attaches every variable reference to its
//!    declaring scope by hop count, enforces scope rules the grammar can't express
//!    (`return` outside a function, `this` outside a class), and flags unused locals as
//!    [`error::Warning`]s. Reports [`error::ResolveError`]s.
//! 4. [`interpreter`] — walks the resolved AST against a lexical [`environment`] model,
//!    implementing closures, classes, inheritance, and method binding. Reports a single
//!    [`error::RuntimeError`] if execution fails.
//!
//! Each stage bails out early if the previous one reported an error; [`Lox::run`] drives
//! that sequencing and [`error::Sink`] renders whatever diagnostics come out of it.

pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use std::io::Write;
use std::path::Path;
use std::{fs, io};

use log::debug;

use error::Sink;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// Owns the interpreter's global state across an entire run (a single `run_file`, or a
/// whole REPL session) and drives one source string through the four pipeline stages.
pub struct Lox {
    interpreter: Interpreter,
}

impl Lox {
    pub fn new(output: Box<dyn Write>) -> Self {
        Lox { interpreter: Interpreter::new(output) }
    }

    pub fn run_file(&mut self, path: &Path, diagnostics: &mut Sink) -> io::Result<()> {
        let source = fs::read_to_string(path)?;
        self.run(&source, diagnostics);
        Ok(())
    }

    /// Runs a REPL, persisting line history to `~/.lox_history` when a home directory
    /// can be found. A mistake on one line resets the sink's error flags before the next
    /// prompt, so one bad line doesn't poison the whole session's exit code.
    pub fn run_prompt(&mut self, diagnostics: &mut Sink) -> rustyline::Result<()> {
        let mut editor = rustyline::DefaultEditor::new()?;
        let history_path = home::home_dir().map(|home| home.join(".lox_history"));

        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run(&line, diagnostics);
                    diagnostics.reset();
                }
                Err(rustyline::error::ReadlineError::Interrupted | rustyline::error::ReadlineError::Eof) => break,
                Err(error) => return Err(error),
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }

        Ok(())
    }

    pub fn run(&mut self, source: &str, diagnostics: &mut Sink) {
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        diagnostics.report_all(&scan_errors);
        if diagnostics.had_error() {
            return;
        }

        let (statements, parse_errors) = Parser::new(tokens).parse();
        diagnostics.report_all(&parse_errors);
        if diagnostics.had_error() {
            return;
        }

        let (resolve_errors, warnings) = Resolver::new(&mut self.interpreter).resolve(&statements);
        diagnostics.report_all(&resolve_errors);
        diagnostics.report_all(&warnings);
        if diagnostics.had_error() {
            return;
        }

        debug!("executing {} top-level statement(s)", statements.len());
        if let Err(error) = self.interpreter.interpret(&statements) {
            diagnostics.report(&error);
        }
    }
}
