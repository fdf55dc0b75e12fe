use std::fmt;
use std::io::Write;

use thiserror::Error;

use crate::token::{Location, Token, Type};

/// How a diagnostic affects the run: whether it aborts the current phase, poisons the
/// whole run at a later stage (runtime errors abort execution outright), or is purely
/// informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    RuntimeError,
    Warning,
}

/// Anything that can be rendered to the diagnostic stream and that carries a severity.
///
/// Every phase (scanner, parser, resolver, interpreter) collects its own concrete error
/// type rather than reporting through a shared mutable sink; the driver renders each
/// batch through a [`Sink`] once the phase has finished.
pub trait Diagnostic: std::error::Error {
    fn severity(&self) -> Severity;
    fn render(&self) -> String;
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ScanError {
    pub location: Location,
    pub message: String,
}

impl Diagnostic for ScanError {
    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn render(&self) -> String {
        format!("[line {}] Error: {}", self.location, self.message)
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Diagnostic for ParseError {
    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn render(&self) -> String {
        render_at(&self.token, &self.message)
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Diagnostic for ResolveError {
    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn render(&self) -> String {
        render_at(&self.token, &self.message)
    }
}

/// A non-fatal resolver diagnostic (currently: unused local variables). Never poisons
/// the run; `Sink::report` does not set either error flag for it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct Warning {
    pub token: Token,
    pub message: String,
}

impl Diagnostic for Warning {
    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn render(&self) -> String {
        format!("[line {}] Warning: {}", self.token.location, self.message)
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Diagnostic for RuntimeError {
    fn severity(&self) -> Severity {
        Severity::RuntimeError
    }

    fn render(&self) -> String {
        format!("{}\n[line {}]", self.message, self.token.location)
    }
}

fn render_at(token: &Token, message: &str) -> String {
    if token.r#type == Type::EOF {
        format!("[line {}] Error at end: {}", token.location, message)
    } else {
        format!(
            "[line {}] Error at '{}': {}",
            token.location, token.lexeme, message
        )
    }
}

/// Non-local control flow inside statement execution.
///
/// Expressions only ever fail with a [`RuntimeError`]; `break` and `return` can only
/// originate from statements, and `return` is caught by the nearest enclosing function
/// call, so neither ever needs to escape `Interpreter::interpret`.
#[derive(Debug)]
pub enum Unwind {
    Error(RuntimeError),
    Break,
    Return(crate::object::Object),
}

impl From<RuntimeError> for Unwind {
    fn from(err: RuntimeError) -> Self {
        Unwind::Error(err)
    }
}

/// Renders diagnostics to a writer and tracks whether a fatal one was seen, so the
/// driver can pick the right process exit code once a phase finishes.
pub struct Sink {
    out: Box<dyn Write>,
    had_error: bool,
    had_runtime_error: bool,
}

impl Sink {
    pub fn new(out: Box<dyn Write>) -> Self {
        Sink {
            out,
            had_error: false,
            had_runtime_error: false,
        }
    }

    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    pub fn report(&mut self, diagnostic: &dyn Diagnostic) {
        let _ = writeln!(self.out, "{}", diagnostic.render());
        match diagnostic.severity() {
            Severity::Error => self.had_error = true,
            Severity::RuntimeError => self.had_runtime_error = true,
            Severity::Warning => {}
        }
    }

    pub fn report_all<'a, D: Diagnostic + 'a>(
        &mut self,
        diagnostics: impl IntoIterator<Item = &'a D>,
    ) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn did_error(&self) -> bool {
        self.had_error || self.had_runtime_error
    }

    /// Clears the sticky flags between REPL entries; a mistake on one line shouldn't
    /// poison the exit code of a session that recovers on the next.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("had_error", &self.had_error)
            .field("had_runtime_error", &self.had_runtime_error)
            .finish()
    }
}
