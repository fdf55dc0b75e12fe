use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use lox_tree::error::Sink;
use lox_tree::Lox;

/// An in-memory `Write` sink that can be read back after being moved into a [`Lox`] /
/// [`Sink`], by keeping a second `Rc` handle to the same buffer. Lets tests run source
/// directly instead of depending on fixture files on disk.
#[derive(Clone, Default)]
pub struct Buffer(Rc<RefCell<Vec<u8>>>);

impl Buffer {
    pub fn new() -> Self {
        Buffer::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("test output to be valid utf-8")
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The result of running one source string through the full pipeline: whatever `print`
/// wrote, whatever diagnostics were rendered, and the two sticky error flags.
pub struct Run {
    pub output: String,
    pub diagnostics: String,
    pub had_error: bool,
    pub had_runtime_error: bool,
}

pub fn run(source: &str) -> Run {
    let stdout = Buffer::new();
    let stderr = Buffer::new();

    let mut lox = Lox::new(Box::new(stdout.clone()));
    let mut sink = Sink::new(Box::new(stderr.clone()));

    lox.run(source, &mut sink);

    Run {
        output: stdout.contents(),
        diagnostics: stderr.contents(),
        had_error: sink.had_error(),
        had_runtime_error: sink.had_runtime_error(),
    }
}

/// Runs `source` and asserts it produced no diagnostics, returning just the printed
/// output for the common case of testing a program that's expected to succeed.
pub fn run_ok(source: &str) -> String {
    let result = run(source);
    assert!(
        !result.had_error && !result.had_runtime_error,
        "expected no errors, got diagnostics:\n{}",
        result.diagnostics
    );
    result.output
}
