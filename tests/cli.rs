use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

struct ScriptFile {
    path: PathBuf,
    file: std::fs::File,
}

impl ScriptFile {
    fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for ScriptFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl Drop for ScriptFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn script(source: &str) -> ScriptFile {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let id = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!("loxtree-cli-test-{}-{id}.lox", std::process::id()));
    let file = std::fs::File::create(&path).unwrap();
    let mut script = ScriptFile { path, file };
    write!(script, "{source}").unwrap();
    script
}

#[test]
fn runs_a_script_file_and_exits_cleanly() {
    let script = script("print 1 + 1;");

    Command::cargo_bin("loxtree")
        .unwrap()
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}

#[test]
fn a_static_error_exits_with_65() {
    let script = script("var a = ;");

    Command::cargo_bin("loxtree").unwrap().arg(script.path()).assert().code(65);
}

#[test]
fn a_runtime_error_exits_with_70() {
    let script = script("print 1 + nil;");

    Command::cargo_bin("loxtree").unwrap().arg(script.path()).assert().code(70);
}

#[test]
fn a_missing_script_exits_with_64() {
    Command::cargo_bin("loxtree").unwrap().arg("/no/such/file.lox").assert().code(64);
}

#[test]
fn more_than_one_positional_argument_exits_with_64() {
    let first = script("print 1;");
    let second = script("print 2;");

    Command::cargo_bin("loxtree")
        .unwrap()
        .arg(first.path())
        .arg(second.path())
        .assert()
        .code(64);
}

#[test]
fn help_flag_is_handled_by_clap() {
    Command::cargo_bin("loxtree")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Script to execute"));
}
