use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use log::LevelFilter;

use lox_tree::error::Sink;
use lox_tree::Lox;

/// A tree-walking interpreter for a small Lox-family scripting language.
#[derive(ClapParser, Debug)]
#[command(version, about)]
struct Args {
    /// Script to execute. Omit to start a REPL.
    script: Option<PathBuf>,

    /// Raise logging verbosity (-v debug, -vv trace). Independent of RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            // `--help`/`--version` surface as an "error" too, but exit_code() is 0 for
            // those; only a genuine usage error (e.g. two positional scripts) gets 64.
            if error.exit_code() == 0 {
                print!("{error}");
                return ExitCode::SUCCESS;
            }
            eprint!("{error}");
            return ExitCode::from(64);
        }
    };

    let mut builder = env_logger::Builder::from_default_env();
    let verbosity = match args.verbose {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = verbosity {
        builder.filter_level(level);
    }
    builder.init();

    let mut lox = Lox::new(Box::new(std::io::stdout()));
    let mut diagnostics = Sink::stderr();

    match args.script {
        Some(path) => {
            if let Err(error) = lox.run_file(&path, &mut diagnostics) {
                eprintln!("Couldn't read '{}': {error}", path.display());
                return ExitCode::from(64);
            }
        }
        None => {
            if let Err(error) = lox.run_prompt(&mut diagnostics) {
                eprintln!("{error}");
                return ExitCode::from(70);
            }
        }
    }

    if diagnostics.had_runtime_error() {
        ExitCode::from(70)
    } else if diagnostics.had_error() {
        ExitCode::from(65)
    } else {
        ExitCode::SUCCESS
    }
}
