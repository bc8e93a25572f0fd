use std::{fs, io, path::PathBuf};

use clap::Parser;
use snakelet::run_program;

/// snakelet is a small, indentation-structured scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a script; the program is read from standard input when
    /// omitted.
    script: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let source = match args.script {
        Some(path) => fs::read_to_string(&path).unwrap_or_else(|_| {
                          eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                    path.display());
                          std::process::exit(1);
                      }),
        None => io::read_to_string(io::stdin()).unwrap_or_else(|error| {
                    eprintln!("Failed to read the program from standard input: {error}");
                    std::process::exit(1);
                }),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(error) = run_program(&source, &mut out) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
