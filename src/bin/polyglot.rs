//! polyglot CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use polyglot_search::cli::args::*;
use polyglot_search::cli::commands::*;

fn main() {
    let args = PolyglotArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        let code = if e.is_input_error() {
            2
        } else if e.is_retryable() {
            3
        } else {
            1
        };
        process::exit(code);
    }
}
