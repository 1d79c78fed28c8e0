//! `astcov` annotates AST coverage reports with the lines an external coverage tool reported as executed, summarizes
//! LLVM MIR coverage dumps, and produces AST reports from Rust source files.
//!
//! ```sh
//! astcov extract src/sort.rs -o ast_result.txt
//! astcov annotate --covered llvm_result.txt --ast ast_result.txt -o result.txt
//! astcov summarize --dump main.txt
//! ```

#![recursion_limit = "128"] // needed for error_chain.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate astcov;
extern crate env_logger;
extern crate serde_json;
#[cfg(test)]
extern crate tempfile;
extern crate termcolor;

#[macro_use]
mod ui;
mod argparse;
mod error;
mod annotate;
mod summarize;
mod extract;
mod utils;

use argparse::*;
use error::Result;

use std::process::exit;

/// Program entry. Calls [`run()`] and prints any error returned to `stderr`.
///
/// [`run()`]: ./fn.run.html
fn main() {
    if let Err(error) = run() {
        ui::print_error(&error).expect("error while printing error 🤷");
        exit(1);
    }
}

/// Runs the `astcov` program.
fn run() -> Result<()> {
    let matches = app().get_matches();
    env_logger::init();

    // Please do not pass ArgMatches as a whole to the pipelines.
    match matches.subcommand() {
        ("annotate", Some(matches)) => {
            let config = AnnotateConfig::parse(matches);
            debug!("{:?}", config);
            let coverage = annotate::run(&config)?;
            annotate::print_coverage(&coverage, config.format)?;
        },
        ("summarize", Some(matches)) => {
            let config = SummarizeConfig::parse(matches);
            debug!("{:?}", config);
            let summary = summarize::run(&config)?;
            summarize::print_summary(&summary, config.format)?;
        },
        ("extract", Some(matches)) => {
            let config = ExtractConfig::parse(matches);
            debug!("{:?}", config);
            extract::run(&config)?;
        },
        (subcommand, _) => unreachable!("clap accepted unknown subcommand `{}`", subcommand),
    }

    Ok(())
}
