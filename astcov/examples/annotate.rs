#[macro_use]
extern crate error_chain;
extern crate astcov;
extern crate env_logger;

use astcov::{AstReport, CoveredLines, Result};

use std::env;
use std::io::stdout;

quick_main!(run);

/// Usage: `annotate <covered-lines> <ast-report>`. Prints the annotated report.
fn run() -> Result<()> {
    env_logger::init();

    let mut args = env::args_os().skip(1);
    let covered_path = args.next().unwrap_or_else(|| "llvm_result.txt".into());
    let report_path = args.next().unwrap_or_else(|| "ast_result.txt".into());

    let covered = CoveredLines::open(covered_path)?;
    let report = AstReport::open(report_path)?;
    report.annotate(&covered).write_to(stdout())
}
