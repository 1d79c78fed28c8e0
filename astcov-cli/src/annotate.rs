//! Entry point of `astcov annotate`.

use argparse::{AnnotateConfig, Format};
use error::{Result, ResultExt};
use ui::print_coverage as print_colored_coverage;

use astcov::{AstReport, Coverage, CoveredLines};
use serde_json::to_string_pretty;

/// Reads the covered lines and the AST report, and writes the annotated report to the configured output.
///
/// Returns the coverage of every category found in the report.
pub fn run(config: &AnnotateConfig) -> Result<Coverage> {
    progress!("Reading", "{}", config.covered_path.display());
    let covered = CoveredLines::open(&config.covered_path)?;
    if covered.is_empty() {
        warning!("`{}` lists no covered line, every item will be uncovered", config.covered_path.display());
    }
    trace!("{} covered lines", covered.len());

    progress!("Reading", "{}", config.ast_path.display());
    let report = AstReport::open(&config.ast_path)?;

    let annotation = report.annotate(&covered);
    if annotation.coverage().is_empty() {
        warning!("`{}` has no section header, nothing is counted", config.ast_path.display());
    }

    progress!("Writing", "{}", config.output);
    let writer = config.output.create().chain_err(|| format!("Cannot create `{}`", config.output))?;
    annotation.write_to(writer).chain_err(|| format!("Cannot write annotated report to `{}`", config.output))?;

    let (_, coverage) = annotation.into_parts();
    Ok(coverage)
}

/// Prints the coverage per category, to `stderr` as colored text or to `stdout` as JSON.
pub fn print_coverage(coverage: &Coverage, format: Format) -> Result<()> {
    match format {
        Format::Text => print_colored_coverage(coverage)?,
        Format::Json => println!("{}", to_string_pretty(coverage)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use utils::Output;

    use astcov::Category;
    use tempfile::tempdir;

    use std::fs::{File, read_to_string};
    use std::io::Write;

    #[test]
    fn test_annotate_files() {
        let dir = tempdir().unwrap();
        let covered_path = dir.path().join("llvm_result.txt");
        let ast_path = dir.path().join("ast_result.txt");
        let output_path = dir.path().join("result.txt");
        File::create(&covered_path).unwrap().write_all(b"5\n10\n20\n").unwrap();
        File::create(&ast_path).unwrap().write_all(b"- func: 2\n- 1: foo: 4:1-6:2\n* 2: bar: 15:1-18:3\n").unwrap();

        let coverage = run(&AnnotateConfig {
            covered_path,
            ast_path,
            output: Output::File(output_path.clone()),
            format: Format::Text,
        }).unwrap();

        assert_eq!(read_to_string(&output_path).unwrap(), "- func: 1/2 (50.00%)\n* 1: foo: 4:1-6:2\n- 2: bar: 15:1-18:3\n");
        assert_eq!(coverage.get(Category::Function).to_string(), "1/2 (50.00%)");
    }

    #[test]
    fn test_missing_covered_lines() {
        let dir = tempdir().unwrap();
        let err = run(&AnnotateConfig {
            covered_path: dir.path().join("missing.txt"),
            ast_path: dir.path().join("ast_result.txt"),
            output: Output::File(dir.path().join("result.txt")),
            format: Format::Text,
        }).unwrap_err();
        match *err.kind() {
            ::error::ErrorKind::Astcov(::astcov::ErrorKind::NotFound(ref path)) => assert!(path.ends_with("missing.txt")),
            ref kind => panic!("unexpected error {:?}", kind),
        }
        assert!(!dir.path().join("result.txt").exists());
    }

    #[test]
    fn test_malformed_covered_lines() {
        let dir = tempdir().unwrap();
        let covered_path = dir.path().join("llvm_result.txt");
        File::create(&covered_path).unwrap().write_all(b"5\nfive\n").unwrap();
        let err = run(&AnnotateConfig {
            covered_path,
            ast_path: dir.path().join("ast_result.txt"),
            output: Output::File(dir.path().join("result.txt")),
            format: Format::Text,
        }).unwrap_err();
        assert!(err.iter().any(|e| e.to_string() == "malformed line 2: \"five\""));
    }
}
