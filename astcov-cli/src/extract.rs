//! Entry point of `astcov extract`.

use argparse::ExtractConfig;
use error::{Result, ResultExt};

use astcov::extract::extract;

use std::io::Write;

/// Parses the Rust source file and writes its AST report, every item marked uncovered.
pub fn run(config: &ExtractConfig) -> Result<()> {
    progress!("Parsing", "{}", config.source_path.display());
    let report = extract(&config.source_path)?;

    progress!("Writing", "{}", config.output);
    (|| -> ::std::io::Result<()> {
        let mut writer = config.output.create()?;
        write!(writer, "{}", report)?;
        writer.flush()
    })().chain_err(|| format!("Cannot write AST report to `{}`", config.output))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use utils::Output;

    use tempfile::tempdir;

    use std::fs::{File, read_to_string};

    #[test]
    fn test_extract_file() {
        let dir = tempdir().unwrap();
        let source_path = dir.path().join("lib.rs");
        let output_path = dir.path().join("ast_result.txt");
        File::create(&source_path).unwrap().write_all(b"fn f() {\n    loop {}\n}\n").unwrap();

        run(&ExtractConfig { source_path, output: Output::File(output_path.clone()) }).unwrap();
        assert_eq!(read_to_string(&output_path).unwrap(), "\
AST:
- func: 1
  - 1: f: 1:0-3:1
- stmt: 1
  - 1: 2:4-2:11
- branch: 0

For detail check:
- loop: 1
  - 1: 2:4-2:11
- macro: 0
- switch: 0
- binary conditional: 0
- if stmt: 0
");
    }

    #[test]
    fn test_extract_syntax_error() {
        let dir = tempdir().unwrap();
        let source_path = dir.path().join("broken.rs");
        let output_path = dir.path().join("ast_result.txt");
        File::create(&source_path).unwrap().write_all(b"fn broken( {").unwrap();

        assert!(run(&ExtractConfig { source_path, output: Output::File(output_path.clone()) }).is_err());
        assert!(!output_path.exists());
    }
}
