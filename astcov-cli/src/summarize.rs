//! Entry point of `astcov summarize`.

use argparse::{Format, SummarizeConfig};
use error::Result;

use astcov::DumpSummary;
use serde_json::to_string_pretty;

/// Scans the MIR dump named by the configuration.
pub fn run(config: &SummarizeConfig) -> Result<DumpSummary> {
    progress!("Scanning", "{}", config.dump_path.display());
    let summary = DumpSummary::open(&config.dump_path)?;
    if summary.statements == 0 && summary.branches == 0 {
        warning!("`{}` contains no coverage statement", config.dump_path.display());
    }
    Ok(summary)
}

/// Prints the summary to `stdout`.
pub fn print_summary(summary: &DumpSummary, format: Format) -> Result<()> {
    match format {
        Format::Text => print!("{}", summary),
        Format::Json => println!("{}", to_string_pretty(summary)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_summarize_file() {
        let dir = tempdir().unwrap();
        let dump_path = dir.path().join("main.txt");
        File::create(&dump_path).unwrap().write_all(b"\
            coverage Code(Counter(0)) => src/main.rs:1:1 - 3:2;\n\
            coverage ExpressionId(0) => src/main.rs:2:8 - 2:14;\n\
        ").unwrap();

        let summary = run(&SummarizeConfig { dump_path, format: Format::Json }).unwrap();
        assert_eq!(summary.functions, 1);
        assert_eq!(summary.branches, 1);
        assert_eq!(summary.statements, 1);
        assert_eq!(summary.first_position.as_ref().map(|s| &**s), Some("1:1"));
        assert_eq!(summary.last_position.as_ref().map(|s| &**s), Some("2:14"));
    }

    #[test]
    fn test_missing_dump() {
        let dir = tempdir().unwrap();
        let err = run(&SummarizeConfig { dump_path: dir.path().join("main.txt"), format: Format::Text }).unwrap_err();
        assert!(err.to_string().starts_with("file not found: "));
    }
}
