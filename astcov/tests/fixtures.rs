extern crate astcov;
extern crate diff;
extern crate termcolor;

use astcov::*;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use std::ffi::OsStr;
use std::fs::{File, read_dir};
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::exit;

fn main() {
    run().expect("IO");
}

fn run() -> io::Result<()> {
    let mut failed_tests = 0;

    let stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut lock = stdout.lock();

    let mut entries = read_dir("test-data")?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let result = match path.extension().and_then(OsStr::to_str) {
            Some("annotate") => test_annotate(&path),
            Some("summary") => test_summary(&path),
            #[cfg(feature = "extract")]
            Some("extract") => test_extract(&path),
            _ => continue,
        };
        write!(lock, "test {} ... ", path.display())?;
        lock.flush()?;
        if !print_test_result(&mut lock, result.and_then(|actual| Ok((actual, read_expected(&path)?))))? {
            failed_tests += 1;
        }
    }

    if failed_tests != 0 {
        writeln!(lock, "\ntest result: {} failed.\n", failed_tests)?;
        exit(101);
    } else {
        writeln!(lock, "\ntest result: ok.\n")?;
    }

    Ok(())
}

fn test_annotate(path: &Path) -> Result<String> {
    let covered = CoveredLines::open(path.join("covered.txt"))?;
    let report = AstReport::open(path.join("ast.txt"))?;
    let mut output = Vec::new();
    report.annotate(&covered).write_to(&mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}

fn test_summary(path: &Path) -> Result<String> {
    Ok(DumpSummary::open(path.join("dump.txt"))?.to_string())
}

#[cfg(feature = "extract")]
fn test_extract(path: &Path) -> Result<String> {
    Ok(astcov::extract::extract(path.join("source.rs"))?.to_string())
}

fn read_expected(path: &Path) -> Result<String> {
    let mut expected = String::new();
    File::open(path.join("expected.txt"))?.read_to_string(&mut expected)?;
    Ok(expected)
}

fn print_test_result<W: Write + WriteColor>(mut lock: W, result: Result<(String, String)>) -> io::Result<bool> {
    Ok(match result {
        Ok((actual, expected)) => {
            let success = actual == expected;
            if success {
                lock.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                writeln!(lock, "ok")?;
            } else {
                lock.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                writeln!(lock, "FAILED")?;
                for d in diff::lines(&actual, &expected) {
                    let (color, prefix, line) = match d {
                        diff::Result::Left(line) => (Color::Green, '+', line),
                        diff::Result::Both(line, _) => (Color::White, ' ', line),
                        diff::Result::Right(line) => (Color::Red, '-', line),
                    };
                    lock.set_color(ColorSpec::new().set_fg(Some(color)))?;
                    writeln!(lock, "{} {}", prefix, line)?;
                }
                writeln!(lock)?;
            }
            lock.reset()?;
            success
        },
        Err(e) => {
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            writeln!(lock, "ERRORED")?;
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_intense(true).set_bold(true))?;
            write!(lock, "error: ")?;
            lock.reset()?;
            writeln!(lock, "{}\n", e)?;
            false
        },
    })
}
