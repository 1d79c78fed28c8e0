//! Print colored text.
//!
//! Provides functions and macros that simulate the `cargo` output style. Everything here goes to `stderr`, so the
//! annotated report or the summary can be piped from `stdout`.

use astcov::Coverage;
use error::Error;

use termcolor::*;

use std::io::{Result, Write};

/// Prints a progress (green text), similar to the cargo output.
macro_rules! progress {
    ($tag:expr, $fmt:expr $(, $args:expr)*) => {{
        (|| -> ::std::io::Result<()> {
            use ::termcolor::*;
            use ::std::io::Write;
            let stream = StandardStream::stderr(ColorChoice::Auto);
            let mut lock = stream.lock();
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(lock, "{:>12} ", $tag)?;
            lock.reset()?;
            writeln!(lock, $fmt $(, $args)*)?;
            Ok(())
        })().expect("print progress")
    }}
}

/// Prints a warning (yellow text), similar to cargo output.
macro_rules! warning {
    ($fmt:expr $(, $args:expr)*) => {{
        (|| -> ::std::io::Result<()> {
            use ::termcolor::*;
            use ::std::io::Write;
            let stream = StandardStream::stderr(ColorChoice::Auto);
            let mut lock = stream.lock();
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
            write!(lock, "warning: ")?;
            lock.reset()?;
            writeln!(lock, $fmt $(, $args)*)?;
            Ok(())
        })().expect("print warning")
    }}
}

/// Prints an error and the causes.
pub fn print_error(error: &Error) -> Result<()> {
    let stream = StandardStream::stderr(ColorChoice::Auto);
    let mut lock = stream.lock();

    for (i, e) in error.iter().enumerate() {
        if i == 0 {
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_intense(true).set_bold(true))?;
            write!(lock, "error: ")?;
        } else {
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(lock, "caused by: ")?;
        }
        lock.reset()?;
        writeln!(lock, "{}", e)?;
    }
    if let Some(backtrace) = error.backtrace() {
        writeln!(lock, "\n{:?}", backtrace)?;
    }
    Ok(())
}

/// Prints the coverage of every category. The percentage is green from 80%, yellow from 50%, red below.
pub fn print_coverage(coverage: &Coverage) -> Result<()> {
    let stream = StandardStream::stderr(ColorChoice::Auto);
    let mut lock = stream.lock();

    for (category, c) in coverage.iter() {
        let color = match c.percentage() {
            p if p >= 80.0 => Color::Green,
            p if p >= 50.0 => Color::Yellow,
            _ => Color::Red,
        };
        lock.set_color(ColorSpec::new().set_bold(true))?;
        write!(lock, "{:>12} ", category)?;
        lock.set_color(ColorSpec::new().set_fg(Some(color)))?;
        writeln!(lock, "{}", c)?;
        lock.reset()?;
    }
    Ok(())
}
