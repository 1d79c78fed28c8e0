//! Additional methods for libstd.

use error::{ErrorKind, Result, open_file};

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Reads the whole file into a string.
pub fn read_to_string(path: &Path) -> Result<String> {
    let mut content = String::new();
    open_file(path)?.read_to_string(&mut content)?;
    Ok(content)
}

/// Splits a text into lines, keeping the terminator of every line separately.
///
/// Unlike `str::lines()`, the terminator (`"\n"`, `"\r\n"` or `""` for an unterminated last line) is returned so the
/// text can be written back byte-for-byte.
pub fn lines_with_terminators(text: &str) -> LinesWithTerminators {
    LinesWithTerminators { rest: text }
}

/// Iterator returned by [`lines_with_terminators()`].
///
/// [`lines_with_terminators()`]: ./fn.lines_with_terminators.html
pub struct LinesWithTerminators<'a> {
    rest: &'a str,
}

impl<'a> Iterator for LinesWithTerminators<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<(&'a str, &'a str)> {
        if self.rest.is_empty() {
            return None;
        }
        let (line, rest) = match self.rest.find('\n') {
            Some(i) => self.rest.split_at(i + 1),
            None => (self.rest, ""),
        };
        self.rest = rest;
        let body_len = if line.ends_with("\r\n") {
            line.len() - 2
        } else if line.ends_with('\n') {
            line.len() - 1
        } else {
            line.len()
        };
        Some(line.split_at(body_len))
    }
}

/// Parses a token already known to consist of ASCII digits.
///
/// The only possible failure is overflow, reported as [`InvalidInteger`] on the 1-based `line_number`.
///
/// [`InvalidInteger`]: ../error/enum.ErrorKind.html#variant.InvalidInteger
pub fn parse_digits<T: FromStr>(digits: &str, line_number: usize) -> Result<T> {
    digits.parse().map_err(|_| ErrorKind::InvalidInteger(line_number, digits.to_owned()).into())
}

#[test]
fn test_lines_with_terminators() {
    let lines = lines_with_terminators("a\nb\r\n\nc").collect::<Vec<_>>();
    assert_eq!(lines, vec![("a", "\n"), ("b", "\r\n"), ("", "\n"), ("c", "")]);
    assert_eq!(lines_with_terminators("").count(), 0);
}

#[test]
fn test_parse_digits_overflow() {
    assert_eq!(parse_digits::<u32>("42", 1).unwrap(), 42);
    match *parse_digits::<u32>("99999999999", 7).unwrap_err().kind() {
        ErrorKind::InvalidInteger(7, ref text) => assert_eq!(text, "99999999999"),
        ref kind => panic!("unexpected error {:?}", kind),
    }
}
