//! The set of line numbers an external coverage tool reported as executed.

use error::*;
use utils::{lines_with_terminators, parse_digits, read_to_string};

use std::collections::BTreeSet;
use std::io::Read;
use std::iter::FromIterator;
use std::path::Path;
use std::str::FromStr;

/// Covered source lines.
///
/// The textual form is one base-10 line number per line. Blank lines are ignored.
///
/// # Examples
///
/// ```rust
/// use astcov::CoveredLines;
///
/// let covered = "5\n10\n20\n".parse::<CoveredLines>().unwrap();
/// assert!(covered.any_in_range(4, 6));
/// assert!(!covered.any_in_range(15, 18));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CoveredLines {
    lines: BTreeSet<u32>,
}

impl CoveredLines {
    /// Creates an empty set.
    pub fn new() -> CoveredLines {
        CoveredLines::default()
    }

    /// Reads the covered lines from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<CoveredLines> {
        let path = path.as_ref();
        let content = read_to_string(path)?;
        content.parse().chain_err(|| format!("cannot read covered lines from `{}`", path.display()))
    }

    /// Reads the covered lines from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<CoveredLines> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        content.parse()
    }

    /// Checks whether the line is covered.
    pub fn contains(&self, line: u32) -> bool {
        self.lines.contains(&line)
    }

    /// Checks whether any line in `start ..= end` is covered. An inverted range contains nothing.
    pub fn any_in_range(&self, start: u32, end: u32) -> bool {
        start <= end && self.lines.range(start..=end).next().is_some()
    }

    /// Number of distinct covered lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromStr for CoveredLines {
    type Err = Error;

    fn from_str(s: &str) -> Result<CoveredLines> {
        let mut lines = BTreeSet::new();
        for (i, (line, _)) in lines_with_terminators(s).enumerate() {
            if let Some(number) = parse_line(line, i + 1)? {
                lines.insert(number);
            }
        }
        Ok(CoveredLines { lines })
    }
}

impl FromIterator<u32> for CoveredLines {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> CoveredLines {
        CoveredLines {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Parses one line of the covered-lines list. Returns `None` for a blank line.
fn parse_line(line: &str, line_number: usize) -> Result<Option<u32>> {
    let line = line.trim();
    if line.is_empty() {
        Ok(None)
    } else if line.bytes().all(|b| b.is_ascii_digit()) {
        parse_digits(line, line_number).map(Some)
    } else {
        bail!(ErrorKind::MalformedLine(line_number, line.to_owned()))
    }
}

#[test]
fn test_parse_covered_lines() {
    let covered = "5\n 10 \n\n20\r\n".parse::<CoveredLines>().unwrap();
    assert_eq!(covered, vec![5, 10, 20].into_iter().collect());
    assert_eq!(covered.len(), 3);
    assert!(covered.contains(10));
    assert!(!covered.contains(11));
}

#[test]
fn test_empty_covered_lines() {
    let covered = "".parse::<CoveredLines>().unwrap();
    assert!(covered.is_empty());
    assert!(!covered.any_in_range(0, u32::max_value()));
}

#[test]
fn test_any_in_range_is_inclusive() {
    let covered = vec![5, 10, 20].into_iter().collect::<CoveredLines>();
    assert!(covered.any_in_range(5, 5));
    assert!(covered.any_in_range(1, 5));
    assert!(covered.any_in_range(20, 30));
    assert!(!covered.any_in_range(6, 9));
    assert!(!covered.any_in_range(6, 5));
}

#[test]
fn test_malformed_covered_line() {
    let err = "5\nten\n".parse::<CoveredLines>().unwrap_err();
    match *err.kind() {
        ErrorKind::MalformedLine(2, ref text) => assert_eq!(text, "ten"),
        ref kind => panic!("unexpected error {:?}", kind),
    }
}

#[test]
fn test_overflowing_covered_line() {
    let err = "5\n12345678901234567890\n".parse::<CoveredLines>().unwrap_err();
    match *err.kind() {
        ErrorKind::InvalidInteger(2, _) => {},
        ref kind => panic!("unexpected error {:?}", kind),
    }
}

#[test]
fn test_from_reader() {
    let covered = CoveredLines::from_reader(&b"3\n1\n3\n"[..]).unwrap();
    assert_eq!(covered, vec![1, 3].into_iter().collect());

    let err = CoveredLines::from_reader(&b"3\n\n1x\n"[..]).unwrap_err();
    match *err.kind() {
        ErrorKind::MalformedLine(3, ref text) => assert_eq!(text, "1x"),
        ref kind => panic!("unexpected error {:?}", kind),
    }
}
