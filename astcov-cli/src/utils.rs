//! Additional methods for libstd.

use std::ffi::OsStr;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write, stdout};
use std::path::PathBuf;

/// Destination of a generated report.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// Creates (or truncates) the destination for writing.
    pub fn create(&self) -> io::Result<Box<dyn Write>> {
        let writer: Box<dyn Write> = match *self {
            Output::Stdout => Box::new(stdout()),
            Output::File(ref path) => Box::new(BufWriter::new(File::create(path)?)),
        };
        Ok(writer)
    }
}

/// `-` means standard output; anything else is a file path.
impl<'a> From<&'a OsStr> for Output {
    fn from(s: &'a OsStr) -> Output {
        if s == "-" {
            Output::Stdout
        } else {
            Output::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Output::Stdout => fmt.write_str("<stdout>"),
            Output::File(ref path) => write!(fmt, "{}", path.display()),
        }
    }
}

#[test]
fn test_output_from_os_str() {
    assert_eq!(Output::from(OsStr::new("-")), Output::Stdout);
    assert_eq!(Output::from(OsStr::new("result.txt")), Output::File(PathBuf::from("result.txt")));
    assert_eq!(Output::File(PathBuf::from("a/b.txt")).to_string(), "a/b.txt");
}
