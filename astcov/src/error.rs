//! Errors related to the `astcov` crate.
//!
//! Please see documentation of the [`error-chain` crate](https://docs.rs/error-chain/0.12.0/error_chain/) for detailed
//! usage.

use std::io;
use std::path::{Path, PathBuf};

error_chain! {
    foreign_links {
        Io(io::Error) /** Wrapper of standard I/O error. */;
        Json(::serde_json::Error) #[cfg(feature="serde_json")] /** Wrapper of JSON error. */;
        Syntax(::syn::Error) #[cfg(feature="extract")] /** Rust source code which `syn` cannot parse. */;
    }

    errors {
        /// The input file does not exist.
        NotFound(path: PathBuf) {
            description("file not found")
            display("file not found: `{}`", path.display())
        }

        /// A numeric token on the given line (1-based) does not fit into the integer type.
        InvalidInteger(line: usize, text: String) {
            description("invalid integer")
            display("invalid integer on line {}: {:?}", line, text)
        }

        /// A line that must follow a known format does not. The covered-line list is the only place where this is
        /// fatal; unknown lines in an AST report are passed through.
        MalformedLine(line: usize, text: String) {
            description("malformed line")
            display("malformed line {}: {:?}", line, text)
        }
    }
}

/// Opens a file for reading, turning a missing file into [`NotFound`].
///
/// [`NotFound`]: ./enum.ErrorKind.html#variant.NotFound
pub fn open_file(path: &Path) -> Result<::std::fs::File> {
    debug!("open {:?}", path);
    ::std::fs::File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ErrorKind::NotFound(path.to_owned()).into()
        } else {
            e.into()
        }
    })
}

#[test]
fn test_open_missing_file() {
    let err = open_file(Path::new("test-data/does-not-exist.txt")).unwrap_err();
    match *err.kind() {
        ErrorKind::NotFound(ref path) => assert_eq!(path, Path::new("test-data/does-not-exist.txt")),
        ref kind => panic!("unexpected error {:?}", kind),
    }
}
