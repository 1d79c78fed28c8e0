//! Summary of a raw LLVM MIR coverage dump.
//!
//! A dump is the MIR printed by `rustc -C instrument-coverage -Z dump-mir`, which contains statements such as
//!
//! ```text
//! coverage Code(Counter(0)) => src/main.rs:1:1 - 3:2;
//! coverage ExpressionId(1) => src/main.rs:2:8 - 2:14;
//! coverage Code(Expression(2)) => src/main.rs:4:5 - 4:11;
//! ```
//!
//! The summary is computed purely by pattern matching; no attempt is made to understand the MIR.

use error::Result;
use utils::read_to_string;

use regex::Regex;
#[cfg(feature = "serde")]
use serde::Serialize;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

lazy_static! {
    static ref COUNTER_FILE: Regex = Regex::new(r"coverage Code\(Counter\(\d+\)\) => ([^:]+)").expect("counter file regex");
    static ref POSITION: Regex = Regex::new(r"\d+:\d+").expect("position regex");
    static ref EXPRESSION_ID: Regex = Regex::new(r"coverage ExpressionId\(\d+\)").expect("expression id regex");
    static ref CODE_EXPRESSION: Regex = Regex::new(r"coverage Code\(Expression\(\d+\)\)").expect("code expression regex");
    static ref CODE_COUNTER: Regex = Regex::new(r"coverage Code\(Counter\(\d+\)\)").expect("code counter regex");
}

/// Counts extracted from a coverage dump.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DumpSummary {
    /// Number of distinct source files referenced by `Code(Counter(n))` statements.
    pub functions: usize,

    /// The first `line:column` token of the dump.
    pub first_position: Option<String>,

    /// The last `line:column` token of the dump.
    pub last_position: Option<String>,

    /// Number of `ExpressionId(n)` plus `Code(Expression(n))` statements.
    pub branches: usize,

    /// Number of `Code(Counter(n))` statements.
    pub statements: usize,
}

impl DumpSummary {
    /// Scans the content of a dump.
    pub fn scan(content: &str) -> DumpSummary {
        let files = COUNTER_FILE
            .captures_iter(content)
            .map(|c| c.get(1).expect("group 1").as_str())
            .collect::<HashSet<_>>();
        trace!("counter files: {:?}", files);

        let mut positions = POSITION.find_iter(content).map(|m| m.as_str());
        let first_position = positions.next();
        let last_position = positions.last().or(first_position);

        DumpSummary {
            functions: files.len(),
            first_position: first_position.map(str::to_owned),
            last_position: last_position.map(str::to_owned),
            branches: EXPRESSION_ID.find_iter(content).count() + CODE_EXPRESSION.find_iter(content).count(),
            statements: CODE_COUNTER.find_iter(content).count(),
        }
    }

    /// Reads and scans a dump file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<DumpSummary> {
        let content = read_to_string(path.as_ref())?;
        Ok(DumpSummary::scan(&content))
    }
}

/// The human-readable report. The position range line is left out when the dump has no `line:column` token.
impl fmt::Display for DumpSummary {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        writeln!(fmt, "Analysis Summary:")?;
        writeln!(fmt, "- Number of Funcs: {}", self.functions)?;
        if let (Some(first), Some(last)) = (self.first_position.as_ref(), self.last_position.as_ref()) {
            writeln!(fmt, "    * 0: {}-{}", first, last)?;
        }
        writeln!(fmt, "- Number of Branches: {}", self.branches)?;
        writeln!(fmt, "- Number of Statements: {}", self.statements)
    }
}
