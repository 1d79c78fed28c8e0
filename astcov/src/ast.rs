//! The AST coverage report.
//!
//! An AST report is a plain-text listing of coverage items grouped by [`Category`]:
//!
//! ```text
//! AST:
//! - func: 2
//!   - 1: main: 1:0-4:1
//!   * 2: helper: 6:0-8:1
//! - stmt: 1
//!   - 1: 2:4-2:20
//! ```
//!
//! Every line is classified into an [`AstLine`]. Section headers (`- func: 2`) open a category, item records
//! (`- 1: main: 1:0-4:1`) belong to the most recently opened category, and everything else is kept as opaque text.
//! Function items carry a name; items of all other categories do not.
//!
//! [`Category`]: ./enum.Category.html
//! [`AstLine`]: ./enum.AstLine.html

use error::*;
use utils::{lines_with_terminators, parse_digits, read_to_string};

use regex::{Captures, Regex};
#[cfg(feature = "serde")]
use serde::Serialize;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

lazy_static! {
    /// `- func: 12`, or the annotated form `- func: 3/12 (25.00%)`.
    static ref HEADER: Regex = Regex::new(r"^(\s*)-\s*(func|stmt|branch|loop|macro):\s*(?:([0-9]+)/)?([0-9]+)").expect("header regex");

    /// `  - 1: main: 1:0-4:1`
    static ref FUNCTION_ITEM: Regex = Regex::new(r"^(\s*)([-*]) ([0-9]+): (.*): ([0-9]+):([0-9]+)-([0-9]+):([0-9]+)(.*)$").expect("function item regex");

    /// `  - 1: 2:4-2:20`
    static ref ITEM: Regex = Regex::new(r"^(\s*)([-*]) ([0-9]+): ([0-9]+):([0-9]+)-([0-9]+):([0-9]+)(.*)$").expect("item regex");
}

//----------------------------------------------------------------------------------------------------------------------
//{{{ Category, Marker & Span

/// The kind of coverage items listed under a section header.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Category {
    #[cfg_attr(feature = "serde", serde(rename = "func"))]
    Function,
    #[cfg_attr(feature = "serde", serde(rename = "stmt"))]
    Statement,
    #[cfg_attr(feature = "serde", serde(rename = "branch"))]
    Branch,
    #[cfg_attr(feature = "serde", serde(rename = "loop"))]
    Loop,
    #[cfg_attr(feature = "serde", serde(rename = "macro"))]
    Macro,
}

impl Category {
    /// All categories, in the order they appear in a report.
    pub const ALL: [Category; 5] = [Category::Function, Category::Statement, Category::Branch, Category::Loop, Category::Macro];

    /// The keyword used in section headers.
    pub fn keyword(self) -> &'static str {
        match self {
            Category::Function => "func",
            Category::Statement => "stmt",
            Category::Branch => "branch",
            Category::Loop => "loop",
            Category::Macro => "macro",
        }
    }

    /// Whether item records of this category carry a name.
    pub fn has_names(self) -> bool {
        self == Category::Function
    }
}

impl fmt::Display for Category {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.pad(self.keyword())
    }
}

/// Error returned when parsing an unknown category keyword.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct UnknownCategory;

impl FromStr for Category {
    type Err = UnknownCategory;
    fn from_str(s: &str) -> ::std::result::Result<Category, UnknownCategory> {
        Ok(match s {
            "func" => Category::Function,
            "stmt" => Category::Statement,
            "branch" => Category::Branch,
            "loop" => Category::Loop,
            "macro" => Category::Macro,
            _ => return Err(UnknownCategory),
        })
    }
}

/// The leading symbol of an item record.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Marker {
    /// `-`
    Uncovered,
    /// `*`
    Covered,
}

impl Marker {
    pub fn symbol(self) -> char {
        match self {
            Marker::Uncovered => '-',
            Marker::Covered => '*',
        }
    }

    fn from_symbol(s: &str) -> Marker {
        if s == "*" {
            Marker::Covered
        } else {
            Marker::Uncovered
        }
    }
}

/// Source region of an item, `start_line:start_column-end_line:end_column`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Span {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl fmt::Display for Span {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}:{}-{}:{}", self.start_line, self.start_column, self.end_line, self.end_column)
    }
}

//}}}
//----------------------------------------------------------------------------------------------------------------------
//{{{ Item & AstLine

/// An item record.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Item {
    /// Whitespace before the marker.
    pub indent: String,
    pub marker: Marker,
    pub index: u32,
    /// Name of the item. Only function items have one.
    pub name: Option<String>,
    pub span: Span,
    /// Any text after the span, kept verbatim.
    pub trailing: String,
}

impl fmt::Display for Item {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}{} {}: ", self.indent, self.marker.symbol(), self.index)?;
        if let Some(ref name) = self.name {
            write!(fmt, "{}: ", name)?;
        }
        write!(fmt, "{}{}", self.span, self.trailing)
    }
}

/// A classified line of an AST report, without its terminator.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AstLine {
    /// A section header.
    ///
    /// `covered` is `None` for a plain header (`- func: 12`). Annotation fills it in, and the header is then rendered
    /// as `- func: 3/12 (25.00%)`, dropping any indentation.
    Header {
        indent: String,
        category: Category,
        covered: Option<u32>,
        total: u32,
    },
    /// An item record of the current category.
    Item(Item),
    /// Any other line, kept verbatim.
    Opaque(String),
}

impl AstLine {
    /// Classifies a line (without terminator).
    ///
    /// `current` is the category of the most recent header; the shape of an item record depends on it. Before the
    /// first header nothing is an item. `line_number` (1-based) is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInteger`] if a numeric field of a header or item does not fit into `u32`.
    ///
    /// [`InvalidInteger`]: ../error/enum.ErrorKind.html#variant.InvalidInteger
    pub fn classify(text: &str, current: Option<Category>, line_number: usize) -> Result<AstLine> {
        if let Some(c) = HEADER.captures(text) {
            let category = c[2].parse::<Category>().expect("category keyword matched by regex");
            let covered = match c.get(3) {
                Some(m) => Some(parse_digits(m.as_str(), line_number)?),
                None => None,
            };
            return Ok(AstLine::Header {
                indent: c[1].to_owned(),
                category,
                covered,
                total: parse_digits(&c[4], line_number)?,
            });
        }

        let item = match current {
            Some(category) => {
                let named = category.has_names();
                let pattern = if named { &*FUNCTION_ITEM } else { &*ITEM };
                pattern.captures(text).map(|c| parse_item(&c, named, line_number))
            },
            None => None,
        };
        match item {
            Some(item) => Ok(AstLine::Item(item?)),
            None => Ok(AstLine::Opaque(text.to_owned())),
        }
    }
}

/// Builds an [`Item`] from the captures of [`FUNCTION_ITEM`] or [`ITEM`].
fn parse_item(c: &Captures, named: bool, line_number: usize) -> Result<Item> {
    let (name, first_number) = if named {
        (Some(c[4].to_owned()), 5)
    } else {
        (None, 4)
    };
    let number = |group: usize| parse_digits::<u32>(&c[group], line_number);
    Ok(Item {
        indent: c[1].to_owned(),
        marker: Marker::from_symbol(&c[2]),
        index: number(3)?,
        name,
        span: Span {
            start_line: number(first_number)?,
            start_column: number(first_number + 1)?,
            end_line: number(first_number + 2)?,
            end_column: number(first_number + 3)?,
        },
        trailing: c[first_number + 4].to_owned(),
    })
}

impl fmt::Display for AstLine {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AstLine::Header { ref indent, category, covered: None, total } => write!(fmt, "{}- {}: {}", indent, category, total),
            AstLine::Header { category, covered: Some(covered), total, .. } => {
                let percentage = ::annotate::percentage(covered, total);
                write!(fmt, "- {}: {}/{} ({:.2}%)", category, covered, total, percentage)
            },
            AstLine::Item(ref item) => item.fmt(fmt),
            AstLine::Opaque(ref text) => fmt.write_str(text),
        }
    }
}

//}}}
//----------------------------------------------------------------------------------------------------------------------
//{{{ AstReport

/// A line of the report together with its original terminator (`"\n"`, `"\r\n"`, or `""` at the end of the text).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ReportLine {
    pub line: AstLine,
    pub terminator: &'static str,
}

impl ReportLine {
    /// A line terminated by `"\n"`.
    pub fn new(line: AstLine) -> ReportLine {
        ReportLine { line, terminator: "\n" }
    }
}

/// An AST coverage report.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct AstReport {
    lines: Vec<ReportLine>,
}

impl AstReport {
    /// Creates a report from classified lines.
    pub fn from_lines(lines: Vec<ReportLine>) -> AstReport {
        AstReport { lines }
    }

    /// Reads and classifies a report file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<AstReport> {
        let path = path.as_ref();
        let content = read_to_string(path)?;
        content.parse().chain_err(|| format!("cannot read AST report from `{}`", path.display()))
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<ReportLine> {
        self.lines
    }
}

impl FromStr for AstReport {
    type Err = Error;

    fn from_str(s: &str) -> Result<AstReport> {
        let mut current = None;
        let mut lines = Vec::new();
        for (i, (text, terminator)) in lines_with_terminators(s).enumerate() {
            let line = AstLine::classify(text, current, i + 1)?;
            trace!("line {}: {:?}", i + 1, line);
            if let AstLine::Header { category, .. } = line {
                current = Some(category);
            }
            lines.push(ReportLine {
                line,
                terminator: static_terminator(terminator),
            });
        }
        Ok(AstReport { lines })
    }
}

fn static_terminator(terminator: &str) -> &'static str {
    match terminator {
        "\r\n" => "\r\n",
        "\n" => "\n",
        _ => "",
    }
}

impl fmt::Display for AstReport {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for line in &self.lines {
            write!(fmt, "{}{}", line.line, line.terminator)?;
        }
        Ok(())
    }
}

//}}}
