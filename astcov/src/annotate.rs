//! Marking covered items of an [`AstReport`] and computing per-category coverage.
//!
//! [`AstReport`]: ../ast/struct.AstReport.html

use ast::{AstLine, AstReport, Category, Marker, ReportLine};
use covered::CoveredLines;
use error::Result;

#[cfg(feature = "serde")]
use serde::Serialize;

use std::collections::{BTreeMap, btree_map};
use std::fmt;
use std::io::Write;

/// Computes `covered / total` in percent. Zero if `total` is zero.
pub fn percentage(covered: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(covered) / f64::from(total) * 100.0
    }
}

/// Coverage of a single category.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CategoryCoverage {
    /// Number of items whose line range contains a covered line.
    pub covered: u32,

    /// Number of items declared by the section header.
    pub total: u32,
}

impl CategoryCoverage {
    pub fn percentage(&self) -> f64 {
        percentage(self.covered, self.total)
    }
}

impl fmt::Display for CategoryCoverage {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}/{} ({:.2}%)", self.covered, self.total, self.percentage())
    }
}

/// Coverage of every category that has a section header in the report.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Coverage {
    categories: BTreeMap<Category, CategoryCoverage>,
}

impl Coverage {
    /// Coverage of a category. All zero if the report has no such section.
    pub fn get(&self, category: Category) -> CategoryCoverage {
        self.categories.get(&category).cloned().unwrap_or_default()
    }

    /// Iterates the categories present in the report, in [`Category::ALL`] order.
    ///
    /// [`Category::ALL`]: ../ast/enum.Category.html#associatedconstant.ALL
    pub fn iter(&self) -> btree_map::Iter<Category, CategoryCoverage> {
        self.categories.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// State threaded through the marking pass.
#[derive(Default)]
struct Cursor {
    /// Category of the most recent header.
    category: Option<Category>,
    coverage: Coverage,
}

impl Cursor {
    /// Processes one line, returning the (possibly re-marked) line.
    fn step(&mut self, line: &ReportLine, covered_lines: &CoveredLines) -> ReportLine {
        let mut line = line.clone();
        match line.line {
            AstLine::Header { category, total, .. } => {
                self.category = Some(category);
                self.coverage.categories.entry(category).or_insert_with(CategoryCoverage::default).total = total;
            },
            AstLine::Item(ref mut item) => if let Some(category) = self.category {
                let is_covered = covered_lines.any_in_range(item.span.start_line, item.span.end_line);
                if is_covered {
                    self.coverage.categories.entry(category).or_insert_with(CategoryCoverage::default).covered += 1;
                    item.marker = Marker::Covered;
                } else {
                    if item.marker == Marker::Covered {
                        debug!("{} item {} at {} is no longer covered", category, item.index, item.span);
                    }
                    item.marker = Marker::Uncovered;
                }
            } else {
                warn!("item {} appears before any section header", item.index);
            },
            AstLine::Opaque(_) => {},
        }
        line
    }
}

impl AstReport {
    /// Marks every item whose line range contains a covered line, and rewrites the section headers with the coverage
    /// of their category.
    ///
    /// Markers are recomputed from `covered_lines` alone: an item already marked `*` whose range is not covered is
    /// reset to `-`. Columns are ignored. When a category has several headers, the last declared total wins and
    /// every header of the category shows the final count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use astcov::{AstReport, Category, CoveredLines};
    ///
    /// let report = "- func: 2\n- 1: foo: 4:1-6:2\n* 2: bar: 15:1-18:3\n".parse::<AstReport>().unwrap();
    /// let covered = "5\n10\n20\n".parse::<CoveredLines>().unwrap();
    /// let annotation = report.annotate(&covered);
    ///
    /// assert_eq!(annotation.report().to_string(), "- func: 1/2 (50.00%)\n* 1: foo: 4:1-6:2\n- 2: bar: 15:1-18:3\n");
    /// assert_eq!(annotation.coverage().get(Category::Function).covered, 1);
    /// ```
    pub fn annotate(&self, covered_lines: &CoveredLines) -> Annotation {
        let (cursor, mut lines) = self.lines().iter().fold((Cursor::default(), Vec::new()), |(mut cursor, mut lines), line| {
            lines.push(cursor.step(line, covered_lines));
            (cursor, lines)
        });
        let coverage = cursor.coverage;

        for line in &mut lines {
            if let AstLine::Header { category, ref mut covered, ref mut total, .. } = line.line {
                let c = coverage.get(category);
                *covered = Some(c.covered);
                *total = c.total;
            }
        }

        for (category, c) in coverage.iter() {
            if c.covered > c.total {
                warn!("{} items covered exceeds the declared total ({})", category, c);
            }
        }

        Annotation {
            report: AstReport::from_lines(lines),
            coverage,
        }
    }
}

/// The result of [`AstReport::annotate()`].
///
/// [`AstReport::annotate()`]: ../ast/struct.AstReport.html#method.annotate
#[derive(Clone, PartialEq, Debug)]
pub struct Annotation {
    report: AstReport,
    coverage: Coverage,
}

impl Annotation {
    /// The annotated report.
    pub fn report(&self) -> &AstReport {
        &self.report
    }

    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    /// Writes the annotated report, every line followed by its original terminator.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for line in self.report.lines() {
            write!(writer, "{}{}", line.line, line.terminator)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn into_parts(self) -> (AstReport, Coverage) {
        (self.report, self.coverage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::Item;

    fn annotate(report: &str, covered: &[u32]) -> Annotation {
        let report = report.parse::<AstReport>().unwrap();
        report.annotate(&covered.iter().cloned().collect())
    }

    fn markers(report: &AstReport) -> Vec<Marker> {
        report
            .lines()
            .iter()
            .filter_map(|l| match l.line {
                AstLine::Item(Item { marker, .. }) => Some(marker),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 2), 50.0);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(CategoryCoverage { covered: 1, total: 3 }.to_string(), "1/3 (33.33%)");
        assert_eq!(CategoryCoverage { covered: 2, total: 3 }.to_string(), "2/3 (66.67%)");
        assert_eq!(CategoryCoverage { covered: 0, total: 0 }.to_string(), "0/0 (0.00%)");
    }

    #[test]
    fn test_marks_and_downgrades() {
        let annotation = annotate("- func: 2\n- 1: foo: 4:1-6:2\n* 2: bar: 15:1-18:3\n", &[5, 10, 20]);
        assert_eq!(annotation.report().to_string(), "- func: 1/2 (50.00%)\n* 1: foo: 4:1-6:2\n- 2: bar: 15:1-18:3\n");
        assert_eq!(annotation.coverage().get(Category::Function), CategoryCoverage { covered: 1, total: 2 });
    }

    #[test]
    fn test_single_line_span() {
        let report = "- stmt: 3\n  - 1: 7:0-7:9\n  - 2: 8:0-8:9\n  - 3: 9:4-9:5\n";
        let annotation = annotate(report, &[8, 9]);
        assert_eq!(markers(annotation.report()), vec![Marker::Uncovered, Marker::Covered, Marker::Covered]);
        assert_eq!(annotation.coverage().get(Category::Statement).covered, 2);
    }

    #[test]
    fn test_columns_are_ignored() {
        // Line 3 is inside 3:40-3:41 even though the columns are narrow.
        let annotation = annotate("- branch: 1\n  - 1: 3:40-3:41\n", &[3]);
        assert_eq!(markers(annotation.report()), vec![Marker::Covered]);
    }

    #[test]
    fn test_overlapping_spans_are_independent() {
        let report = "- loop: 2\n  - 1: 1:0-10:1\n  - 2: 4:4-6:5\n";
        let annotation = annotate(report, &[5]);
        assert_eq!(markers(annotation.report()), vec![Marker::Covered, Marker::Covered]);
        assert_eq!(annotation.coverage().get(Category::Loop).to_string(), "2/2 (100.00%)");
    }

    #[test]
    fn test_empty_covered_set() {
        let report = "AST:\n- func: 1\n  * 1: main: 1:0-3:1\n- stmt: 2\n  - 1: 2:4-2:9\n  * 2: 3:0-3:1\n- macro: 0\n";
        let annotation = annotate(report, &[]);
        assert_eq!(
            annotation.report().to_string(),
            "AST:\n- func: 0/1 (0.00%)\n  - 1: main: 1:0-3:1\n- stmt: 0/2 (0.00%)\n  - 1: 2:4-2:9\n  - 2: 3:0-3:1\n- macro: 0/0 (0.00%)\n"
        );
    }

    #[test]
    fn test_opaque_lines_are_unchanged() {
        let report = "header text\n- stmt: 1\nnot an item\n  - 1: 1:0-1:5\n\n  - have 2 switch cases : 1:0-1:5\n";
        let annotation = annotate(report, &[1]);
        let lines = annotation.report().to_string();
        let lines = lines.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "header text");
        assert_eq!(lines[2], "not an item");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "  - have 2 switch cases : 1:0-1:5");
    }

    #[test]
    fn test_repeated_category_headers() {
        let report = "- stmt: 1\n  - 1: 1:0-1:1\n- stmt: 2\n  - 1: 2:0-2:1\n  - 2: 3:0-3:1\n";
        let annotation = annotate(report, &[1, 2, 3]);
        assert_eq!(annotation.coverage().get(Category::Statement), CategoryCoverage { covered: 3, total: 2 });
        let text = annotation.report().to_string();
        assert_eq!(text.lines().filter(|l| *l == "- stmt: 3/2 (150.00%)").count(), 2);
    }

    #[test]
    fn test_zero_total_is_not_reconciled() {
        let annotation = annotate("- macro: 0\n  - 1: 1:0-1:1\n", &[1]);
        let c = annotation.coverage().get(Category::Macro);
        assert_eq!((c.covered, c.total, c.percentage()), (1, 0, 0.0));
    }

    #[test]
    fn test_reannotating_own_output_is_stable() {
        let report = "- func: 2\n  - 1: a: 1:0-4:1\n  - 2: b: 6:0-9:1\n- stmt: 2\n  - 1: 2:4-2:9\n  - 2: 7:4-7:9\n";
        let covered = [2, 3];
        let first = annotate(report, &covered);
        let stripped = first.report().to_string().replace("* ", "- ");
        let second = annotate(&stripped, &covered);
        assert_eq!(first.report(), second.report());
        assert_eq!(first.coverage(), second.coverage());
    }

    #[test]
    fn test_write_to_keeps_terminators() {
        let annotation = annotate("- loop: 1\r\n  - 1: 2:0-5:1\r\nend", &[4]);
        let mut output = Vec::new();
        annotation.write_to(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "- loop: 1/1 (100.00%)\r\n  * 1: 2:0-5:1\r\nend");
    }

    #[test]
    fn test_coverage_iterates_present_categories() {
        let annotation = annotate("- stmt: 1\n- func: 0\n", &[]);
        let categories = annotation.coverage().iter().map(|(c, _)| *c).collect::<Vec<_>>();
        assert_eq!(categories, vec![Category::Function, Category::Statement]);
        assert_eq!(annotation.coverage().get(Category::Branch), CategoryCoverage::default());
    }
}
