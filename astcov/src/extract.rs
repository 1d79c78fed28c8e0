//! Building an [`AstReport`] from Rust source code.
//!
//! Every free function, statement, branch, loop and macro invocation of the source is listed with its span. The
//! report is the input expected by [`AstReport::annotate()`], with every item initially marked uncovered.
//!
//! After the macros, three detail sections follow: `switch` (each `match` with its number of arms), `binary
//! conditional` (each `&&`/`||` expression with its two operands) and `if stmt` (the whole span of each `if`, indexed
//! like its condition under `branch`). These headers are not categories, so the annotator counts their items under
//! `macro`.
//!
//! Lines are 1-based and columns are 0-based, as reported by `proc-macro2`.
//!
//! [`AstReport`]: ../ast/struct.AstReport.html
//! [`AstReport::annotate()`]: ../ast/struct.AstReport.html#method.annotate

use ast::{AstLine, AstReport, Category, Item, Marker, ReportLine, Span as ItemSpan};
use error::*;
use utils::read_to_string;

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{BinOp, ExprBinary, ExprForLoop, ExprIf, ExprLoop, ExprMacro, ExprMatch, ExprWhile, File, ItemFn, Stmt, StmtMacro};

use std::path::Path;

/// A `&&` or `||` expression.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BinaryCondition {
    pub span: ItemSpan,
    pub left: ItemSpan,
    pub right: ItemSpan,
}

/// Items found in a source file, grouped by category, in visiting order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Items {
    pub functions: Vec<(String, ItemSpan)>,
    pub statements: Vec<ItemSpan>,
    pub branches: Vec<ItemSpan>,
    pub loops: Vec<ItemSpan>,
    pub macros: Vec<ItemSpan>,
    /// Every `match`, with its number of arms.
    pub switches: Vec<(usize, ItemSpan)>,
    pub binary_conditions: Vec<BinaryCondition>,
    /// Every `if`, with the index of its condition in `branches`.
    pub if_statements: Vec<(u32, ItemSpan)>,
}

fn item_span(span: Span) -> ItemSpan {
    let start = span.start();
    let end = span.end();
    ItemSpan {
        start_line: start.line as u32,
        start_column: start.column as u32,
        end_line: end.line as u32,
        end_column: end.column as u32,
    }
}

impl<'ast> Visit<'ast> for Items {
    // Methods in `impl` blocks are not functions here, though their bodies are still visited.
    fn visit_item_fn(&mut self, i: &'ast ItemFn) {
        self.functions.push((i.sig.ident.to_string(), item_span(i.span())));
        visit::visit_item_fn(self, i);
    }

    fn visit_stmt(&mut self, i: &'ast Stmt) {
        self.statements.push(item_span(i.span()));
        visit::visit_stmt(self, i);
    }

    // Operands of binary expressions are not descended into, so `a && b && c` is a single condition.
    fn visit_expr_binary(&mut self, i: &'ast ExprBinary) {
        match i.op {
            BinOp::And(_) | BinOp::Or(_) => self.binary_conditions.push(BinaryCondition {
                span: item_span(i.span()),
                left: item_span(i.left.span()),
                right: item_span(i.right.span()),
            }),
            _ => {},
        }
    }

    fn visit_expr_if(&mut self, i: &'ast ExprIf) {
        // Only the condition decides which branch is taken.
        self.branches.push(item_span(i.cond.span()));
        self.if_statements.push((self.branches.len() as u32, item_span(i.span())));
        visit::visit_expr_if(self, i);
    }

    fn visit_expr_match(&mut self, i: &'ast ExprMatch) {
        let span = item_span(i.span());
        self.branches.push(span);
        self.switches.push((i.arms.len(), span));
        visit::visit_expr_match(self, i);
    }

    fn visit_expr_loop(&mut self, i: &'ast ExprLoop) {
        self.loops.push(item_span(i.span()));
        visit::visit_expr_loop(self, i);
    }

    fn visit_expr_while(&mut self, i: &'ast ExprWhile) {
        self.loops.push(item_span(i.span()));
        visit::visit_expr_while(self, i);
    }

    fn visit_expr_for_loop(&mut self, i: &'ast ExprForLoop) {
        self.loops.push(item_span(i.span()));
        visit::visit_expr_for_loop(self, i);
    }

    fn visit_stmt_macro(&mut self, i: &'ast StmtMacro) {
        self.macros.push(item_span(i.span()));
        visit::visit_stmt_macro(self, i);
    }

    fn visit_expr_macro(&mut self, i: &'ast ExprMacro) {
        self.macros.push(item_span(i.span()));
        visit::visit_expr_macro(self, i);
    }
}

impl Items {
    /// Collects the items of a parsed file.
    pub fn collect(file: &File) -> Items {
        let mut items = Items::default();
        items.visit_file(file);
        items
    }

    /// Parses Rust source code and collects its items.
    pub fn parse(source: &str) -> Result<Items> {
        let file = ::syn::parse_file(source)?;
        Ok(Items::collect(&file))
    }

    /// Lays out the items as an AST report.
    ///
    /// Functions, statements and branches come first under `AST:`; loops, macros and the detail sections follow
    /// under `For detail check:`.
    pub fn to_report(&self) -> AstReport {
        let mut lines = vec![opaque("AST:".to_owned())];
        push_section(&mut lines, Category::Function, self.functions.iter().map(|&(ref name, span)| (Some(name.clone()), span)));
        push_section(&mut lines, Category::Statement, self.statements.iter().map(|&span| (None, span)));
        push_section(&mut lines, Category::Branch, self.branches.iter().map(|&span| (None, span)));
        lines.push(opaque(String::new()));
        lines.push(opaque("For detail check:".to_owned()));
        push_section(&mut lines, Category::Loop, self.loops.iter().map(|&span| (None, span)));
        push_section(&mut lines, Category::Macro, self.macros.iter().map(|&span| (None, span)));

        lines.push(opaque(format!("- switch: {}", self.switches.len())));
        lines.extend(self.switches.iter().map(|&(arms, span)| opaque(format!("  - have {} switch cases : {}", arms, span))));

        lines.push(opaque(format!("- binary conditional: {}", self.binary_conditions.len())));
        for (i, condition) in self.binary_conditions.iter().enumerate() {
            lines.push(uncovered_item(i as u32 + 1, None, condition.span));
            lines.push(opaque(format!("    - left: {}", condition.left)));
            lines.push(opaque(format!("    - right: {}", condition.right)));
        }

        lines.push(opaque(format!("- if stmt: {}", self.if_statements.len())));
        lines.extend(self.if_statements.iter().map(|&(branch, span)| uncovered_item(branch, None, span)));

        AstReport::from_lines(lines)
    }
}

fn opaque(text: String) -> ReportLine {
    ReportLine::new(AstLine::Opaque(text))
}

fn uncovered_item(index: u32, name: Option<String>, span: ItemSpan) -> ReportLine {
    ReportLine::new(AstLine::Item(Item {
        indent: "  ".to_owned(),
        marker: Marker::Uncovered,
        index,
        name,
        span,
        trailing: String::new(),
    }))
}

/// Appends a section header and its items (indices start at 1).
fn push_section<I>(lines: &mut Vec<ReportLine>, category: Category, items: I)
where
    I: ExactSizeIterator<Item = (Option<String>, ItemSpan)>,
{
    lines.push(ReportLine::new(AstLine::Header {
        indent: String::new(),
        category,
        covered: None,
        total: items.len() as u32,
    }));
    lines.extend(items.enumerate().map(|(i, (name, span))| uncovered_item(i as u32 + 1, name, span)));
}

/// Reads a Rust source file and produces its AST report.
pub fn extract<P: AsRef<Path>>(path: P) -> Result<AstReport> {
    let path = path.as_ref();
    let source = read_to_string(path)?;
    let items = Items::parse(&source).chain_err(|| format!("cannot parse `{}`", path.display()))?;
    debug!(
        "{:?}: {} functions, {} statements, {} branches, {} loops, {} macros, {} binary conditions",
        path,
        items.functions.len(),
        items.statements.len(),
        items.branches.len(),
        items.loops.len(),
        items.macros.len(),
        items.binary_conditions.len()
    );
    Ok(items.to_report())
}
