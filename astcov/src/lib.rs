//! `astcov` post-processes the text produced by coverage tooling.
//!
//! * [`AstReport`] is the line-oriented listing of coverage items (functions, statements, branches, loops and macros)
//!   found in a source file. Annotating it with a set of [`CoveredLines`] marks every item whose line range was
//!   executed and rewrites the section headers into `covered/total (percentage%)` form.
//! * [`DumpSummary`] tallies the coverage statements found in a raw LLVM MIR coverage dump.
//! * With the `extract` feature, [`extract`] produces an [`AstReport`] from Rust source code.
//!
//! [`AstReport`]: ./ast/struct.AstReport.html
//! [`CoveredLines`]: ./covered/struct.CoveredLines.html
//! [`DumpSummary`]: ./dump/struct.DumpSummary.html
//! [`extract`]: ./extract/index.html

#![recursion_limit="128"] // needed for error_chain.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[cfg(feature = "extract")]
extern crate proc_macro2;
extern crate regex;
#[cfg(feature = "serde")]
extern crate serde;
#[cfg(feature = "serde_json")]
extern crate serde_json;
#[cfg(feature = "extract")]
extern crate syn;

mod utils;
pub mod error;
pub mod covered;
pub mod ast;
pub mod annotate;
pub mod dump;
#[cfg(feature = "extract")]
pub mod extract;

pub use annotate::{Annotation, CategoryCoverage, Coverage};
pub use ast::{AstLine, AstReport, Category, Item, Marker, Span};
pub use covered::CoveredLines;
pub use dump::DumpSummary;
pub use error::{ErrorKind, Result};
