//! Command line argument parsing.
//!
//! Every subcommand turns its `ArgMatches` into a configuration structure, so the pipelines never see `clap`.

use utils::Output;

use clap::{App, ArgMatches};

use std::path::PathBuf;

/// Builds the `clap` application.
#[allow(unknown_lints, dangerous_implicit_autorefs)] // triggered inside clap 2 `crate_authors!` expansion
pub fn app() -> App<'static, 'static> {
    clap_app!(astcov =>
        (author: crate_authors!(", "))
        (about: crate_description!())
        (version: crate_version!())
        (@setting DeriveDisplayOrder)
        (@setting SubcommandRequiredElseHelp)
        (@setting VersionlessSubcommands)
        (@subcommand annotate =>
            (about: "Marks covered items of an AST report and computes coverage per category")
            (@arg covered: --covered [PATH] default_value("./llvm_result.txt") "List of covered line numbers, one per line")
            (@arg ast: --ast [PATH] default_value("./ast_result.txt") "The AST report to annotate")
            (@arg output: --output -o [PATH] default_value("./result.txt") "Where to write the annotated report, `-` for stdout")
            (@arg format: --format [FORMAT] default_value("text") possible_values(&["text", "json"]) "How to print the coverage summary")
        )
        (@subcommand summarize =>
            (about: "Counts functions, branches and statements of an LLVM MIR coverage dump")
            (@arg dump: --dump [PATH] default_value("main.txt") "The MIR dump to scan")
            (@arg format: --format [FORMAT] default_value("text") possible_values(&["text", "json"]) "How to print the summary")
        )
        (@subcommand extract =>
            (about: "Lists the functions, statements, branches, loops and macros of a Rust source file as an AST report")
            (@arg source: +required "The Rust source file")
            (@arg output: --output -o [PATH] default_value("-") "Where to write the AST report, `-` for stdout")
        )
    )
}

/// How a summary is printed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    fn parse(matches: &ArgMatches) -> Format {
        match matches.value_of("format") {
            Some("json") => Format::Json,
            _ => Format::Text,
        }
    }
}

/// Reads a path option. All path options have a default value.
fn path_of(matches: &ArgMatches, name: &str) -> PathBuf {
    PathBuf::from(matches.value_of_os(name).expect("option with default value"))
}

fn output_of(matches: &ArgMatches) -> Output {
    Output::from(matches.value_of_os("output").expect("option with default value"))
}

/// Configuration of `astcov annotate`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AnnotateConfig {
    pub covered_path: PathBuf,
    pub ast_path: PathBuf,
    pub output: Output,
    pub format: Format,
}

impl AnnotateConfig {
    pub fn parse(matches: &ArgMatches) -> AnnotateConfig {
        AnnotateConfig {
            covered_path: path_of(matches, "covered"),
            ast_path: path_of(matches, "ast"),
            output: output_of(matches),
            format: Format::parse(matches),
        }
    }
}

/// Configuration of `astcov summarize`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SummarizeConfig {
    pub dump_path: PathBuf,
    pub format: Format,
}

impl SummarizeConfig {
    pub fn parse(matches: &ArgMatches) -> SummarizeConfig {
        SummarizeConfig {
            dump_path: path_of(matches, "dump"),
            format: Format::parse(matches),
        }
    }
}

/// Configuration of `astcov extract`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ExtractConfig {
    pub source_path: PathBuf,
    pub output: Output,
}

impl ExtractConfig {
    pub fn parse(matches: &ArgMatches) -> ExtractConfig {
        ExtractConfig {
            source_path: path_of(matches, "source"),
            output: output_of(matches),
        }
    }
}
