//! Zego compiler: lexer, parser and namespace compiler.
//!
//! This crate provides the front end of the zego policy language:
//! - `lexer` - tokens with exact positions, halting on the first lexical error
//! - `parser` - statements, modules and ad-hoc queries built from tokens
//! - `compile` - module and rule trees, reference resolution
//! - `diagnostics` - error reporting

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
mod source_map;

pub use compile::{Compiler, ModuleTree, QueryCompiler, RuleTree, TreeNode, compile_modules};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use parser::{ParseOptions, parse_module, parse_query, parse_statement, parse_statements};
pub use source_map::{Source, SourceId, SourceKind, SourceMap};

/// Errors surfaced by the public entry points.
///
/// Both variants display as the aggregate of their error messages.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Lexing, parsing or module assembly failed.
    #[error("{0}")]
    Parse(Diagnostics),

    /// Reference checks over parsed modules failed.
    #[error("{0}")]
    Compile(Diagnostics),
}

impl Error {
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Error::Parse(d) | Error::Compile(d) => d,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
