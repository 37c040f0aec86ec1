//! Recursive-descent parser for policy source.
//!
//! # Architecture
//!
//! The parser walks the token list produced by [`lex`] with a single cursor.
//! Whitespace, line breaks and comments stay in the token list so locations
//! are exact; productions skip them between significant tokens.
//!
//! Binary operators are parsed by precedence climbing, tightest first:
//! `* / %`, then `+ -`, then `&`, then `|`, then comparisons. All of them
//! associate to the left.
//!
//! # Errors
//!
//! There is no recovery: the first error ends the parse and the collected
//! diagnostics are returned as [`Error::Parse`].

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod parser_tests;

use tracing::debug;
use zego_core::{Body, Location, Module, ModuleHandle, Statement};

pub use core::Parser;

use crate::diagnostics::{DiagnosticKind, Diagnostics, location_range};
use crate::lexer::{TokenKind, lex};
use crate::{Error, Result};

/// Nesting depth at which parsing gives up instead of overflowing the stack.
pub const MAX_DEPTH: u32 = 512;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    recursion_limit: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recursion_limit: MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn recursion_limit(&self) -> u32 {
        self.recursion_limit
    }

    /// Parses the statements of a source; `name` becomes the file of every location.
    pub fn parse_statements(&self, name: &str, input: &str) -> Result<Vec<Statement>> {
        let mut parser = Parser::new(name, lex(name, input), self);
        let statements = parser.parse_statements();
        let diagnostics = parser.finish();
        if diagnostics.has_errors() {
            return Err(Error::Parse(diagnostics));
        }
        debug!(name, statements = statements.len(), "parsed");
        Ok(statements)
    }

    /// Parses one source file into a module: a single leading package
    /// statement followed by rules.
    pub fn parse_module(&self, filename: &str, input: &str) -> Result<Module> {
        let statements = self.parse_statements(filename, input)?;
        assemble(filename, statements)
    }

    pub fn parse_statement(&self, input: &str) -> Result<Statement> {
        let mut statements = self.parse_statements("", input)?;
        if statements.len() != 1 {
            let mut diagnostics = Diagnostics::new();
            diagnostics
                .report(DiagnosticKind::ExpectedOneStatement, Default::default())
                .emit();
            return Err(Error::Parse(diagnostics));
        }
        Ok(statements.remove(0))
    }

    /// Parses a bare expression sequence, as used for ad-hoc queries.
    pub fn parse_query(&self, input: &str) -> Result<Body> {
        let mut parser = Parser::new("", lex("query", input), self);
        let body = parser.query(TokenKind::Eof);
        let diagnostics = parser.finish();
        match body {
            Some(body) if !diagnostics.has_errors() => Ok(body),
            _ => Err(Error::Parse(diagnostics)),
        }
    }
}

pub fn parse_statements(name: &str, input: &str) -> Result<Vec<Statement>> {
    ParseOptions::default().parse_statements(name, input)
}

pub fn parse_module(filename: &str, input: &str) -> Result<Module> {
    ParseOptions::default().parse_module(filename, input)
}

pub fn parse_statement(input: &str) -> Result<Statement> {
    ParseOptions::default().parse_statement(input)
}

pub fn parse_query(input: &str) -> Result<Body> {
    ParseOptions::default().parse_query(input)
}

/// Attaches the rules following the package statement to a new module.
/// Reports every misplaced statement, not only the first.
fn assemble(filename: &str, statements: Vec<Statement>) -> Result<Module> {
    let mut diagnostics = Diagnostics::new();
    let mut statements = statements.into_iter();

    let Some(first) = statements.next() else {
        report(
            &mut diagnostics,
            DiagnosticKind::EmptyModule,
            Some(Location::new(1, 1).with_file(filename)),
        );
        return Err(Error::Parse(diagnostics));
    };

    let package = match first {
        Statement::Package(package) => Some(package),
        Statement::Rule(rule) => {
            report(&mut diagnostics, DiagnosticKind::ExpectedPackage, rule.location);
            None
        }
    };

    let handle = ModuleHandle::new(filename);
    let mut rules = Vec::new();
    for statement in statements {
        match statement {
            Statement::Rule(mut rule) => {
                rule.module = Some(handle.clone());
                rules.push(rule);
            }
            Statement::Package(package) => {
                report(
                    &mut diagnostics,
                    DiagnosticKind::UnexpectedPackage,
                    package.location,
                );
            }
        }
    }

    match package {
        Some(package) if diagnostics.is_empty() => {
            debug!(filename, %package, rules = rules.len(), "assembled module");
            Ok(Module::new(package, rules))
        }
        _ => Err(Error::Parse(diagnostics)),
    }
}

fn report(diagnostics: &mut Diagnostics, kind: DiagnosticKind, location: Option<Location>) {
    let range = location.as_ref().map(location_range).unwrap_or_default();
    diagnostics.report(kind, range).at(location).emit();
}
