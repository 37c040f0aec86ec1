//! Steps shared by the commands: loading, parsing, compiling, reporting.

use std::fmt::Display;
use std::path::Path;

use tracing::debug;
use zego_compiler::{Compiler, Diagnostics, Error, SourceMap, parse_module};
use zego_core::Module;

use super::module_loader::load_module_sources;

/// Prints `error: <message>` and exits with status 1.
pub fn fail(message: impl Display) -> ! {
    eprintln!("error: {}", message);
    std::process::exit(1);
}

pub fn load_sources_or_exit(module_path: Option<&Path>, module_text: Option<&str>) -> SourceMap {
    match load_module_sources(module_path, module_text) {
        Ok(map) => map,
        Err(msg) => fail(msg),
    }
}

/// Parses every source as a module named after it. Parse errors of all
/// sources are collected before giving up.
pub fn parse_modules(sources: &SourceMap) -> Result<Vec<(String, Module)>, Diagnostics> {
    let mut modules = Vec::with_capacity(sources.len());
    let mut diagnostics = Diagnostics::new();
    for source in sources.iter() {
        match parse_module(source.name(), source.as_str()) {
            Ok(module) => modules.push((source.name().to_owned(), module)),
            Err(Error::Parse(d) | Error::Compile(d)) => diagnostics.extend(d),
        }
    }
    debug!(
        parsed = modules.len(),
        errors = diagnostics.error_count(),
        "parsed sources"
    );
    if diagnostics.has_errors() {
        return Err(diagnostics);
    }
    Ok(modules)
}

pub fn parse_modules_or_exit(sources: &SourceMap, color: bool) -> Vec<(String, Module)> {
    parse_modules(sources).unwrap_or_else(|diagnostics| {
        print_diagnostics(&diagnostics, sources, color);
        std::process::exit(1);
    })
}

/// Compiles the modules, printing diagnostics and exiting on errors.
/// Warnings are printed and compilation goes on.
pub fn compile_or_exit(sources: &SourceMap, color: bool) -> Compiler {
    let modules = parse_modules_or_exit(sources, color);
    let mut compiler = Compiler::new();
    compiler.compile(modules);

    if !compiler.diagnostics().is_empty() {
        print_diagnostics(compiler.diagnostics(), sources, color);
    }
    if compiler.failed() {
        std::process::exit(1);
    }
    compiler
}

pub fn print_diagnostics(diagnostics: &Diagnostics, sources: &SourceMap, color: bool) {
    eprintln!(
        "{}",
        diagnostics.printer().sources(sources).colored(color).render()
    );
}
