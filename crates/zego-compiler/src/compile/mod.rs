//! Namespace compiler over parsed modules.
//!
//! Passes, in order:
//! 1. Sort modules by filename
//! 2. Merge the rule names each package exports
//! 3. Rewrite unqualified rule names to fully qualified references
//! 4. Build the module tree and the rule tree
//! 5. Check that every `zego.…` reference reaches a package or a rule

mod check;
mod compiler;
mod query;
mod resolve;
mod tree;

#[cfg(test)]
mod compiler_tests;
#[cfg(test)]
mod resolve_tests;

use zego_core::Location;

pub use compiler::Compiler;
pub use query::QueryCompiler;
pub use tree::{ModuleTree, RuleTree, TreeNode};

use crate::diagnostics::{DiagnosticKind, Diagnostics, location_range};
use crate::parser::parse_module;
use crate::{Error, Result};

/// Parses every `(filename, source)` pair and compiles the resulting modules.
///
/// Parse errors of all files are reported together as [`Error::Parse`];
/// compilation only runs when every file parsed.
pub fn compile_modules<N, S>(sources: impl IntoIterator<Item = (N, S)>) -> Result<Compiler>
where
    N: AsRef<str>,
    S: AsRef<str>,
{
    let mut parsed = Vec::new();
    let mut diagnostics = Diagnostics::new();
    for (name, source) in sources {
        let name = name.as_ref();
        match parse_module(name, source.as_ref()) {
            Ok(module) => parsed.push((name.to_owned(), module)),
            Err(Error::Parse(d) | Error::Compile(d)) => diagnostics.extend(d),
        }
    }
    if diagnostics.has_errors() {
        return Err(Error::Parse(diagnostics));
    }

    let mut compiler = Compiler::new();
    compiler.compile(parsed);
    compiler.into_result()
}

fn report(
    diagnostics: &mut Diagnostics,
    kind: DiagnosticKind,
    location: Option<&Location>,
    detail: Option<&str>,
) {
    let range = location.map(location_range).unwrap_or_default();
    let builder = diagnostics.report(kind, range).at(location.cloned());
    match detail {
        Some(detail) => builder.message(detail).emit(),
        None => builder.emit(),
    }
}
