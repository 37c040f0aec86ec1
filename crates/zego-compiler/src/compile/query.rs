use tracing::debug;
use zego_core::Body;

use super::check::RefChecker;
use super::compiler::Compiler;
use crate::diagnostics::Diagnostics;
use crate::{Error, Result};

/// Checks ad-hoc query bodies against the rules of a compiled module set.
pub struct QueryCompiler<'c> {
    compiler: &'c Compiler,
}

impl<'c> QueryCompiler<'c> {
    pub fn new(compiler: &'c Compiler) -> Self {
        Self { compiler }
    }

    /// Every `zego.…` reference in `body` must name a known package or rule.
    pub fn compile(&self, body: Body) -> Result<Body> {
        let mut diagnostics = Diagnostics::new();
        RefChecker::new(self.compiler.rule_tree(), &mut diagnostics).check_body(&body);
        debug!(exprs = body.len(), errors = diagnostics.error_count(), "compiled query");
        if diagnostics.has_errors() {
            return Err(Error::Compile(diagnostics));
        }
        Ok(body)
    }
}
