//! Compiler state and entry points.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;
use zego_core::{Module, Package, Term};

use super::check::RefChecker;
use super::resolve::Resolver;
use super::tree::{ModuleTree, RuleTree};
use crate::diagnostics::Diagnostics;
use crate::{Error, Result};

/// Builds the namespace trees over a set of modules and resolves the rule
/// references inside them.
///
/// Every [`compile`](Self::compile) call starts from scratch. Modules are
/// processed in filename order, whatever order they were handed in.
#[derive(Debug, Clone)]
pub struct Compiler {
    modules: IndexMap<String, Module>,
    exports: IndexMap<Package, IndexSet<String>>,
    module_tree: ModuleTree,
    rule_tree: RuleTree,
    diagnostics: Diagnostics,
    shadow_warnings: bool,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            modules: IndexMap::new(),
            exports: IndexMap::new(),
            module_tree: ModuleTree::default(),
            rule_tree: RuleTree::default(),
            diagnostics: Diagnostics::new(),
            shadow_warnings: true,
        }
    }

    /// Warn when a local declared with `:=` hides a rule of the package.
    pub fn with_shadow_warnings(mut self, enabled: bool) -> Self {
        self.shadow_warnings = enabled;
        self
    }

    /// Compiles `modules`, keyed by filename. Check [`failed`](Self::failed)
    /// and [`diagnostics`](Self::diagnostics) afterwards.
    pub fn compile<I, K>(&mut self, modules: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Module)>,
        K: Into<String>,
    {
        self.modules = modules.into_iter().map(|(k, m)| (k.into(), m)).collect();
        self.modules.sort_keys();
        self.diagnostics = Diagnostics::new();
        debug!(modules = ?self.modules.keys().collect::<Vec<_>>(), "compiling");

        self.exports = self.collect_exports();
        self.resolve_all_refs();
        self.module_tree = ModuleTree::build(self.modules.values());
        self.rule_tree = RuleTree::build(self.modules.values());
        self.check_all_refs();

        debug!(
            errors = self.diagnostics.error_count(),
            warnings = self.diagnostics.warning_count(),
            "compiled"
        );
        self
    }

    pub fn failed(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Errors and warnings of the last [`compile`](Self::compile) call.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Turns a failed compilation into [`Error::Compile`].
    pub fn into_result(self) -> Result<Self> {
        if self.failed() {
            return Err(Error::Compile(self.diagnostics));
        }
        Ok(self)
    }

    /// Compiled modules in filename order.
    pub fn modules(&self) -> impl Iterator<Item = (&str, &Module)> {
        self.modules.iter().map(|(k, m)| (k.as_str(), m))
    }

    pub fn module(&self, filename: &str) -> Option<&Module> {
        self.modules.get(filename)
    }

    pub fn module_tree(&self) -> &ModuleTree {
        &self.module_tree
    }

    pub fn rule_tree(&self) -> &RuleTree {
        &self.rule_tree
    }

    /// Rule names declared by each package, merged across modules.
    pub fn exports(&self) -> &IndexMap<Package, IndexSet<String>> {
        &self.exports
    }

    /// Rule names visible unqualified inside `package`, mapped to their
    /// fully qualified references.
    pub fn globals(&self, package: &Package) -> IndexMap<String, Term> {
        globals(package, self.exports.get(package))
    }

    fn collect_exports(&self) -> IndexMap<Package, IndexSet<String>> {
        let mut exports: IndexMap<Package, IndexSet<String>> = IndexMap::new();
        for module in self.modules.values() {
            exports
                .entry(module.package.clone())
                .or_default()
                .extend(module.rules.iter().map(|r| r.name.clone()));
        }
        exports
    }

    fn resolve_all_refs(&mut self) {
        for (filename, module) in &mut self.modules {
            let globals = globals(&module.package, self.exports.get(&module.package));
            debug!(%filename, globals = globals.len(), "resolving references");
            Resolver::new(&globals, &mut self.diagnostics, self.shadow_warnings)
                .resolve_module(module);
        }
    }

    fn check_all_refs(&mut self) {
        let mut checker = RefChecker::new(&self.rule_tree, &mut self.diagnostics);
        for module in self.modules.values() {
            for rule in &module.rules {
                checker.check_body(&rule.body);
                if let Some(value) = &rule.value {
                    checker.check_term(value);
                }
            }
        }
    }
}

fn globals(package: &Package, rules: Option<&IndexSet<String>>) -> IndexMap<String, Term> {
    rules
        .into_iter()
        .flatten()
        .map(|name| (name.clone(), package.qualify(name)))
        .collect()
}
