//! Rewrites rule names used inside a package to fully qualified references.
//!
//! Given
//!
//! ```text
//! package a.b
//! limit := 10
//! allow := true { input.size < limit }
//! ```
//!
//! the body of `allow` becomes `lt(input.size, zego.a.b.limit)`.
//!
//! A `:=` declaration inside a body introduces a local. The declared name is
//! left alone and hides the rule of the same name from that expression on.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::trace;
use zego_core::{Body, Expr, ExprTerms, Module, Term, Value};

use super::report;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Resolution context for the rules of one module.
pub(super) struct Resolver<'a> {
    /// Rule name to its fully qualified reference.
    globals: &'a IndexMap<String, Term>,
    locals: HashSet<String>,
    diagnostics: &'a mut Diagnostics,
    shadow_warnings: bool,
}

impl<'a> Resolver<'a> {
    pub(super) fn new(
        globals: &'a IndexMap<String, Term>,
        diagnostics: &'a mut Diagnostics,
        shadow_warnings: bool,
    ) -> Self {
        Self {
            globals,
            locals: HashSet::new(),
            diagnostics,
            shadow_warnings,
        }
    }

    pub(super) fn resolve_module(&mut self, module: &mut Module) {
        for rule in &mut module.rules {
            self.locals.clear();
            // Body first: the value may use what the body declares.
            self.resolve_body(&mut rule.body);
            if let Some(value) = &mut rule.value {
                self.resolve_term(value);
            }
        }
    }

    fn resolve_body(&mut self, body: &mut Body) {
        for expr in body.iter_mut() {
            self.resolve_expr(expr);
        }
    }

    fn resolve_expr(&mut self, expr: &mut Expr) {
        let declaration = expr.is_declaration();
        match &mut expr.terms {
            ExprTerms::Term(term) => self.resolve_term(term),
            ExprTerms::Call(terms) if declaration => {
                let [_, lhs, rhs] = terms.as_mut_slice() else {
                    return;
                };
                self.resolve_term(rhs);
                self.declare(lhs);
            }
            ExprTerms::Call(terms) => {
                for operand in terms.iter_mut().skip(1) {
                    self.resolve_term(operand);
                }
            }
        }
    }

    /// Left-hand side of `:=`. A plain variable becomes a local; anything
    /// else is resolved like any other term.
    fn declare(&mut self, lhs: &mut Term) {
        let Value::Var(name) = &lhs.value else {
            self.resolve_term(lhs);
            return;
        };
        if self.globals.contains_key(name) && self.shadow_warnings {
            report(
                self.diagnostics,
                DiagnosticKind::ShadowedRule,
                lhs.location.as_ref(),
                Some(name.as_str()),
            );
        }
        self.locals.insert(name.clone());
    }

    fn resolve_term(&mut self, term: &mut Term) {
        match &mut term.value {
            Value::Var(name) => {
                if let Some(global) = self.global(name) {
                    trace!(%name, to = %global, "resolved variable");
                    term.value = global.value.clone();
                }
            }
            Value::Ref(terms) => self.resolve_ref(terms),
            Value::Call(terms) => {
                let Some((operator, operands)) = terms.split_first_mut() else {
                    return;
                };
                // Operators are never rule names; called functions are refs.
                if matches!(operator.value, Value::Ref(_)) {
                    self.resolve_term(operator);
                }
                for operand in operands {
                    self.resolve_term(operand);
                }
            }
            Value::Boolean(_) | Value::Number(_) | Value::String(_) | Value::Op(_) => {}
        }
    }

    fn resolve_ref(&mut self, terms: &mut Vec<Term>) {
        let Some((head, rest)) = terms.split_first_mut() else {
            return;
        };
        for segment in rest {
            self.resolve_term(segment);
        }

        let qualified = match &head.value {
            Value::Var(name) => self.global(name).and_then(|g| g.value.as_ref_terms()),
            _ => None,
        };
        match qualified {
            Some(qualified) => {
                trace!(head = %head, "resolved reference head");
                let mut resolved = qualified.to_vec();
                resolved.extend(terms.drain(1..));
                *terms = resolved;
            }
            None => self.resolve_term(head),
        }
    }

    fn global(&self, name: &str) -> Option<&'a Term> {
        if self.locals.contains(name) {
            return None;
        }
        self.globals.get(name)
    }
}
