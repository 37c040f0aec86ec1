//! Checks that references into the root document reach a package or a rule.

use zego_core::{Body, ExprTerms, ROOT_DOCUMENT, Term, Value};

use super::report;
use super::tree::RuleTree;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

pub(super) struct RefChecker<'a> {
    rules: &'a RuleTree,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> RefChecker<'a> {
    pub(super) fn new(rules: &'a RuleTree, diagnostics: &'a mut Diagnostics) -> Self {
        Self { rules, diagnostics }
    }

    pub(super) fn check_body(&mut self, body: &Body) {
        for expr in body {
            match &expr.terms {
                ExprTerms::Term(term) => self.check_term(term),
                ExprTerms::Call(terms) => {
                    for term in terms {
                        self.check_term(term);
                    }
                }
            }
        }
    }

    pub(super) fn check_term(&mut self, term: &Term) {
        match &term.value {
            Value::Ref(terms) => {
                if terms
                    .first()
                    .is_some_and(|head| head.value.as_var() == Some(ROOT_DOCUMENT))
                {
                    self.check_path(term, terms);
                }
                for segment in terms {
                    self.check_term(segment);
                }
            }
            Value::Call(terms) => {
                for term in terms {
                    self.check_term(term);
                }
            }
            Value::Boolean(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Var(_)
            | Value::Op(_) => {}
        }
    }

    /// Walks the rule tree along the literal segments of `path`. Once a rule
    /// is reached the remaining segments index into its value; a computed
    /// segment ends the walk.
    fn check_path(&mut self, term: &Term, path: &[Term]) {
        let mut node = self.rules;
        for (i, segment) in path.iter().enumerate() {
            if !node.payload().is_empty() {
                return;
            }
            if i > 0 && !matches!(segment.value, Value::String(_)) {
                return;
            }
            match node.child(&segment.value) {
                Some(child) => node = child,
                None => {
                    let missing = Term::reference(path[..=i].to_vec());
                    report(
                        self.diagnostics,
                        DiagnosticKind::UndefinedReference,
                        term.location.as_ref(),
                        Some(missing.to_string().as_str()),
                    );
                    return;
                }
            }
        }
    }
}
