//! Policy AST: expressions, bodies, rules, packages and modules.
//!
//! Locations and the rule-to-module handle never take part in equality,
//! ordering, hashing or serialization.


use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;

use crate::ROOT_DOCUMENT;
use crate::term::{Location, Operator, Term, Value, write_call, write_ref};

/// Terms of an expression: a single term, or an operator call.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum ExprTerms {
    Term(Term),
    Call(Vec<Term>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Expr {
    #[serde(skip)]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub generated: bool,
    /// Position inside the owning [`Body`], assigned when the expression is added.
    pub index: usize,
    pub terms: ExprTerms,
}

impl Expr {
    pub fn term(term: Term) -> Self {
        Self {
            location: term.location.clone(),
            generated: false,
            index: 0,
            terms: ExprTerms::Term(term),
        }
    }

    /// Operator call; the location is taken from the first operand.
    pub fn call(terms: Vec<Term>) -> Self {
        let location = terms.get(1).and_then(|t| t.location.clone());
        Self {
            location,
            generated: false,
            index: 0,
            terms: ExprTerms::Call(terms),
        }
    }

    /// `lhs := rhs`, lowered to a `declare` call.
    pub fn declaration(operator: Term, lhs: Term, rhs: Term) -> Self {
        Self::call(vec![operator, lhs, rhs])
    }

    pub fn at(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    pub fn is_call(&self) -> bool {
        matches!(self.terms, ExprTerms::Call(_))
    }

    pub fn operator(&self) -> Option<&Term> {
        match &self.terms {
            ExprTerms::Call(terms) => terms.first(),
            ExprTerms::Term(_) => None,
        }
    }

    pub fn operands(&self) -> &[Term] {
        match &self.terms {
            ExprTerms::Call(terms) => terms.get(1..).unwrap_or_default(),
            ExprTerms::Term(_) => &[],
        }
    }

    pub fn is_declaration(&self) -> bool {
        self.operator()
            .is_some_and(|op| op.value == Value::Op(Operator::Declare))
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.terms == other.terms
    }
}

impl Eq for Expr {}

impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        let shape = |e: &Expr| u8::from(e.is_call());
        shape(self)
            .cmp(&shape(other))
            .then_with(|| self.index.cmp(&other.index))
            .then_with(|| self.terms.cmp(&other.terms))
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.terms.hash(state);
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.terms {
            ExprTerms::Term(term) => write!(f, "{term}"),
            ExprTerms::Call(terms) => write_call(f, terms),
        }
    }
}

/// Ordered expressions of a rule body or query.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Body(Vec<Expr>);

impl Body {
    /// Builds a body, renumbering the expressions from zero.
    pub fn new(exprs: impl IntoIterator<Item = Expr>) -> Self {
        let mut body = Self::default();
        for expr in exprs {
            body.push(expr);
        }
        body
    }

    pub fn push(&mut self, mut expr: Expr) {
        expr.index = self.0.len();
        self.0.push(expr);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Expr> {
        self.0.iter_mut()
    }

    pub fn first(&self) -> Option<&Expr> {
        self.0.first()
    }
}

impl<'a> IntoIterator for &'a Body {
    type Item = &'a Expr;
    type IntoIter = std::slice::Iter<'a, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expr) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{expr}")?;
        }
        Ok(())
    }
}

/// Non-owning handle from a rule back to the module (source file) declaring it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleHandle(Arc<str>);

impl ModuleHandle {
    pub fn new(filename: impl Into<Arc<str>>) -> Self {
        Self(filename.into())
    }

    pub fn filename(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    #[serde(skip)]
    pub location: Option<Location>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Term>,
    #[serde(skip_serializing_if = "Body::is_empty")]
    pub body: Body,
    #[serde(skip)]
    pub module: Option<ModuleHandle>,
}

impl Rule {
    pub fn new(name: impl Into<String>, value: Option<Term>, body: Body) -> Self {
        Self {
            location: None,
            name: name.into(),
            value,
            body,
            module: None,
        }
    }

    pub fn at(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    fn key(&self) -> (&str, &Option<Term>, &Body) {
        (&self.name, &self.value, &self.body)
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Rule {}

impl Ord for Rule {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Rule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(value) = &self.value {
            write!(f, " := {value}")?;
        }
        if !self.body.is_empty() {
            write!(f, " {{ {} }}", self.body)?;
        }
        Ok(())
    }
}

/// `package a.b.c`: the path holds one string term per segment.
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    #[serde(skip)]
    pub location: Option<Location>,
    pub path: Vec<Term>,
}

impl Package {
    pub fn new(path: Vec<Term>) -> Self {
        Self {
            location: None,
            path,
        }
    }

    pub fn at(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    pub fn segments(&self) -> impl Iterator<Item = &Value> {
        self.path.iter().map(|t| &t.value)
    }

    /// `zego.<path>`: the reference to the package document.
    pub fn document_ref(&self) -> Vec<Term> {
        let mut terms = Vec::with_capacity(self.path.len() + 1);
        terms.push(Term::var(ROOT_DOCUMENT));
        terms.extend(self.path.iter().map(|t| Term::new(t.value.clone())));
        terms
    }

    /// `zego.<path>.<rule>`: the fully qualified reference to a rule of this package.
    pub fn qualify(&self, rule: &str) -> Term {
        let mut terms = self.document_ref();
        terms.push(Term::string(rule));
        Term::reference(terms)
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Package {}

impl Hash for Package {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("package ")?;
        write_ref(f, &self.path)
    }
}

/// One source file: its package declaration and the rules it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub package: Package,
    pub rules: Vec<Rule>,
}

impl Module {
    pub fn new(package: Package, rules: Vec<Rule>) -> Self {
        Self { package, rules }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.package)?;
        for rule in &self.rules {
            write!(f, "\n{rule}")?;
        }
        Ok(())
    }
}

/// Top-level statement of a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Statement {
    Package(Package),
    Rule(Rule),
}

impl Statement {
    pub fn location(&self) -> Option<&Location> {
        match self {
            Statement::Package(p) => p.location.as_ref(),
            Statement::Rule(r) => r.location.as_ref(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Package(p) => p.fmt(f),
            Statement::Rule(r) => r.fmt(f),
        }
    }
}
