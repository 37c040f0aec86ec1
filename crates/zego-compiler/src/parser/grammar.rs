//! Grammar productions.
//!
//! Productions are entered on a significant token and return `None` once an
//! error has been reported. Reference suffixes (`.field`, `[index]`,
//! `(args)`) only continue a reference when they follow it directly, with no
//! whitespace in between.

use tracing::debug;
use zego_core::{Body, Expr, Number, NumberError, Operator, Package, Rule, Statement, Term, Value};

use super::core::Parser;
use crate::diagnostics::DiagnosticKind;
use crate::lexer::{TokenKind, token_sets};

/// Binding power of the loosest binary operators (comparisons).
const LOWEST_PRECEDENCE: u8 = 1;

impl Parser<'_> {
    pub(super) fn parse_statements(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            let statement = match self.current() {
                TokenKind::Eof => break,
                TokenKind::KwPackage => self.package().map(Statement::Package),
                TokenKind::Identifier => self.rule().map(Statement::Rule),
                _ => self.unexpected(),
            };
            let Some(statement) = statement else {
                break;
            };
            debug!(file = ?self.file, %statement, "parsed statement");
            statements.push(statement);
        }
        statements
    }

    /// `package a.b["c"]`; every path segment must be a string.
    fn package(&mut self) -> Option<Package> {
        let location = self.location();
        self.bump();
        self.expect_identifier()?;

        let head = Term::string(self.text()).at(self.location());
        self.bump();
        let segments = match self.ref_suffix(head)? {
            Term {
                value: Value::Ref(terms),
                ..
            } => terms,
            other => vec![other],
        };

        if let Some(bad) = segments
            .iter()
            .find(|t| !matches!(t.value, Value::String(_)))
        {
            let detail = bad.to_string();
            let at = bad.location.clone().unwrap_or_else(|| location.clone());
            return self.error_at(DiagnosticKind::InvalidPackagePath, Some(&detail), at);
        }

        Some(Package::new(segments).at(Some(location)))
    }

    /// `name := value` with an optional `{ body }`.
    fn rule(&mut self) -> Option<Rule> {
        let location = self.location();
        let name = self.text().to_owned();
        self.bump();
        self.expect(TokenKind::Declare, DiagnosticKind::ExpectedDeclare)?;

        let value = self.relation()?;
        let body = if self.eat(TokenKind::BraceOpen) {
            let body = self.query(TokenKind::BraceClose)?;
            self.bump();
            body
        } else {
            Body::default()
        };

        Some(Rule::new(name, Some(value), body).at(Some(location)))
    }

    /// One or more expressions up to (not including) `end`.
    pub(super) fn query(&mut self, end: TokenKind) -> Option<Body> {
        if self.at(end) {
            return self.error(DiagnosticKind::EmptyBody, None);
        }
        let mut body = Body::default();
        while !self.at(end) {
            body.push(self.expr()?);
        }
        Some(body)
    }

    fn expr(&mut self) -> Option<Expr> {
        let lhs = self.relation()?;
        if !self.at(TokenKind::Declare) {
            return Some(Expr::term(lhs));
        }
        let operator = Term::op(Operator::Declare).at(self.location());
        self.bump();
        let rhs = self.relation()?;
        Some(Expr::declaration(operator, lhs, rhs))
    }

    pub(super) fn relation(&mut self) -> Option<Term> {
        self.binary(LOWEST_PRECEDENCE)
    }

    /// Precedence climbing: operands bind operators of at least `min_precedence`,
    /// equal precedence associates to the left.
    fn binary(&mut self, min_precedence: u8) -> Option<Term> {
        self.enter_recursion()?;
        let result = self.binary_operands(min_precedence);
        self.exit_recursion();
        result
    }

    fn binary_operands(&mut self, min_precedence: u8) -> Option<Term> {
        let mut lhs = self.term()?;
        while let Some((operator, precedence)) = binary_operator(self.current()) {
            if precedence < min_precedence {
                break;
            }
            let op = Term::op(operator).at(self.location());
            self.bump();
            let rhs = self.binary(precedence + 1)?;
            let location = lhs.location.clone();
            lhs = Term {
                location,
                ..Term::call(vec![op, lhs, rhs])
            };
        }
        Some(lhs)
    }

    fn term(&mut self) -> Option<Term> {
        let kind = self.current();
        let location = self.location();
        match kind {
            TokenKind::KwTrue | TokenKind::KwFalse => {
                self.bump();
                Some(Term::boolean(kind == TokenKind::KwTrue).at(location))
            }
            TokenKind::StringLiteral => {
                let text = self.text().to_owned();
                let Ok(value) = serde_json::from_str::<String>(&text) else {
                    return self.error(DiagnosticKind::InvalidString, Some(&text));
                };
                self.bump();
                Some(Term::string(value).at(location))
            }
            TokenKind::RawString => {
                let text = self.text();
                let value = text[1..text.len() - 1].to_owned();
                self.bump();
                Some(Term::string(value).at(location))
            }
            TokenKind::Number => {
                let number = match Number::parse(self.text()) {
                    Ok(number) => number,
                    Err(NumberError::TooBig) => {
                        return self.error(DiagnosticKind::NumberTooBig, None);
                    }
                    Err(NumberError::Invalid) => {
                        return self.error(DiagnosticKind::InvalidNumber, None);
                    }
                };
                self.bump();
                Some(Term::number(number).at(location))
            }
            TokenKind::Identifier => {
                let head = Term::var(self.text()).at(location);
                self.bump();
                self.ref_suffix(head)
            }
            TokenKind::ParenOpen => {
                self.bump();
                let inner = self.relation()?;
                self.expect(TokenKind::ParenClose, DiagnosticKind::UnclosedParen)?;
                self.ref_suffix(inner)
            }
            _ => self.unexpected(),
        }
    }

    /// Chains `.field`, `[index]` and `(args)` onto `head`.
    fn ref_suffix(&mut self, head: Term) -> Option<Term> {
        let mut path = vec![head];
        while token_sets::REF_SUFFIX.contains(self.raw()) {
            match self.raw() {
                TokenKind::Field => {
                    let field = Term::string(&self.text()[1..]).at(self.location());
                    path.push(field);
                    self.bump();
                }
                TokenKind::BracketOpen => {
                    self.bump();
                    let index = self.relation()?;
                    self.expect(TokenKind::BracketClose, DiagnosticKind::UnclosedBracket)?;
                    path.push(index);
                }
                _ => {
                    let call = self.call(path)?;
                    path = vec![call];
                }
            }
        }
        Some(into_ref(path))
    }

    /// `(a, b, ...)` applied to the reference built so far. A trailing comma is allowed.
    fn call(&mut self, path: Vec<Term>) -> Option<Term> {
        let location = path.first().and_then(|t| t.location.clone());
        let operator = Term {
            location: location.clone(),
            ..Term::reference(path)
        };
        let mut terms = vec![operator];

        self.bump();
        if !self.eat(TokenKind::ParenClose) {
            loop {
                terms.push(self.relation()?);
                if self.eat(TokenKind::ParenClose) {
                    break;
                }
                if self.eat(TokenKind::Comma) {
                    if self.eat(TokenKind::ParenClose) {
                        break;
                    }
                    continue;
                }
                if self.raw() == TokenKind::Illegal {
                    return self.unexpected();
                }
                return self.error(DiagnosticKind::ExpectedArgumentSeparator, None);
            }
        }

        Some(Term {
            location,
            ..Term::call(terms)
        })
    }

    fn expect_identifier(&mut self) -> Option<()> {
        match self.current() {
            TokenKind::Identifier => Some(()),
            TokenKind::Illegal => self.unexpected(),
            _ => self.error(DiagnosticKind::ExpectedIdentifier, None),
        }
    }
}

/// A lone head stays as is; anything longer becomes a `Ref` located at its head.
fn into_ref(path: Vec<Term>) -> Term {
    match <[Term; 1]>::try_from(path) {
        Ok([single]) => single,
        Err(path) => Term {
            location: path.first().and_then(|t| t.location.clone()),
            ..Term::reference(path)
        },
    }
}

fn binary_operator(kind: TokenKind) -> Option<(Operator, u8)> {
    let entry = match kind {
        TokenKind::Star => (Operator::Multiply, 5),
        TokenKind::Slash => (Operator::Divide, 5),
        TokenKind::Percent => (Operator::Modulus, 5),
        TokenKind::Plus => (Operator::Add, 4),
        TokenKind::Minus => (Operator::Subtract, 4),
        TokenKind::Ampersand => (Operator::And, 3),
        TokenKind::Pipe => (Operator::Or, 2),
        TokenKind::EqEq => (Operator::Equal, LOWEST_PRECEDENCE),
        TokenKind::NotEq => (Operator::NotEqual, LOWEST_PRECEDENCE),
        TokenKind::Lt => (Operator::Lt, LOWEST_PRECEDENCE),
        TokenKind::Gt => (Operator::Gt, LOWEST_PRECEDENCE),
        TokenKind::LtEq => (Operator::Lte, LOWEST_PRECEDENCE),
        TokenKind::GtEq => (Operator::Gte, LOWEST_PRECEDENCE),
        _ => return None,
    };
    Some(entry)
}
