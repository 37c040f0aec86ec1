//! Term value model.
//!
//! [`Value`] is the closed set of variants every AST node is built from;
//! [`Term`] pairs a value with the place in the source it came from.
//! Comparison, equality, hashing and rendering all ignore locations.

mod number;
mod operator;
mod value;

#[cfg(test)]
mod value_tests;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;

pub use number::{MAX_EXPONENT, Number, NumberError};
pub use operator::Operator;
pub use value::Value;

pub(crate) use value::{write_call, write_ref};

/// Position of a term in its source file.
///
/// `line` and `column` are 1-based, the column counted in characters.
/// `offset` and `len` are byte positions used to underline source snippets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Option<Arc<str>>,
    pub line: u32,
    pub column: u32,
    pub offset: u32,
    pub len: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            ..Self::default()
        }
    }

    pub fn with_file(mut self, file: impl Into<Arc<str>>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_span(mut self, offset: u32, len: u32) -> Self {
        self.offset = offset;
        self.len = len;
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) if !file.is_empty() => write!(f, "{}:{}:{}", file, self.line, self.column),
            _ => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// A value together with its (optional) source location.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Term {
    pub value: Value,
    #[serde(skip)]
    pub location: Option<Location>,
}

impl Term {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            location: None,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(Value::Boolean(value))
    }

    pub fn number(value: Number) -> Self {
        Self::new(Value::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Value::String(value.into()))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(Value::Var(name.into()))
    }

    pub fn reference(terms: Vec<Term>) -> Self {
        Self::new(Value::Ref(terms))
    }

    pub fn call(terms: Vec<Term>) -> Self {
        Self::new(Value::Call(terms))
    }

    pub fn op(operator: Operator) -> Self {
        Self::new(Value::Op(operator))
    }

    /// Checksum of the value; see [`Value::checksum`].
    pub fn checksum(&self) -> u32 {
        self.value.checksum()
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Term {}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
