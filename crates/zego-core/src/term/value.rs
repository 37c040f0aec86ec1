use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::{Number, Operator, Term};
use crate::keywords::is_identifier;

/// The closed set of values terms can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Boolean(bool),
    Number(Number),
    String(String),
    /// A variable name.
    Var(String),
    /// Path expression: root var (or string), then field names or index terms.
    Ref(Vec<Term>),
    /// Operator term first, operands after.
    Call(Vec<Term>),
    Op(Operator),
}

impl Value {
    /// Rank used to order values of different variants.
    pub fn sort_rank(&self) -> u8 {
        match self {
            Value::Boolean(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Var(_) => 4,
            Value::Ref(_) => 5,
            Value::Call(_) => 6,
            Value::Op(_) => 7,
        }
    }

    /// CRC-32 over the literal bytes, or an order-sensitive fold of child
    /// checksums for `Ref` and `Call`. Equal values always share a checksum.
    pub fn checksum(&self) -> u32 {
        let rank = self.sort_rank();
        match self {
            Value::Boolean(b) => literal_checksum(rank, &[u8::from(*b)]),
            Value::Number(n) => literal_checksum(rank, n.as_str().as_bytes()),
            Value::String(s) | Value::Var(s) => literal_checksum(rank, s.as_bytes()),
            Value::Op(op) => literal_checksum(rank, op.name().as_bytes()),
            Value::Ref(terms) | Value::Call(terms) => terms.iter().fold(u32::from(rank), |acc, t| {
                acc.wrapping_mul(31).wrapping_add(t.checksum())
            }),
        }
    }

    pub fn as_var(&self) -> Option<&str> {
        match self {
            Value::Var(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ref_terms(&self) -> Option<&[Term]> {
        match self {
            Value::Ref(terms) => Some(terms),
            _ => None,
        }
    }
}

fn literal_checksum(rank: u8, bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&[rank]);
    hasher.update(bytes);
    hasher.finalize()
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) | (Value::Var(a), Value::Var(b)) => a.cmp(b),
            (Value::Ref(a), Value::Ref(b)) | (Value::Call(a), Value::Call(b)) => a.cmp(b),
            (Value::Op(a), Value::Op(b)) => a.cmp(b),
            _ => self.sort_rank().cmp(&other.sort_rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.checksum());
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write_quoted(f, s),
            Value::Var(name) => f.write_str(name),
            Value::Ref(terms) => write_ref(f, terms),
            Value::Call(terms) => write_call(f, terms),
            Value::Op(op) => write!(f, "{op}"),
        }
    }
}

/// Strings render as JSON literals, which is what the parser unescapes.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

pub(crate) fn write_ref(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    let Some((head, rest)) = terms.split_first() else {
        return Ok(());
    };
    match &head.value {
        Value::String(s) => f.write_str(s)?,
        other => write!(f, "{other}")?,
    }
    for segment in rest {
        match &segment.value {
            Value::String(s) if is_identifier(s) => {
                f.write_char('.')?;
                f.write_str(s)?;
            }
            other => write!(f, "[{other}]")?,
        }
    }
    Ok(())
}

pub(crate) fn write_call(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    let Some((operator, operands)) = terms.split_first() else {
        return f.write_str("()");
    };
    write!(f, "{operator}(")?;
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{operand}")?;
    }
    f.write_char(')')
}
