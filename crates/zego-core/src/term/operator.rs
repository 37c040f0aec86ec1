use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// Bare operator symbol heading a [`Value::Call`](super::Value::Call).
///
/// Infix operators of the surface syntax and the `:=` declaration are all
/// lowered to calls headed by one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Declare,
    Multiply,
    Divide,
    Modulus,
    Add,
    Subtract,
    And,
    Or,
    Equal,
    NotEqual,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl Operator {
    pub const ALL: [Operator; 14] = [
        Operator::Declare,
        Operator::Multiply,
        Operator::Divide,
        Operator::Modulus,
        Operator::Add,
        Operator::Subtract,
        Operator::And,
        Operator::Or,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Lt,
        Operator::Gt,
        Operator::Lte,
        Operator::Gte,
    ];

    /// Name used when the operator is rendered as a call head.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Declare => "declare",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
            Operator::Modulus => "modulus",
            Operator::Add => "add",
            Operator::Subtract => "minus",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Equal => "equal",
            Operator::NotEqual => "nEqual",
            Operator::Lt => "lt",
            Operator::Gt => "gt",
            Operator::Lte => "lte",
            Operator::Gte => "gte",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

// Ordered by rendered name, not by declaration order.
impl Ord for Operator {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name().cmp(other.name())
    }
}

impl PartialOrd for Operator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
