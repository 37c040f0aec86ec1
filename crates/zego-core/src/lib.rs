#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the zego policy language.
//!
//! Two layers:
//! - **Terms** (`term`): the closed value set with total ordering, equality,
//!   checksums and surface-syntax rendering
//! - **AST** (`ast`): expressions, bodies, rules, packages and modules built
//!   out of terms
//!
//! Nothing here knows about tokens or grammar; the compiler crate produces
//! these structures and downstream consumers read them.

pub mod ast;
pub mod keywords;
pub mod term;

pub use ast::{Body, Expr, ExprTerms, Module, ModuleHandle, Package, Rule, Statement};
pub use term::{Location, Number, NumberError, Operator, Term, Value};

/// Name of the root document every fully qualified rule reference starts from.
pub const ROOT_DOCUMENT: &str = "zego";
