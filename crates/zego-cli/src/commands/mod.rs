pub mod ast;
pub mod check;
pub mod module_loader;
pub mod query;
pub mod run_common;
pub mod tokens;
pub mod tree;

#[cfg(test)]
mod module_loader_tests;
