//! Namespace trees keyed by package path segments.
//!
//! ```text
//! package a.b      package a.c      module tree       rule tree
//! x := 1           y := 2
//!                                   zego              zego
//!                                     a                 a
//!                                       b (1 module)      b
//!                                       c (1 module)        x (1 rule)
//!                                                         c
//!                                                           y (1 rule)
//! ```
//!
//! Both trees start at the root document, so a fully qualified reference
//! walks them segment by segment. The root document node exists even when
//! no module was added.

use std::collections::BTreeMap;
use std::fmt;

use zego_core::{Module, ROOT_DOCUMENT, Rule, Value};

/// Trie node: children are keyed by one path segment each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    key: Option<Value>,
    payload: Vec<T>,
    children: BTreeMap<Value, TreeNode<T>>,
}

pub type ModuleTree = TreeNode<Module>;
pub type RuleTree = TreeNode<Rule>;

/// A root holding only the root document node.
impl<T> Default for TreeNode<T> {
    fn default() -> Self {
        let mut root = Self::new(None);
        root.insert_path([&Value::Var(ROOT_DOCUMENT.to_owned())]);
        root
    }
}

impl<T> TreeNode<T> {
    fn new(key: Option<Value>) -> Self {
        Self {
            key,
            payload: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Segment this node is keyed by; `None` only for the root.
    pub fn key(&self) -> Option<&Value> {
        self.key.as_ref()
    }

    pub fn payload(&self) -> &[T] {
        &self.payload
    }

    pub fn children(&self) -> impl Iterator<Item = &TreeNode<T>> {
        self.children.values()
    }

    pub fn child(&self, key: &Value) -> Option<&TreeNode<T>> {
        self.children.get(key)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Follows `path` from this node.
    pub fn get<'a>(&self, path: impl IntoIterator<Item = &'a Value>) -> Option<&TreeNode<T>> {
        path.into_iter().try_fold(self, |node, key| node.child(key))
    }

    /// Depth-first, children in key order. The root is not visited; its
    /// children are at depth 0.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &TreeNode<T>),
    {
        for child in self.children() {
            child.walk_at(0, &mut visit);
        }
    }

    fn walk_at<F>(&self, depth: usize, visit: &mut F)
    where
        F: FnMut(usize, &TreeNode<T>),
    {
        visit(depth, self);
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Creates the nodes along `path` that are not present yet.
    fn insert_path<'a>(&mut self, path: impl IntoIterator<Item = &'a Value>) -> &mut TreeNode<T> {
        path.into_iter().fold(self, |node, key| {
            node.children
                .entry(key.clone())
                .or_insert_with(|| TreeNode::new(Some(key.clone())))
        })
    }
}

impl ModuleTree {
    /// Modules land on the node of their package, in the order given.
    pub fn build<'a>(modules: impl IntoIterator<Item = &'a Module>) -> Self {
        let root_document = Value::Var(ROOT_DOCUMENT.to_owned());
        let mut root = Self::default();
        for module in modules {
            let path = std::iter::once(&root_document).chain(module.package.segments());
            root.insert_path(path).payload.push(module.clone());
        }
        root
    }
}

impl RuleTree {
    /// Rules land one level below their package, keyed by rule name.
    /// Packages without rules still get their node.
    pub fn build<'a>(modules: impl IntoIterator<Item = &'a Module>) -> Self {
        let root_document = Value::Var(ROOT_DOCUMENT.to_owned());
        let mut root = Self::default();
        for module in modules {
            let path = std::iter::once(&root_document).chain(module.package.segments());
            let package = root.insert_path(path);
            for rule in &module.rules {
                let name = Value::String(rule.name.clone());
                package.insert_path([&name]).payload.push(rule.clone());
            }
        }
        root
    }
}

impl fmt::Display for ModuleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self, "module")
    }
}

impl fmt::Display for RuleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self, "rule")
    }
}

fn write_tree<T>(f: &mut fmt::Formatter<'_>, tree: &TreeNode<T>, noun: &str) -> fmt::Result {
    let mut result = Ok(());
    let mut first = true;
    tree.walk(|depth, node| {
        if result.is_err() {
            return;
        }
        result = write_node(f, node, depth, noun, first);
        first = false;
    });
    result
}

fn write_node<T>(
    f: &mut fmt::Formatter<'_>,
    node: &TreeNode<T>,
    depth: usize,
    noun: &str,
    first: bool,
) -> fmt::Result {
    if !first {
        f.write_str("\n")?;
    }
    write!(f, "{:indent$}", "", indent = depth * 2)?;
    match node.key() {
        Some(Value::String(segment)) => f.write_str(segment)?,
        Some(other) => write!(f, "{other}")?,
        None => {}
    }
    match node.payload.len() {
        0 => Ok(()),
        1 => write!(f, " (1 {noun})"),
        n => write!(f, " ({n} {noun}s)"),
    }
}
