//! Structural AST nodes.
//!
//! Every type and rule serializes to a `Node` tree. Two structurally equal
//! definitions always produce equal trees, so a tree (or its JSON rendering)
//! works as an equality or cache key.

use crate::{Meta, Value};
use serde::{Deserialize, Serialize};

/// A node in the structural representation of a type or rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// A named node with ordered children, e.g. `constrained[type, rule, meta]`.
    Branch { kind: String, children: Vec<Node> },
    /// A literal leaf (predicate arguments, primitive names).
    Value(Value),
    /// A metadata leaf.
    Map(Meta),
}

impl Node {
    /// Create a branch node.
    pub fn branch(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Branch {
            kind: kind.into(),
            children,
        }
    }

    /// Create a literal leaf.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Create a metadata leaf.
    pub fn map(meta: Meta) -> Self {
        Self::Map(meta)
    }

    /// The empty metadata leaf used when metadata is excluded.
    pub fn empty_map() -> Self {
        Self::Map(Meta::new())
    }

    /// Kind of a branch node, `None` for leaves.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Node::Branch { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Children of a branch node; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Branch { children, .. } => children,
            _ => &[],
        }
    }

    /// Render as compact JSON, suitable as a cache key.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
