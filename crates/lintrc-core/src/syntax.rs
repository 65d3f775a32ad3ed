//! Tool-neutral syntax-tree node model for selector matching.
//!
//! The parser producing these nodes is an external collaborator; this
//! module only defines the shape selectors evaluate against. A node has a
//! kind and named fields; fields hold scalars, child nodes, or node lists.

use std::collections::BTreeMap;

/// A field value on a [`SyntaxNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// String scalar (identifier names, literal text).
    Str(String),
    /// Integer scalar.
    Num(i64),
    /// Boolean scalar.
    Bool(bool),
    /// Single child node.
    Node(Box<SyntaxNode>),
    /// Ordered list of child nodes (e.g. call arguments).
    List(Vec<SyntaxNode>),
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

impl From<bool> for NodeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<SyntaxNode> for NodeValue {
    fn from(value: SyntaxNode) -> Self {
        Self::Node(Box::new(value))
    }
}

impl From<Vec<SyntaxNode>> for NodeValue {
    fn from(value: Vec<SyntaxNode>) -> Self {
        Self::List(value)
    }
}

/// One syntax-tree node: a kind plus named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    kind: String,
    fields: BTreeMap<String, NodeValue>,
}

impl SyntaxNode {
    /// Creates a node of the given kind with no fields.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field to this node.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the node kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns a field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&NodeValue> {
        self.fields.get(name)
    }

    /// Resolves a dotted field path against this node.
    ///
    /// Path semantics:
    /// - on a node, `type` resolves to the node's kind; any other segment
    ///   looks up the field of that name;
    /// - on a list, `length` resolves to the element count and a numeric
    ///   segment indexes into the list;
    /// - scalars terminate resolution.
    ///
    /// Returns `None` if any segment fails to resolve.
    #[must_use]
    pub fn resolve(&self, path: &[String]) -> Option<Resolved<'_>> {
        let mut current = Resolved::Node(self);
        for segment in path {
            current = current.step(segment)?;
        }
        Some(current)
    }
}

/// A value reached by resolving a field path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    /// Resolved to a string scalar.
    Str(&'a str),
    /// Resolved to an integer scalar (possibly synthesized, as `length`).
    Num(i64),
    /// Resolved to a boolean scalar.
    Bool(bool),
    /// Resolved to a node.
    Node(&'a SyntaxNode),
    /// Resolved to a node list.
    List(&'a [SyntaxNode]),
}

impl<'a> Resolved<'a> {
    fn step(self, segment: &str) -> Option<Resolved<'a>> {
        match self {
            Resolved::Node(node) => {
                if segment == "type" {
                    return Some(Resolved::Str(node.kind()));
                }
                node.field(segment).map(|value| match value {
                    NodeValue::Str(s) => Resolved::Str(s),
                    NodeValue::Num(n) => Resolved::Num(*n),
                    NodeValue::Bool(b) => Resolved::Bool(*b),
                    NodeValue::Node(n) => Resolved::Node(n),
                    NodeValue::List(items) => Resolved::List(items),
                })
            }
            Resolved::List(items) => {
                if segment == "length" {
                    return Some(Resolved::Num(i64::try_from(items.len()).ok()?));
                }
                let index: usize = segment.parse().ok()?;
                items.get(index).map(Resolved::Node)
            }
            Resolved::Str(_) | Resolved::Num(_) | Resolved::Bool(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> Vec<String> {
        p.split('.').map(String::from).collect()
    }

    /// `assert.throws(fn)` as a call node.
    fn call_node(args: Vec<SyntaxNode>) -> SyntaxNode {
        SyntaxNode::new("CallExpression")
            .with_field(
                "callee",
                SyntaxNode::new("MemberExpression")
                    .with_field("object", SyntaxNode::new("Identifier").with_field("name", "assert"))
                    .with_field(
                        "property",
                        SyntaxNode::new("Identifier").with_field("name", "throws"),
                    ),
            )
            .with_field("arguments", args)
    }

    #[test]
    fn resolves_nested_field_path() {
        let node = call_node(vec![]);
        assert_eq!(
            node.resolve(&path("callee.object.name")),
            Some(Resolved::Str("assert"))
        );
        assert_eq!(
            node.resolve(&path("callee.property.name")),
            Some(Resolved::Str("throws"))
        );
    }

    #[test]
    fn resolves_type_to_kind() {
        let node = call_node(vec![SyntaxNode::new("Literal")]);
        assert_eq!(node.resolve(&path("type")), Some(Resolved::Str("CallExpression")));
        assert_eq!(
            node.resolve(&path("arguments.0.type")),
            Some(Resolved::Str("Literal"))
        );
    }

    #[test]
    fn resolves_list_length_and_index() {
        let node = call_node(vec![SyntaxNode::new("Identifier"), SyntaxNode::new("Literal")]);
        assert_eq!(node.resolve(&path("arguments.length")), Some(Resolved::Num(2)));
        assert!(matches!(
            node.resolve(&path("arguments.1")),
            Some(Resolved::Node(n)) if n.kind() == "Literal"
        ));
    }

    #[test]
    fn missing_segment_resolves_to_none() {
        let node = call_node(vec![]);
        assert_eq!(node.resolve(&path("callee.missing")), None);
        assert_eq!(node.resolve(&path("arguments.0")), None);
        assert_eq!(node.resolve(&path("arguments.0.regex")), None);
    }

    #[test]
    fn scalar_terminates_resolution() {
        let node = SyntaxNode::new("Identifier").with_field("name", "assert");
        assert_eq!(node.resolve(&path("name.length")), None);
    }
}
