use std::fmt;

use serde::Serialize;

/// Marker in front of the name of every namespace node
pub const NAMESPACE_MARKER: &str = "{}";

/// Signature of the root node
pub const ROOT_SIGNATURE: &str = "Root";

/// A node of the declaration tree.
///
/// The root node is signed [`ROOT_SIGNATURE`] and holds one node per namespace, each signed
/// `{} <namespace>`. Namespace nodes hold type nodes, and type nodes hold member nodes. Children
/// keep the order they were discovered in.
///
/// A finished tree is read-only. [`fmt::Display`] prints it indented by two spaces per level;
/// with `serde` it serializes as nested `{ "signature", "children" }` objects.
///
/// ```rust
/// use dotbrowse::{InMemoryModule, TreeBuilder};
/// use dotbrowse::model::TypeDefinition;
///
/// let mut module = InMemoryModule::new();
/// module.add_type(TypeDefinition::new("Demo", "Widget"), Vec::new());
///
/// let tree = TreeBuilder::new(&module).build();
/// assert_eq!(tree.to_string(), "Root\n  {} Demo\n    public class Widget\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeclarationNode {
    pub(super) signature: String,
    pub(super) children: Vec<DeclarationNode>,
}

impl DeclarationNode {
    pub(super) fn new(signature: impl Into<String>) -> Self {
        DeclarationNode {
            signature: signature.into(),
            children: Vec::new(),
        }
    }

    pub(super) fn namespace(name: &str) -> Self {
        Self::new(format!("{NAMESPACE_MARKER} {name}"))
    }

    /// Appends `child` and returns its index
    pub(super) fn push(&mut self, child: DeclarationNode) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// The rendered declaration
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Direct children in discovery order
    #[must_use]
    pub fn children(&self) -> &[DeclarationNode] {
        &self.children
    }

    /// True if the node has no children
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The first direct child signed `signature`
    #[must_use]
    pub fn child(&self, signature: &str) -> Option<&DeclarationNode> {
        self.children
            .iter()
            .find(|child| child.signature == signature)
    }

    /// The namespace node for `name` among the direct children; `""` finds the global namespace
    #[must_use]
    pub fn namespace_node(&self, name: &str) -> Option<&DeclarationNode> {
        self.children.iter().find(|child| {
            child
                .signature
                .strip_prefix(NAMESPACE_MARKER)
                .and_then(|rest| rest.strip_prefix(' '))
                == Some(name)
        })
    }

    /// If this is a namespace node, the namespace it stands for
    #[must_use]
    pub fn namespace_name(&self) -> Option<&str> {
        self.signature
            .strip_prefix(NAMESPACE_MARKER)?
            .strip_prefix(' ')
    }

    /// Number of nodes below this one
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.signature, indent = depth * 2)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for DeclarationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
