//! The declaration tree: namespaces, their types, and the types' members.
//!
//! [`TreeBuilder`] turns any [`crate::MetadataProvider`] into a [`DeclarationNode`] tree,
//! filtered by [`TreeOptions`]. Extension methods end up below the type they extend rather
//! than below the static class declaring them.

mod builder;
mod node;
mod options;

pub use builder::{PendingExtension, TreeBuilder};
pub use node::{DeclarationNode, NAMESPACE_MARKER, ROOT_SIGNATURE};
pub use options::TreeOptions;
