use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::{
    model::{FieldDefinition, Member, MethodDefinition, TypeDefinition, TypeKey, TypeReference},
    provider::MetadataProvider,
    render::{
        render_enum_member, render_field, render_method, render_property, render_type,
        render_type_reference,
    },
    tree::{DeclarationNode, TreeOptions, ROOT_SIGNATURE},
};

/// Name of the field holding the value of an enum instance
const ENUM_VALUE_FIELD: &str = "value__";

/// An extension method found during discovery, waiting to be attached to its receiver.
///
/// The signature is rendered when the method is found and never re-derived.
#[derive(Debug, Clone)]
pub struct PendingExtension<'a> {
    method: &'a MethodDefinition,
    receiver: &'a TypeReference,
    declaring_namespace: &'a str,
    rendered_signature: String,
}

impl<'a> PendingExtension<'a> {
    /// Defers `method` of `declaring_type` if it is an extension method with a receiver
    fn new(declaring_type: &'a TypeDefinition, method: &'a MethodDefinition) -> Option<Self> {
        Some(PendingExtension {
            method,
            receiver: method.receiver()?,
            declaring_namespace: declaring_type.namespace_key(),
            rendered_signature: render_method(method),
        })
    }

    /// The extension method
    #[must_use]
    pub fn method(&self) -> &'a MethodDefinition {
        self.method
    }

    /// Type of the method's first parameter, by-ref removed
    #[must_use]
    pub fn receiver(&self) -> &'a TypeReference {
        self.receiver
    }

    /// Signature rendered at discovery
    #[must_use]
    pub fn rendered_signature(&self) -> &str {
        &self.rendered_signature
    }

    /// Key of a receiver the provider does not declare.
    ///
    /// Each instantiation of a generic type gets its own node. Receivers built on a generic
    /// parameter belong to the namespace of the type declaring the method.
    fn unresolved_key(&self) -> TypeKey {
        let mut key = self.receiver.instantiation_key();
        if matches!(self.receiver.innermost(), TypeReference::GenericParameter(_)) {
            key.namespace = self.declaring_namespace.to_string();
        }
        key
    }
}

/// Builds the declaration tree of a module.
///
/// The first pass walks all types in provider order, grouping them into namespace nodes and
/// rendering their members. Extension methods are held back. The second pass attaches each of
/// them, in discovery order, below the node of its receiver type, creating the namespace and
/// type node when the first pass produced none. Nodes are matched by [`TypeKey`], never by
/// their rendered text.
///
/// # Examples
///
/// ```rust
/// use dotbrowse::{InMemoryModule, TreeBuilder, TreeOptions};
/// use dotbrowse::model::{MethodDefinition, TypeDefinition, TypeModifiers, TypeReference};
///
/// let mut module = InMemoryModule::new();
/// module.add_type(
///     TypeDefinition::new("Demo", "StringExtensions")
///         .with_modifiers(TypeModifiers::ABSTRACT | TypeModifiers::SEALED),
///     vec![MethodDefinition::new("Shout")
///         .as_extension()
///         .returning(TypeReference::system("String"))
///         .with_parameter("text", TypeReference::system("String"))
///         .into()],
/// );
///
/// let tree = TreeBuilder::new(&module)
///     .with_options(TreeOptions::complete())
///     .build();
///
/// let string = tree.namespace_node("System").unwrap().child("String").unwrap();
/// assert_eq!(
///     string.children()[0].signature(),
///     "public static String Shout(this String text)"
/// );
/// ```
pub struct TreeBuilder<'a, P: MetadataProvider + ?Sized> {
    provider: &'a P,
    options: TreeOptions,
}

/// Where the first pass and the synthesized nodes live below the root
#[derive(Default)]
struct NodeIndex {
    namespaces: HashMap<String, usize>,
    types: HashMap<TypeKey, (usize, usize)>,
}

impl<'a, P: MetadataProvider + ?Sized> TreeBuilder<'a, P> {
    /// A builder over `provider` with [`TreeOptions::default`]
    pub fn new(provider: &'a P) -> Self {
        TreeBuilder {
            provider,
            options: TreeOptions::default(),
        }
    }

    /// Replaces the options
    #[must_use]
    pub fn with_options(mut self, options: TreeOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the tree. Building is infallible and deterministic.
    #[must_use]
    pub fn build(&self) -> DeclarationNode {
        let mut root = DeclarationNode::new(ROOT_SIGNATURE);
        let mut index = NodeIndex::default();

        let pending = self.discover(&mut root, &mut index);

        debug!(
            "Discovered {} namespaces, {} types, {} extension methods",
            index.namespaces.len(),
            index.types.len(),
            pending.len()
        );

        for extension in &pending {
            self.attach(&mut root, &mut index, extension);
        }

        root
    }

    fn discover(
        &self,
        root: &mut DeclarationNode,
        index: &mut NodeIndex,
    ) -> Vec<PendingExtension<'a>> {
        let provider = self.provider;
        let mut pending = Vec::new();

        for ty in provider.types() {
            if !self.options.includes_type(ty) {
                trace!("Skipping type {}", ty.key());
                continue;
            }

            let namespace = namespace_index(root, index, ty.namespace_key());

            let mut node = DeclarationNode::new(render_type(ty));
            for member in provider.members(ty) {
                if !self.options.includes_member(member) {
                    continue;
                }

                if let Some(signature) = self.member_signature(ty, member, &mut pending) {
                    node.push(DeclarationNode::new(signature));
                }
            }

            let position = root.children[namespace].push(node);
            index.types.entry(ty.key()).or_insert((namespace, position));
        }

        pending
    }

    /// Renders a member, or defers it and returns `None`
    fn member_signature(
        &self,
        ty: &'a TypeDefinition,
        member: &'a Member,
        pending: &mut Vec<PendingExtension<'a>>,
    ) -> Option<String> {
        match member {
            Member::Field(field) if ty.is_enum() => enum_member(field),
            Member::Field(field) => Some(render_field(field)),
            Member::Property(property) => Some(render_property(property)),
            Member::Method(method) if method.is_extension => {
                if let Some(extension) = PendingExtension::new(ty, method) {
                    trace!("Deferring extension method {}", extension.rendered_signature);
                    pending.push(extension);
                    return None;
                }

                warn!(
                    "Extension method {}.{} has no receiver parameter",
                    ty.key(),
                    method.name
                );
                Some(render_method(method))
            }
            Member::Method(method) => Some(render_method(method)),
        }
    }

    fn attach(
        &self,
        root: &mut DeclarationNode,
        index: &mut NodeIndex,
        extension: &PendingExtension<'a>,
    ) {
        let definition = match extension.receiver {
            TypeReference::Named { .. } => self.provider.resolve(extension.receiver),
            _ => None,
        };
        let key = match definition {
            Some(definition) => definition.key(),
            None => extension.unresolved_key(),
        };

        let (namespace, position) = match index.types.get(&key) {
            Some(location) => *location,
            None => {
                let namespace = namespace_index(root, index, &key.namespace);

                let signature = match definition {
                    Some(definition) => render_type(definition),
                    None => render_type_reference(extension.receiver),
                };
                trace!("Synthesizing type node {signature} for {key}");

                let position = root.children[namespace].push(DeclarationNode::new(signature));
                index.types.insert(key, (namespace, position));
                (namespace, position)
            }
        };

        root.children[namespace].children[position]
            .push(DeclarationNode::new(extension.rendered_signature.clone()));
    }
}

/// The namespace node for `namespace`, created and appended to the root on first use
fn namespace_index(root: &mut DeclarationNode, index: &mut NodeIndex, namespace: &str) -> usize {
    if let Some(position) = index.namespaces.get(namespace) {
        return *position;
    }

    let position = root.push(DeclarationNode::namespace(namespace));
    index.namespaces.insert(namespace.to_string(), position);
    position
}

/// Enum members are shown by name; the instance field holding the value is skipped
fn enum_member(field: &FieldDefinition) -> Option<String> {
    if field.name == ENUM_VALUE_FIELD && !field.is_static() {
        return None;
    }

    Some(render_enum_member(field))
}
