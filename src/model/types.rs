use std::fmt;

use crate::{
    metadata::token::Token,
    model::{GenericParamFlags, TypeModifiers, TypeVisibility},
};

/// Value types of `System` the runtime treats as primitives
const PRIMITIVES: &[&str] = &[
    "Boolean", "Char", "SByte", "Byte", "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64",
    "IntPtr", "UIntPtr", "Single", "Double",
];

/// Structural identity of a type: its namespace and its full nested name.
///
/// Nested types join the names of their enclosing types with `+`, e.g. `Outer+Inner`, and
/// keep the metadata name including any arity suffix. A type without a namespace uses the empty
/// string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey {
    /// Namespace, empty for the global namespace
    pub namespace: String,
    /// Nested path and metadata name
    pub name: String,
}

impl TypeKey {
    /// Creates a key from a namespace and a (possibly nested) name
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeKey {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    fn qualify(namespace: Option<&str>, declaring_type: Option<&str>, name: &str) -> Self {
        TypeKey {
            namespace: namespace.unwrap_or_default().to_string(),
            name: match declaring_type {
                Some(outer) => format!("{outer}+{name}"),
                None => name.to_string(),
            },
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

/// A reference to a type from a signature, a base type list or a constraint.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeReference {
    /// A named type, possibly instantiated with generic arguments
    Named {
        /// Namespace, `None` for the global namespace
        namespace: Option<String>,
        /// Metadata name, including the arity suffix of generic types
        name: String,
        /// `+` separated path of enclosing types for nested types
        declaring_type: Option<String>,
        /// Generic arguments, empty unless this is an instantiation
        generic_arguments: Vec<TypeReference>,
    },
    /// A generic parameter of the enclosing type or method
    GenericParameter(String),
    /// An array of `element` with `rank` dimensions
    Array {
        /// Element type
        element: Box<TypeReference>,
        /// Number of dimensions, 1 for vectors
        rank: u32,
    },
    /// A managed reference, `ref` / `out` parameters
    ByRef(Box<TypeReference>),
    /// An unmanaged pointer
    Pointer(Box<TypeReference>),
}

impl TypeReference {
    /// A top-level named type; an empty `namespace` means the global namespace
    #[must_use]
    pub fn named(namespace: &str, name: &str) -> Self {
        TypeReference::Named {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            name: name.to_string(),
            declaring_type: None,
            generic_arguments: Vec::new(),
        }
    }

    /// A type of the `System` namespace, e.g. `system("Int32")`
    #[must_use]
    pub fn system(name: &str) -> Self {
        Self::named("System", name)
    }

    /// A type nested in `declaring_type`, a `+` separated path
    #[must_use]
    pub fn nested(namespace: &str, declaring_type: &str, name: &str) -> Self {
        TypeReference::Named {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            name: name.to_string(),
            declaring_type: Some(declaring_type.to_string()),
            generic_arguments: Vec::new(),
        }
    }

    /// A reference to the generic parameter `name`
    #[must_use]
    pub fn generic_parameter(name: &str) -> Self {
        TypeReference::GenericParameter(name.to_string())
    }

    /// A single dimensional array of `element`
    #[must_use]
    pub fn array(element: TypeReference) -> Self {
        TypeReference::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// A managed reference to `element`
    #[must_use]
    pub fn by_ref(element: TypeReference) -> Self {
        TypeReference::ByRef(Box::new(element))
    }

    /// Replaces the generic arguments of a named type; other references are returned unchanged
    #[must_use]
    pub fn with_generic_arguments(mut self, arguments: Vec<TypeReference>) -> Self {
        if let TypeReference::Named {
            generic_arguments, ..
        } = &mut self
        {
            *generic_arguments = arguments;
        }
        self
    }

    /// The reference with a by-ref wrapper removed
    #[must_use]
    pub fn strip_by_ref(&self) -> &TypeReference {
        match self {
            TypeReference::ByRef(element) => element,
            other => other,
        }
    }

    /// True for the named type `System.<name>`
    #[must_use]
    pub fn is_system(&self, expected: &str) -> bool {
        matches!(
            self,
            TypeReference::Named { namespace: Some(namespace), name, declaring_type: None, .. }
                if namespace == "System" && name == expected
        )
    }

    /// Structural identity of the referenced type.
    ///
    /// Generic arguments don't contribute, so `List<Int32>` and `List<T>` share the key of
    /// ``List`1``. Arrays, pointers and references extend the key of their element with the
    /// suffix `[]`, `*` or `&`; generic parameters live in the global namespace under their name.
    #[must_use]
    pub fn key(&self) -> TypeKey {
        self.build_key(false)
    }

    /// Identity of this exact instantiation.
    ///
    /// Like [`TypeReference::key`], with the generic arguments spelled out after the name, so
    /// `List<Int32>` keys to ``List`1<System.Int32>`` and `List<String>` to
    /// ``List`1<System.String>``.
    #[must_use]
    pub fn instantiation_key(&self) -> TypeKey {
        self.build_key(true)
    }

    /// The type below all array, pointer and reference wrappers
    #[must_use]
    pub fn innermost(&self) -> &TypeReference {
        match self {
            TypeReference::Array { element, .. }
            | TypeReference::ByRef(element)
            | TypeReference::Pointer(element) => element.innermost(),
            other => other,
        }
    }

    fn build_key(&self, instantiated: bool) -> TypeKey {
        match self {
            TypeReference::Named {
                namespace,
                name,
                declaring_type,
                generic_arguments,
            } => {
                let mut key =
                    TypeKey::qualify(namespace.as_deref(), declaring_type.as_deref(), name);
                if instantiated && !generic_arguments.is_empty() {
                    let arguments: Vec<String> = generic_arguments
                        .iter()
                        .map(|argument| argument.build_key(true).to_string())
                        .collect();
                    key.name = format!("{}<{}>", key.name, arguments.join(","));
                }
                key
            }
            TypeReference::GenericParameter(name) => TypeKey::new("", name.clone()),
            TypeReference::Array { element, rank } => {
                let mut key = element.build_key(instantiated);
                key.name.push('[');
                for _ in 1..*rank {
                    key.name.push(',');
                }
                key.name.push(']');
                key
            }
            TypeReference::ByRef(element) => {
                let mut key = element.build_key(instantiated);
                key.name.push('&');
                key
            }
            TypeReference::Pointer(element) => {
                let mut key = element.build_key(instantiated);
                key.name.push('*');
                key
            }
        }
    }
}

/// A generic parameter declared by a type or method
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericParameter {
    /// Declared name, e.g. `T`
    pub name: String,
    /// Variance and special constraints
    pub flags: GenericParamFlags,
    /// Constraint types in declaration order
    pub constraints: Vec<TypeReference>,
}

impl GenericParameter {
    /// An unconstrained parameter
    pub fn new(name: impl Into<String>) -> Self {
        GenericParameter {
            name: name.into(),
            flags: GenericParamFlags::empty(),
            constraints: Vec::new(),
        }
    }

    /// Adds special constraint flags
    #[must_use]
    pub fn with_flags(mut self, flags: GenericParamFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Adds a constraint type
    #[must_use]
    pub fn with_constraint(mut self, constraint: TypeReference) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// True if the parameter carries constraint types or special constraints
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        !self.constraints.is_empty() || self.flags.has_special_constraints()
    }
}

/// A type declared in a module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDefinition {
    /// `TypeDef` token, null for synthetic types that have not been added to a module yet
    pub token: Token,
    /// Namespace, `None` for the global namespace
    pub namespace: Option<String>,
    /// Metadata name, including the arity suffix of generic types
    pub name: String,
    /// `+` separated path of enclosing types for nested types
    pub declaring_type: Option<String>,
    /// Visibility
    pub visibility: TypeVisibility,
    /// Semantics and modifiers
    pub modifiers: TypeModifiers,
    /// The type extended, `None` for interfaces and `System.Object`
    pub base_type: Option<TypeReference>,
    /// Implemented interfaces in declaration order
    pub interfaces: Vec<TypeReference>,
    /// Generic parameters in declaration order
    pub generic_parameters: Vec<GenericParameter>,
}

impl TypeDefinition {
    /// A public class deriving from `System.Object`, without a token
    pub fn new(namespace: &str, name: impl Into<String>) -> Self {
        TypeDefinition {
            token: Token::default(),
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            name: name.into(),
            declaring_type: None,
            visibility: TypeVisibility::PUBLIC,
            modifiers: TypeModifiers::empty(),
            base_type: Some(TypeReference::system("Object")),
            interfaces: Vec::new(),
            generic_parameters: Vec::new(),
        }
    }

    /// Nests this type into `declaring_type`, a `+` separated path
    #[must_use]
    pub fn nested_in(mut self, declaring_type: &str) -> Self {
        self.declaring_type = Some(declaring_type.to_string());
        self
    }

    /// Sets the visibility
    #[must_use]
    pub fn with_visibility(mut self, visibility: TypeVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Adds modifiers
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: TypeModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Replaces the base type
    #[must_use]
    pub fn with_base_type(mut self, base_type: Option<TypeReference>) -> Self {
        self.base_type = base_type;
        self
    }

    /// Adds an implemented interface
    #[must_use]
    pub fn with_interface(mut self, interface: TypeReference) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Adds a generic parameter
    #[must_use]
    pub fn with_generic_parameter(mut self, parameter: GenericParameter) -> Self {
        self.generic_parameters.push(parameter);
        self
    }

    /// Namespace, empty for the global namespace
    #[must_use]
    pub fn namespace_key(&self) -> &str {
        self.namespace.as_deref().unwrap_or_default()
    }

    /// Structural identity of this type
    #[must_use]
    pub fn key(&self) -> TypeKey {
        TypeKey::qualify(
            self.namespace.as_deref(),
            self.declaring_type.as_deref(),
            &self.name,
        )
    }

    /// A reference to this type, with its own generic parameters as arguments
    #[must_use]
    pub fn to_reference(&self) -> TypeReference {
        TypeReference::Named {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            declaring_type: self.declaring_type.clone(),
            generic_arguments: self
                .generic_parameters
                .iter()
                .map(|parameter| TypeReference::GenericParameter(parameter.name.clone()))
                .collect(),
        }
    }

    fn is_system(&self, expected: &str) -> bool {
        self.namespace.as_deref() == Some("System")
            && self.declaring_type.is_none()
            && self.name == expected
    }

    /// True for interfaces
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.modifiers.contains(TypeModifiers::INTERFACE)
    }

    /// True for enums, i.e. types extending `System.Enum`
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.base_type
            .as_ref()
            .is_some_and(|base| base.is_system("Enum"))
    }

    /// True for structs, enums and primitives
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        if self.is_system("Enum") {
            return false;
        }

        self.base_type
            .as_ref()
            .is_some_and(|base| base.is_system("ValueType") || base.is_system("Enum"))
    }

    /// True for the primitive value types of `System`, such as `Int32` or `Boolean`
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.is_value_type()
            && self.namespace.as_deref() == Some("System")
            && self.declaring_type.is_none()
            && PRIMITIVES.contains(&self.name.as_str())
    }

    /// True for reference types that are not interfaces
    #[must_use]
    pub fn is_class(&self) -> bool {
        !self.is_interface() && !self.is_value_type()
    }

    /// True if the type is abstract
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(TypeModifiers::ABSTRACT)
    }

    /// True if the type can't be derived from
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.modifiers.contains(TypeModifiers::SEALED)
    }

    /// True if the type declares generic parameters
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }

    /// True for names the compiler invents, e.g. `<>c` or `<PrivateImplementationDetails>`
    #[must_use]
    pub fn is_compiler_generated(&self) -> bool {
        self.name.starts_with('<')
    }

    /// True for `public` top-level and nested types
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility == TypeVisibility::PUBLIC
            || self.visibility == TypeVisibility::NESTED_PUBLIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys() {
        let list = TypeReference::named("System.Collections.Generic", "List`1")
            .with_generic_arguments(vec![TypeReference::system("Int32")]);
        assert_eq!(
            list.key(),
            TypeKey::new("System.Collections.Generic", "List`1")
        );

        let nested = TypeReference::nested("Outer.Space", "Outer", "Inner");
        assert_eq!(nested.key(), TypeKey::new("Outer.Space", "Outer+Inner"));
        assert_eq!(nested.key().to_string(), "Outer.Space.Outer+Inner");

        let matrix = TypeReference::Array {
            element: Box::new(TypeReference::system("Int32")),
            rank: 2,
        };
        assert_eq!(matrix.key(), TypeKey::new("System", "Int32[,]"));
        assert_eq!(
            TypeReference::generic_parameter("T").key(),
            TypeKey::new("", "T")
        );
    }

    #[test]
    fn definition_key_matches_reference() {
        let definition = TypeDefinition::new("", "Helpers").nested_in("Outer");
        assert_eq!(
            definition.key(),
            TypeReference::nested("", "Outer", "Helpers").key()
        );
        assert_eq!(definition.namespace_key(), "");
    }

    #[test]
    fn instantiation_keys() {
        let list = |argument: TypeReference| {
            TypeReference::named("System.Collections.Generic", "List`1")
                .with_generic_arguments(vec![argument])
        };
        let ints = list(TypeReference::system("Int32"));
        let strings = list(TypeReference::system("String"));

        assert_eq!(ints.key(), strings.key());
        assert_ne!(ints.instantiation_key(), strings.instantiation_key());
        assert_eq!(
            ints.instantiation_key(),
            TypeKey::new("System.Collections.Generic", "List`1<System.Int32>")
        );

        let jagged = TypeReference::array(list(list(TypeReference::system("Int32"))));
        assert_eq!(
            jagged.instantiation_key().name,
            "List`1<System.Collections.Generic.List`1<System.Int32>>[]"
        );
        assert_eq!(jagged.innermost(), &list(list(TypeReference::system("Int32"))));

        let plain = TypeReference::system("String");
        assert_eq!(plain.instantiation_key(), plain.key());
    }

    #[test]
    fn classification() {
        let class = TypeDefinition::new("Test", "Widget");
        assert!(class.is_class());
        assert!(!class.is_value_type());

        let interface = TypeDefinition::new("Test", "IWidget")
            .with_modifiers(TypeModifiers::INTERFACE | TypeModifiers::ABSTRACT)
            .with_base_type(None);
        assert!(interface.is_interface());
        assert!(!interface.is_class());

        let color = TypeDefinition::new("Test", "Color")
            .with_base_type(Some(TypeReference::system("Enum")))
            .with_modifiers(TypeModifiers::SEALED);
        assert!(color.is_enum());
        assert!(color.is_value_type());
        assert!(!color.is_primitive());

        let int = TypeDefinition::new("System", "Int32")
            .with_base_type(Some(TypeReference::system("ValueType")));
        assert!(int.is_primitive());

        let point = TypeDefinition::new("System", "Point")
            .with_base_type(Some(TypeReference::system("ValueType")));
        assert!(point.is_value_type());
        assert!(!point.is_primitive());

        let enum_itself = TypeDefinition::new("System", "Enum")
            .with_base_type(Some(TypeReference::system("ValueType")));
        assert!(!enum_itself.is_value_type());
    }

    #[test]
    fn self_reference() {
        let definition = TypeDefinition::new("Test", "Box`1")
            .with_generic_parameter(GenericParameter::new("T"));
        assert!(definition.is_generic());
        assert_eq!(
            definition.to_reference(),
            TypeReference::named("Test", "Box`1")
                .with_generic_arguments(vec![TypeReference::generic_parameter("T")])
        );
    }

    #[test]
    fn constrained_parameters() {
        assert!(!GenericParameter::new("T").is_constrained());
        assert!(GenericParameter::new("T")
            .with_flags(GenericParamFlags::DEFAULT_CONSTRUCTOR_CONSTRAINT)
            .is_constrained());
        assert!(!GenericParameter::new("T")
            .with_flags(GenericParamFlags::COVARIANT)
            .is_constrained());
        assert!(GenericParameter::new("T")
            .with_constraint(TypeReference::system("IDisposable"))
            .is_constrained());
    }
}
