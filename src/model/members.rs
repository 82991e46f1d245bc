use crate::model::{
    FieldModifiers, GenericParameter, MemberAccessFlags, MethodModifiers, TypeReference,
};

/// A member directly declared by a type.
///
/// Constructors and events are not members in this classification; event accessor methods
/// appear as plain methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    /// A field
    Field(FieldDefinition),
    /// A property
    Property(PropertyDefinition),
    /// A method
    Method(MethodDefinition),
}

impl Member {
    /// Metadata name of the member
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => &field.name,
            Member::Property(property) => &property.name,
            Member::Method(method) => &method.name,
        }
    }

    /// True if the member is visible outside its assembly hierarchy as `public`
    #[must_use]
    pub fn is_public(&self) -> bool {
        match self {
            Member::Field(field) => field.access.is_public(),
            Member::Property(property) => property.is_public(),
            Member::Method(method) => method.access.is_public(),
        }
    }

    /// True for names the compiler invents, e.g. `<Name>k__BackingField`
    #[must_use]
    pub fn is_compiler_generated(&self) -> bool {
        self.name().starts_with('<')
    }
}

impl From<FieldDefinition> for Member {
    fn from(field: FieldDefinition) -> Self {
        Member::Field(field)
    }
}

impl From<PropertyDefinition> for Member {
    fn from(property: PropertyDefinition) -> Self {
        Member::Property(property)
    }
}

impl From<MethodDefinition> for Member {
    fn from(method: MethodDefinition) -> Self {
        Member::Method(method)
    }
}

/// A field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Metadata name
    pub name: String,
    /// Accessibility
    pub access: MemberAccessFlags,
    /// Modifiers
    pub modifiers: FieldModifiers,
    /// Declared type
    pub field_type: TypeReference,
}

impl FieldDefinition {
    /// A public instance field
    pub fn new(name: impl Into<String>, field_type: TypeReference) -> Self {
        FieldDefinition {
            name: name.into(),
            access: MemberAccessFlags::PUBLIC,
            modifiers: FieldModifiers::empty(),
            field_type,
        }
    }

    /// Sets the accessibility
    #[must_use]
    pub fn with_access(mut self, access: MemberAccessFlags) -> Self {
        self.access = access;
        self
    }

    /// Adds modifiers
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: FieldModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// True for static fields, including constants
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(FieldModifiers::STATIC)
    }

    /// True for compile time constants, such as enum members
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.modifiers.contains(FieldModifiers::LITERAL)
    }
}

/// A property and its accessors
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDefinition {
    /// Metadata name
    pub name: String,
    /// Declared type
    pub property_type: TypeReference,
    /// The `get` accessor
    pub getter: Option<MethodDefinition>,
    /// The `set` accessor
    pub setter: Option<MethodDefinition>,
}

impl PropertyDefinition {
    /// A property without accessors
    pub fn new(name: impl Into<String>, property_type: TypeReference) -> Self {
        PropertyDefinition {
            name: name.into(),
            property_type,
            getter: None,
            setter: None,
        }
    }

    /// Sets the `get` accessor
    #[must_use]
    pub fn with_getter(mut self, getter: MethodDefinition) -> Self {
        self.getter = Some(getter);
        self
    }

    /// Sets the `set` accessor
    #[must_use]
    pub fn with_setter(mut self, setter: MethodDefinition) -> Self {
        self.setter = Some(setter);
        self
    }

    /// The accessor whose modifiers describe the property: the getter, else the setter
    #[must_use]
    pub fn primary_accessor(&self) -> Option<&MethodDefinition> {
        self.getter.as_ref().or(self.setter.as_ref())
    }

    /// True if any accessor is public
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.getter
            .iter()
            .chain(self.setter.iter())
            .any(|accessor| accessor.access.is_public())
    }
}

/// A method parameter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    /// Declared name; may be empty when the metadata carries none
    pub name: String,
    /// Declared type, `ByRef` for `ref` and `out` parameters
    pub parameter_type: TypeReference,
}

impl Parameter {
    /// Creates a parameter
    pub fn new(name: impl Into<String>, parameter_type: TypeReference) -> Self {
        Parameter {
            name: name.into(),
            parameter_type,
        }
    }
}

/// A method
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDefinition {
    /// Metadata name, including the arity suffix some compilers add to generic methods
    pub name: String,
    /// Accessibility
    pub access: MemberAccessFlags,
    /// Modifiers
    pub modifiers: MethodModifiers,
    /// Return type, `System.Void` if none
    pub return_type: TypeReference,
    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,
    /// Generic parameters in declaration order
    pub generic_parameters: Vec<GenericParameter>,
    /// Carries the extension marker attribute
    pub is_extension: bool,
}

impl MethodDefinition {
    /// A public instance method returning `System.Void`, without parameters
    pub fn new(name: impl Into<String>) -> Self {
        MethodDefinition {
            name: name.into(),
            access: MemberAccessFlags::PUBLIC,
            modifiers: MethodModifiers::empty(),
            return_type: TypeReference::system("Void"),
            parameters: Vec::new(),
            generic_parameters: Vec::new(),
            is_extension: false,
        }
    }

    /// Sets the accessibility
    #[must_use]
    pub fn with_access(mut self, access: MemberAccessFlags) -> Self {
        self.access = access;
        self
    }

    /// Adds modifiers
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: MethodModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Sets the return type
    #[must_use]
    pub fn returning(mut self, return_type: TypeReference) -> Self {
        self.return_type = return_type;
        self
    }

    /// Appends a parameter
    #[must_use]
    pub fn with_parameter(mut self, name: &str, parameter_type: TypeReference) -> Self {
        self.parameters.push(Parameter::new(name, parameter_type));
        self
    }

    /// Adds a generic parameter
    #[must_use]
    pub fn with_generic_parameter(mut self, parameter: GenericParameter) -> Self {
        self.generic_parameters.push(parameter);
        self
    }

    /// Marks the method as a static extension method
    #[must_use]
    pub fn as_extension(mut self) -> Self {
        self.modifiers |= MethodModifiers::STATIC;
        self.is_extension = true;
        self
    }

    /// True for static methods
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MethodModifiers::STATIC)
    }

    /// True for abstract methods
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(MethodModifiers::ABSTRACT)
    }

    /// True for virtual methods, abstract ones included
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.modifiers.contains(MethodModifiers::VIRTUAL)
    }

    /// True for `.ctor` and `.cctor`
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == ".ctor" || self.name == ".cctor"
    }

    /// True for property accessors, e.g. `get_Name` and `set_Name`
    #[must_use]
    pub fn is_accessor(&self) -> bool {
        self.modifiers.contains(MethodModifiers::SPECIAL_NAME)
            && (self.name.starts_with("get_") || self.name.starts_with("set_"))
    }

    /// The type an extension method extends: its first parameter's type without by-ref.
    ///
    /// `None` for ordinary methods and for marked methods that take no parameters.
    #[must_use]
    pub fn receiver(&self) -> Option<&TypeReference> {
        if !self.is_extension {
            return None;
        }

        self.parameters
            .first()
            .map(|parameter| parameter.parameter_type.strip_by_ref())
    }
}
