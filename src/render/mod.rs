//! Textual signatures of types and members.
//!
//! Rendering is pure and total: every well-formed model value has exactly one signature, and
//! the same value always renders the same text. Signatures read like C# declarations, with
//! referenced types shown by their runtime simple names (`Int32`, `String`, `Void`).
//!
//! | Declaration | Example                                                          |
//! |-------------|------------------------------------------------------------------|
//! | type        | `internal class TestClass3<T> where T: class, new()`             |
//! | field       | `private static readonly Dictionary<String, Int32> cache`        |
//! | enum member | `Red`                                                            |
//! | property    | `public virtual String Name { public get; private set; }`        |
//! | method      | `public static Boolean IsEmpty(this String value)`               |
//!
//! # Examples
//!
//! ```rust
//! use dotbrowse::model::{MethodDefinition, TypeReference};
//! use dotbrowse::render::render_method;
//!
//! let method = MethodDefinition::new("Repeat")
//!     .as_extension()
//!     .returning(TypeReference::system("String"))
//!     .with_parameter("text", TypeReference::system("String"))
//!     .with_parameter("count", TypeReference::system("Int32"));
//!
//! assert_eq!(
//!     render_method(&method),
//!     "public static String Repeat(this String text, Int32 count)"
//! );
//! ```

mod modifiers;
mod names;

pub use modifiers::{field_modifiers, member_access, method_modifiers, type_access, type_shape};
pub use names::{
    render_constraint_clause, render_generic_arguments, render_generic_parameter_constraints,
    render_generic_parameters, render_type_reference, strip_arity,
};

use crate::model::{FieldDefinition, MethodDefinition, PropertyDefinition, TypeDefinition};

/// Renders the declaration of a type.
///
/// The parent list holds the base type, unless it is trivial, followed by the declared
/// interfaces. A base type is trivial for value types and when it is absent or
/// `System.Object`.
#[must_use]
pub fn render_type(ty: &TypeDefinition) -> String {
    let mut rendered = String::from(type_access(ty.visibility));
    rendered.push_str(type_shape(ty));
    rendered.push_str(strip_arity(&ty.name));
    rendered.push_str(&render_generic_parameters(&ty.generic_parameters));

    let mut parents = Vec::with_capacity(ty.interfaces.len() + 1);
    if let Some(base) = &ty.base_type {
        if !ty.is_value_type() && !base.is_system("Object") {
            parents.push(render_type_reference(base));
        }
    }
    parents.extend(ty.interfaces.iter().map(render_type_reference));

    if !parents.is_empty() {
        rendered.push_str(": ");
        rendered.push_str(&parents.join(", "));
    }

    rendered.push_str(&render_constraint_clause(&ty.generic_parameters));
    rendered
}

/// Renders a field as modifiers, type and name
#[must_use]
pub fn render_field(field: &FieldDefinition) -> String {
    format!(
        "{}{} {}",
        field_modifiers(field),
        render_type_reference(&field.field_type),
        field.name
    )
}

/// Renders a member of an enum type: its bare name
#[must_use]
pub fn render_enum_member(field: &FieldDefinition) -> String {
    field.name.clone()
}

/// Renders a property with its accessors.
///
/// The leading modifiers are those of the getter, or of the setter for write-only properties.
/// Each accessor is prefixed by its own accessibility.
#[must_use]
pub fn render_property(property: &PropertyDefinition) -> String {
    let mut rendered = property
        .primary_accessor()
        .map(method_modifiers)
        .unwrap_or_default();

    rendered.push_str(&render_type_reference(&property.property_type));
    rendered.push(' ');
    rendered.push_str(&property.name);
    rendered.push_str(" { ");

    if let Some(getter) = &property.getter {
        rendered.push_str(member_access(getter.access));
        rendered.push_str("get; ");
    }
    if let Some(setter) = &property.setter {
        rendered.push_str(member_access(setter.access));
        rendered.push_str("set; ");
    }

    rendered.push('}');
    rendered
}

/// Renders a method as modifiers, return type, name, generic parameters, parameter list and
/// constraint clause.
///
/// The first parameter of an extension method carries the `this` marker.
#[must_use]
pub fn render_method(method: &MethodDefinition) -> String {
    let mut rendered = method_modifiers(method);

    rendered.push_str(&render_type_reference(&method.return_type));
    rendered.push(' ');
    rendered.push_str(strip_arity(&method.name));
    rendered.push_str(&render_generic_parameters(&method.generic_parameters));

    let parameters: Vec<String> = method
        .parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| {
            let marker = if position == 0 && method.is_extension {
                "this "
            } else {
                ""
            };
            let parameter_type = render_type_reference(&parameter.parameter_type);

            if parameter.name.is_empty() {
                format!("{marker}{parameter_type}")
            } else {
                format!("{marker}{parameter_type} {}", parameter.name)
            }
        })
        .collect();

    rendered.push('(');
    rendered.push_str(&parameters.join(", "));
    rendered.push(')');

    rendered.push_str(&render_constraint_clause(&method.generic_parameters));
    rendered
}
