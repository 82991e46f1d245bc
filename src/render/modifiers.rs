//! Modifier prefixes of declarations.
//!
//! Every prefix returned here is either empty or ends with a single space, so prefixes
//! concatenate directly in front of the next token.

use crate::model::{
    FieldDefinition, FieldModifiers, MemberAccessFlags, MethodDefinition, TypeDefinition,
    TypeVisibility,
};

/// Accessibility keyword of a field, method or accessor.
///
/// Access levels are an enumeration stored in a bit field, so each level is compared by
/// equality. The checks run from `protected` to `public`; compiler-controlled members have no
/// keyword.
#[must_use]
pub fn member_access(access: MemberAccessFlags) -> &'static str {
    if access == MemberAccessFlags::FAMILY {
        "protected "
    } else if access == MemberAccessFlags::ASSEM {
        "internal "
    } else if access == MemberAccessFlags::FAM_OR_ASSEM {
        "protected internal "
    } else if access == MemberAccessFlags::FAM_AND_ASSEM {
        "private protected "
    } else if access == MemberAccessFlags::PRIVATE {
        "private "
    } else if access == MemberAccessFlags::PUBLIC {
        "public "
    } else {
        ""
    }
}

/// Accessibility keyword of a type
#[must_use]
pub fn type_access(visibility: TypeVisibility) -> &'static str {
    if visibility == TypeVisibility::PUBLIC || visibility == TypeVisibility::NESTED_PUBLIC {
        "public "
    } else if visibility == TypeVisibility::NOT_PUBLIC
        || visibility == TypeVisibility::NESTED_ASSEMBLY
    {
        "internal "
    } else if visibility == TypeVisibility::NESTED_FAMILY {
        "protected "
    } else if visibility == TypeVisibility::NESTED_FAM_OR_ASSEM {
        "protected internal "
    } else if visibility == TypeVisibility::NESTED_FAM_AND_ASSEM {
        "private protected "
    } else {
        "private "
    }
}

/// The shape keyword of a type, first match wins:
///
/// | Type                     | Keyword          |
/// |--------------------------|------------------|
/// | abstract + sealed class  | `static class`   |
/// | abstract class           | `abstract class` |
/// | sealed class             | `sealed class`   |
/// | class                    | `class`          |
/// | enum                     | `enum`           |
/// | interface                | `interface`      |
/// | non-primitive value type | `struct`         |
///
/// Primitive value types have no keyword.
#[must_use]
pub fn type_shape(ty: &TypeDefinition) -> &'static str {
    if ty.is_class() {
        match (ty.is_abstract(), ty.is_sealed()) {
            (true, true) => "static class ",
            (true, false) => "abstract class ",
            (false, true) => "sealed class ",
            (false, false) => "class ",
        }
    } else if ty.is_enum() {
        "enum "
    } else if ty.is_interface() {
        "interface "
    } else if ty.is_value_type() && !ty.is_primitive() {
        "struct "
    } else {
        ""
    }
}

/// Accessibility, `static` and `const` or `readonly`
#[must_use]
pub fn field_modifiers(field: &FieldDefinition) -> String {
    let mut modifiers = String::from(member_access(field.access));

    if field.is_static() {
        modifiers.push_str("static ");
    }

    if field.is_literal() {
        modifiers.push_str("const ");
    } else if field.modifiers.contains(FieldModifiers::INIT_ONLY) {
        modifiers.push_str("readonly ");
    }

    modifiers
}

/// Accessibility, `static` and `abstract` or `virtual`
#[must_use]
pub fn method_modifiers(method: &MethodDefinition) -> String {
    let mut modifiers = String::from(member_access(method.access));

    if method.is_static() {
        modifiers.push_str("static ");
    }

    if method.is_abstract() {
        modifiers.push_str("abstract ");
    } else if method.is_virtual() {
        modifiers.push_str("virtual ");
    }

    modifiers
}
