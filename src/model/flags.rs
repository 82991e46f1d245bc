//! Attribute flag sets of the model, following the encodings of ECMA-335 II.23.1.
//!
//! Access and visibility are small enumerations packed into a bit field rather than
//! independent bits; their flags overlap (`PUBLIC` contains the bits of `FAMILY`) and must be
//! compared by equality, never with `contains`.

use bitflags::bitflags;

/// Bitmask for member access extraction
pub const MEMBER_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for type visibility extraction
pub const TYPE_VISIBILITY_MASK: u32 = 0x0007;
/// Bitmask for the vtable layout bit of method attributes
pub const METHOD_VTABLE_LAYOUT_MASK: u32 = 0x0100;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    /// Accessibility of a field or method
    pub struct MemberAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessible by anyone in the assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessible by sub-types anywhere, plus anyone in the assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessible by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MemberAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & MEMBER_ACCESS_MASK)
    }

    /// Extract access flags from raw field attributes
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & MEMBER_ACCESS_MASK)
    }

    /// True for `PUBLIC` only
    #[must_use]
    pub fn is_public(self) -> bool {
        self == Self::PUBLIC
    }
}

impl Default for MemberAccessFlags {
    fn default() -> Self {
        Self::PUBLIC
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method can only be overriden if also accessible
        const STRICT = 0x0200;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special, e.g. a property accessor or an operator
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, depending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
        /// Method has security associated with it
        const HAS_SECURITY = 0x4000;
        /// Method calls another method containing security code
        const REQUIRE_SEC_OBJECT = 0x8000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !MEMBER_ACCESS_MASK & !METHOD_VTABLE_LAYOUT_MASK)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Field modifiers and properties
    pub struct FieldModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field can only be initialized, not written after construction
        const INIT_ONLY = 0x0020;
        /// Value is a compile time constant
        const LITERAL = 0x0040;
        /// Field does not need to be serialized
        const NOT_SERIALIZED = 0x0080;
        /// Field has an RVA
        const HAS_FIELD_RVA = 0x0100;
        /// Name has special meaning
        const SPECIAL_NAME = 0x0200;
        /// The runtime checks the name encoding
        const RTSPECIAL_NAME = 0x0400;
        /// Field has marshalling information
        const HAS_FIELD_MARSHAL = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
        /// Field has a default value
        const HAS_DEFAULT = 0x8000;
    }
}

impl FieldModifiers {
    /// Extract field modifiers from raw field attributes
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !MEMBER_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    /// Visibility of a type
    pub struct TypeVisibility: u32 {
        /// Top-level type, not visible outside the assembly
        const NOT_PUBLIC = 0x0000;
        /// Top-level type, visible everywhere
        const PUBLIC = 0x0001;
        /// Nested type with public visibility
        const NESTED_PUBLIC = 0x0002;
        /// Nested type with private visibility
        const NESTED_PRIVATE = 0x0003;
        /// Nested type with family visibility
        const NESTED_FAMILY = 0x0004;
        /// Nested type with assembly visibility
        const NESTED_ASSEMBLY = 0x0005;
        /// Nested type with family-and-assembly visibility
        const NESTED_FAM_AND_ASSEM = 0x0006;
        /// Nested type with family-or-assembly visibility
        const NESTED_FAM_OR_ASSEM = 0x0007;
    }
}

impl TypeVisibility {
    /// Extract visibility from raw type attributes
    #[must_use]
    pub fn from_type_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & TYPE_VISIBILITY_MASK)
    }

    /// True for any of the nested visibilities
    #[must_use]
    pub fn is_nested(self) -> bool {
        self.bits() >= Self::NESTED_PUBLIC.bits()
    }
}

impl Default for TypeVisibility {
    fn default() -> Self {
        Self::PUBLIC
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Type semantics and modifiers
    pub struct TypeModifiers: u32 {
        /// Type is an interface
        const INTERFACE = 0x0000_0020;
        /// Type is abstract
        const ABSTRACT = 0x0000_0080;
        /// Type cannot be derived from
        const SEALED = 0x0000_0100;
        /// Name has special meaning
        const SPECIAL_NAME = 0x0000_0400;
        /// The runtime checks the name encoding
        const RTSPECIAL_NAME = 0x0000_0800;
        /// Type is imported
        const IMPORT = 0x0000_1000;
        /// Type is serializable
        const SERIALIZABLE = 0x0000_2000;
        /// Type has security associated with it
        const HAS_SECURITY = 0x0004_0000;
        /// Static initialization may run before the first static field access
        const BEFORE_FIELD_INIT = 0x0010_0000;
    }
}

impl TypeModifiers {
    /// Extract modifiers from raw type attributes
    #[must_use]
    pub fn from_type_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !TYPE_VISIBILITY_MASK)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Variance and special constraints of a generic parameter
    pub struct GenericParamFlags: u32 {
        /// Covariant (`out T`)
        const COVARIANT = 0x0001;
        /// Contravariant (`in T`)
        const CONTRAVARIANT = 0x0002;
        /// Reference type constraint
        const REFERENCE_TYPE_CONSTRAINT = 0x0004;
        /// Not nullable value type constraint
        const NOT_NULLABLE_VALUE_TYPE_CONSTRAINT = 0x0008;
        /// Default constructor constraint
        const DEFAULT_CONSTRUCTOR_CONSTRAINT = 0x0010;
    }
}

impl GenericParamFlags {
    /// Mask of the special constraint flags
    pub const SPECIAL_CONSTRAINT_MASK: GenericParamFlags =
        GenericParamFlags::from_bits_truncate(0x001C);

    /// True if any special constraint is set
    #[must_use]
    pub fn has_special_constraints(self) -> bool {
        self.intersects(Self::SPECIAL_CONSTRAINT_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_by_value() {
        assert_eq!(
            MemberAccessFlags::from_method_flags(0x0096),
            MemberAccessFlags::PUBLIC
        );
        assert_eq!(
            MemberAccessFlags::from_field_flags(0x0031),
            MemberAccessFlags::PRIVATE
        );
        // PUBLIC shares bits with FAMILY and FAM_AND_ASSEM
        assert!(MemberAccessFlags::PUBLIC.contains(MemberAccessFlags::FAMILY));
        assert_ne!(MemberAccessFlags::PUBLIC, MemberAccessFlags::FAMILY);
    }

    #[test]
    fn modifiers_skip_access() {
        let modifiers = MethodModifiers::from_method_flags(0x01C6);
        assert!(modifiers.contains(MethodModifiers::VIRTUAL));
        assert!(modifiers.contains(MethodModifiers::HIDE_BY_SIG));
        assert!(!modifiers.contains(MethodModifiers::STATIC));

        let modifiers = FieldModifiers::from_field_flags(0x8056);
        assert_eq!(
            modifiers,
            FieldModifiers::STATIC | FieldModifiers::LITERAL | FieldModifiers::HAS_DEFAULT
        );
    }

    #[test]
    fn type_flags() {
        let flags = 0x0010_01A1;
        assert_eq!(TypeVisibility::from_type_flags(flags), TypeVisibility::PUBLIC);
        assert_eq!(
            TypeModifiers::from_type_flags(flags),
            TypeModifiers::INTERFACE
                | TypeModifiers::ABSTRACT
                | TypeModifiers::SEALED
                | TypeModifiers::BEFORE_FIELD_INIT
        );
        assert!(TypeVisibility::NESTED_PRIVATE.is_nested());
        assert!(!TypeVisibility::PUBLIC.is_nested());
    }

    #[test]
    fn generic_constraints() {
        let flags = GenericParamFlags::from_bits_truncate(0x0014);
        assert!(flags.has_special_constraints());
        assert!(!GenericParamFlags::COVARIANT.has_special_constraints());
    }
}
