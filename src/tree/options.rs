//! Options for building a declaration tree
//!
//! The default mirrors what runtime reflection reports for a module: every declared type and
//! member regardless of accessibility, compiler-generated ones and property accessors included.

use crate::model::{Member, TypeDefinition};

/// Selects which declarations end up in the tree
///
/// Options only filter the first pass over the module. A filtered method is never deferred as
/// an extension, and a receiver type that was filtered out is synthesized like any type the
/// module does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TreeOptions {
    /// Include types and members that are not `public`
    pub include_non_public: bool,

    /// Include types and members with compiler-invented names, starting with `<`
    pub include_compiler_generated: bool,

    /// Include the `get_X` / `set_X` accessor methods next to their property
    pub include_accessors: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            include_non_public: true,
            include_compiler_generated: true,
            include_accessors: true,
        }
    }
}

impl TreeOptions {
    /// Everything the module declares
    #[must_use]
    pub fn complete() -> Self {
        Self::default()
    }

    /// Only what a consumer of the module can call: public declarations without
    /// compiler-generated names and without separate accessor methods
    #[must_use]
    pub fn public_surface() -> Self {
        Self {
            include_non_public: false,
            include_compiler_generated: false,
            include_accessors: false,
        }
    }

    pub(crate) fn includes_type(&self, ty: &TypeDefinition) -> bool {
        (self.include_non_public || ty.is_public())
            && (self.include_compiler_generated || !ty.is_compiler_generated())
    }

    pub(crate) fn includes_member(&self, member: &Member) -> bool {
        if !self.include_non_public && !member.is_public() {
            return false;
        }

        if !self.include_compiler_generated && member.is_compiler_generated() {
            return false;
        }

        match member {
            Member::Method(method) => self.include_accessors || !method.is_accessor(),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        FieldDefinition, MemberAccessFlags, MethodDefinition, MethodModifiers, TypeReference,
        TypeVisibility,
    };

    #[test]
    fn presets() {
        let complete = TreeOptions::complete();
        assert!(complete.include_non_public);
        assert!(complete.include_compiler_generated);
        assert!(complete.include_accessors);
        assert_eq!(complete, TreeOptions::default());

        let public = TreeOptions::public_surface();
        assert!(!public.include_non_public);
        assert!(!public.include_compiler_generated);
        assert!(!public.include_accessors);
    }

    #[test]
    fn type_filter() {
        let public = TreeOptions::public_surface();

        assert!(public.includes_type(&TypeDefinition::new("Demo", "Widget")));
        assert!(!public.includes_type(
            &TypeDefinition::new("Demo", "Helper").with_visibility(TypeVisibility::NOT_PUBLIC)
        ));
        assert!(!public.includes_type(&TypeDefinition::new("", "<PrivateImplementationDetails>")));
        assert!(TreeOptions::complete()
            .includes_type(&TypeDefinition::new("", "<PrivateImplementationDetails>")));
    }

    #[test]
    fn member_filter() {
        let public = TreeOptions::public_surface();

        let getter: Member = MethodDefinition::new("get_Name")
            .with_modifiers(MethodModifiers::SPECIAL_NAME)
            .into();
        assert!(!public.includes_member(&getter));
        assert!(TreeOptions::complete().includes_member(&getter));

        let backing: Member =
            FieldDefinition::new("<Name>k__BackingField", TypeReference::system("String")).into();
        assert!(!public.includes_member(&backing));

        let private: Member = MethodDefinition::new("Reset")
            .with_access(MemberAccessFlags::PRIVATE)
            .into();
        assert!(!public.includes_member(&private));
        assert!(public.includes_member(&MethodDefinition::new("Reset").into()));
    }
}
