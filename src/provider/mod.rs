//! Sources of declaration metadata.
//!
//! [`MetadataProvider`] is the seam between loading and rendering: the tree builder consumes
//! any provider, whether it reads a real module ([`CilModule`]) or holds hand-made types
//! ([`InMemoryModule`]).

mod cil;
mod memory;

pub use cil::CilModule;
pub use memory::InMemoryModule;

use crate::model::{Member, TypeDefinition, TypeReference};

/// Read access to the declarations of a single module.
///
/// ```rust
/// use dotbrowse::{
///     model::{MethodDefinition, TypeDefinition},
///     InMemoryModule, MetadataProvider,
/// };
///
/// let mut module = InMemoryModule::new();
/// module.add_type(
///     TypeDefinition::new("Demo", "Greeter"),
///     vec![MethodDefinition::new("Greet").into()],
/// );
///
/// let greeter = &module.types()[0];
/// assert_eq!(module.members(greeter).len(), 1);
/// ```
pub trait MetadataProvider {
    /// Every declared type, in enumeration order
    fn types(&self) -> &[TypeDefinition];

    /// Members directly declared by `ty`, in declaration order.
    ///
    /// Constructors are excluded. Returns an empty slice for types this provider does not own.
    fn members(&self, ty: &TypeDefinition) -> &[Member];

    /// Finds the declared type a reference points to, by structural identity
    fn resolve(&self, reference: &TypeReference) -> Option<&TypeDefinition> {
        let key = reference.key();
        self.types().iter().find(|ty| ty.key() == key)
    }
}
