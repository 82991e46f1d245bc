//! Owned description of a module's declarations.
//!
//! Providers translate whatever they read into these types; the renderer and the tree builder
//! only ever see the model. Everything here is plain data: `Clone`, `Debug`, `Send + Sync`.

mod flags;
mod members;
mod types;

pub use flags::*;
pub use members::{
    FieldDefinition, Member, MethodDefinition, Parameter, PropertyDefinition,
};
pub use types::{GenericParameter, TypeDefinition, TypeKey, TypeReference};
