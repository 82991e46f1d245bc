//! # dotbrowse Prelude
//!
//! The types needed to load a module, build its declaration tree and inspect the model,
//! available through a single glob import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotbrowse operations
pub use crate::Error;

/// The result type used throughout dotbrowse
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Load a module and build its tree in one step
pub use crate::{browse, browse_with};

/// Declaration sources
pub use crate::provider::{CilModule, InMemoryModule, MetadataProvider};

/// Tree construction and output
pub use crate::tree::{DeclarationNode, TreeBuilder, TreeOptions};

// ================================================================================================
// Declaration Model
// ================================================================================================

/// Types and members
pub use crate::model::{
    FieldDefinition, GenericParameter, Member, MethodDefinition, Parameter, PropertyDefinition,
    TypeDefinition, TypeKey, TypeReference,
};

/// Attribute flags
pub use crate::model::{
    FieldModifiers, GenericParamFlags, MemberAccessFlags, MethodModifiers, TypeModifiers,
    TypeVisibility,
};

// ================================================================================================
// Rendering
// ================================================================================================

/// Signature rendering
pub use crate::render::{
    render_enum_member, render_field, render_generic_arguments,
    render_generic_parameter_constraints, render_method, render_property, render_type,
    render_type_reference,
};

// ================================================================================================
// Metadata Primitives
// ================================================================================================

/// Tokens and table identifiers
pub use crate::metadata::{tables::TableId, token::Token};
