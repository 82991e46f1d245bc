//! Metadata tables (ECMA-335 II.22).
//!
//! Each table that contributes to a declaration has a raw row type here, together with its
//! [`RowReadable`] implementation. The remaining tables are only sized through their column
//! layout in [`TableId::columns`], so the tables after them can be located.
//!
//! Flag constants live next to the table that carries them, e.g. [`TypeAttributes`] with
//! `TypeDef`.

mod customattribute;
mod field;
mod genericparam;
mod genericparamconstraint;
mod interfaceimpl;
mod memberref;
mod methoddef;
mod methodsemantics;
mod nestedclass;
mod param;
mod property;
mod propertymap;
mod typedef;
mod typeref;
mod typespec;
mod types;

pub use customattribute::*;
pub use field::*;
pub use genericparam::*;
pub use genericparamconstraint::*;
pub use interfaceimpl::*;
pub use memberref::*;
pub use methoddef::*;
pub use methodsemantics::*;
pub use nestedclass::*;
pub use param::*;
pub use property::*;
pub use propertymap::*;
pub use typedef::*;
pub use typeref::*;
pub use typespec::*;
pub use types::*;
