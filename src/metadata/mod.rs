//! Reading ECMA-335 metadata from a .NET module.
//!
//! The layers build on each other:
//!
//! - [`cor20header`] - the CLR runtime header that locates the metadata inside the PE image
//! - [`root`] - the `BSJB` metadata root and its stream directory
//! - [`streams`] - the `#~` tables stream and the `#Strings` / `#Blob` heaps
//! - [`tables`] - typed readers for the rows that describe declarations
//! - [`signatures`] - decoding of field, method, property and type-spec blobs
//! - [`token`] - 32-bit row handles shared by all of the above
//!
//! Everything here borrows from the loaded bytes and decodes lazily; [`crate::CilModule`]
//! turns the result into the owned [`crate::model`].

/// The CLR runtime header
pub mod cor20header;
/// The metadata root and its stream directory
pub mod root;
/// Field, method, property and type specification signatures
pub mod signatures;
/// Metadata streams and heaps
pub mod streams;
/// Metadata tables
pub mod tables;
/// Metadata tokens
pub mod token;
